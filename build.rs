//! Embeds the build version from `git describe`.
#![allow(clippy::print_stdout)]

use std::process::Command;

fn main() {
    // CI release builds pass SKILLKIT_VERSION explicitly; local builds use
    // git describe when a repository is available.
    if let Ok(version) = std::env::var("SKILLKIT_VERSION") {
        println!("cargo:rustc-env=SKILLKIT_VERSION={version}");
    } else if let Ok(output) = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        && output.status.success()
    {
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        println!("cargo:rustc-env=SKILLKIT_VERSION={version}");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=SKILLKIT_VERSION");
}
