#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the batch subcommands, run against a temporary
//! repository through their `run` entry points.

mod common;

use std::fs;

use common::{TestRepoBuilder, links_to};
use skillkit::cli::{GlobalOpts, UseOpts};
use skillkit::commands;
use skillkit::config::CONFIG_FILE;
use skillkit::logging::Logger;

fn use_opts(module: &str) -> UseOpts {
    UseOpts {
        module: module.to_string(),
        platform: None,
        global: false,
        project: false,
        link_as: None,
        dry_run: false,
    }
}

fn two_platforms() -> common::TestRepo {
    TestRepoBuilder::new()
        .with_platform("p1")
        .with_platform("p2")
        .with_skill("review", "Reviews code")
        .with_agent("planner", "Plans work")
        .build()
}

// ---------------------------------------------------------------------------
// use
// ---------------------------------------------------------------------------

#[test]
fn use_links_every_platform() {
    let repo = two_platforms();
    let log = Logger::new("use");
    commands::use_module::run(&repo.global_opts(), &use_opts("review"), &log).unwrap();

    assert!(links_to(&repo.skill_link("p1", "review"), &repo.skill_dir("review")));
    assert!(links_to(&repo.skill_link("p2", "review"), &repo.skill_dir("review")));
}

#[test]
fn use_single_platform_with_rename() {
    let repo = two_platforms();
    let opts = UseOpts {
        platform: Some("p2".to_string()),
        link_as: Some("rv".to_string()),
        ..use_opts("review")
    };

    commands::use_module::run(&repo.global_opts(), &opts, &Logger::new("use")).unwrap();

    assert!(!repo.skill_link("p1", "rv").exists());
    assert!(links_to(&repo.skill_link("p2", "rv"), &repo.skill_dir("review")));
}

#[test]
fn use_dry_run_changes_nothing() {
    let repo = two_platforms();
    let opts = UseOpts {
        dry_run: true,
        ..use_opts("review")
    };

    commands::use_module::run(&repo.global_opts(), &opts, &Logger::new("use")).unwrap();

    assert!(!repo.platform_root("p1").exists());
    assert!(!repo.platform_root("p2").exists());
}

#[test]
fn use_reports_unknown_names() {
    let repo = two_platforms();
    let log = Logger::new("use");

    let err = commands::use_module::run(&repo.global_opts(), &use_opts("nope"), &log).unwrap_err();
    assert!(err.to_string().contains("module not found: nope"));

    let opts = UseOpts {
        platform: Some("zed".to_string()),
        ..use_opts("review")
    };
    let err = commands::use_module::run(&repo.global_opts(), &opts, &log).unwrap_err();
    assert!(err.to_string().contains("unknown platform: zed"));
}

#[test]
fn use_fails_when_target_is_blocked() {
    let repo = two_platforms();
    fs::create_dir_all(repo.skill_link("p1", "review")).unwrap();

    let log = Logger::new("use");
    let err =
        commands::use_module::run(&repo.global_opts(), &use_opts("review"), &log).unwrap_err();

    assert_eq!(err.to_string(), "1 link operation(s) failed");
    assert!(repo.skill_link("p1", "review").is_dir());
    assert!(repo.skill_link("p2", "review").is_symlink());
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

#[test]
fn remove_unlinks_and_tolerates_absent_targets() {
    let repo = two_platforms();
    commands::use_module::run(
        &repo.global_opts(),
        &UseOpts {
            platform: Some("p1".to_string()),
            ..use_opts("review")
        },
        &Logger::new("use"),
    )
    .unwrap();

    commands::remove::run(&repo.global_opts(), "review", None, &Logger::new("remove")).unwrap();
    assert!(!repo.skill_link("p1", "review").exists());

    let log = Logger::new("remove");
    commands::remove::run(&repo.global_opts(), "review", Some("p2"), &log).unwrap();
}

#[test]
fn remove_refuses_real_directory() {
    let repo = two_platforms();
    let target = repo.skill_link("p2", "review");
    fs::create_dir_all(&target).unwrap();

    let log = Logger::new("remove");
    let result = commands::remove::run(&repo.global_opts(), "review", Some("p2"), &log);

    assert!(result.is_err());
    assert!(target.is_dir());
}

// ---------------------------------------------------------------------------
// sync / status
// ---------------------------------------------------------------------------

#[test]
fn sync_links_every_module_on_every_platform() {
    let repo = two_platforms();
    commands::sync::run(&repo.global_opts(), false, &Logger::new("sync")).unwrap();

    for key in ["p1", "p2"] {
        assert!(repo.skill_link(key, "review").is_symlink());
        assert!(repo.agent_link(key, "planner").is_symlink());
    }
    commands::status::run(&repo.global_opts(), &Logger::new("status")).unwrap();
}

#[test]
fn sync_dry_run_changes_nothing() {
    let repo = two_platforms();
    let log = Logger::new("sync");
    commands::sync::run(&repo.global_opts(), true, &log).unwrap();

    assert!(!repo.platform_root("p1").exists());
    assert_eq!(log.failure_count(), 0);
}

#[test]
fn sync_continues_past_blocked_targets() {
    let repo = two_platforms();
    fs::create_dir_all(repo.skill_link("p1", "review")).unwrap();

    let result = commands::sync::run(&repo.global_opts(), false, &Logger::new("sync"));

    assert!(result.is_err());
    assert!(repo.agent_link("p1", "planner").is_symlink());
    assert!(repo.skill_link("p2", "review").is_symlink());
}

// ---------------------------------------------------------------------------
// init / info / list / platforms
// ---------------------------------------------------------------------------

#[test]
fn init_then_read_only_commands_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let global = GlobalOpts {
        repo: Some(dir.path().join("agent")),
        config: None,
    };
    let log = Logger::new("init");

    commands::init::run(&global, &log).unwrap();
    assert!(dir.path().join("agent").join(CONFIG_FILE).is_file());

    commands::list::run(&global, &log).unwrap();
    commands::platforms::run(&global, &log).unwrap();
    commands::status::run(&global, &log).unwrap();
}

#[test]
fn commands_without_config_point_at_init() {
    let dir = tempfile::tempdir().unwrap();
    let global = GlobalOpts {
        repo: Some(dir.path().to_path_buf()),
        config: None,
    };

    let err = commands::list::run(&global, &Logger::new("list")).unwrap_err();

    assert!(err.to_string().contains("sk init"));
}

#[test]
fn info_reports_missing_module() {
    let repo = two_platforms();
    let log = Logger::new("info");
    commands::info::run(&repo.global_opts(), "planner", &log).unwrap();
    assert!(commands::info::run(&repo.global_opts(), "ghost", &log).is_err());
}
