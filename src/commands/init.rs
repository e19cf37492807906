//! Command: create the repository layout and a starter `platforms.toml`.
use anyhow::{Context as _, Result};
use std::fs;

use crate::catalog::Category;
use crate::cli::GlobalOpts;
use crate::config::{ConfigLocation, STARTER_CONFIG};
use crate::logging::{Log, Logger};

/// Create `<repo>`, `<repo>/skill` and `<repo>/agent`, then seed the
/// configuration file unless one already exists.
///
/// Safe to run repeatedly: existing directories and configuration are
/// left untouched.
///
/// # Errors
///
/// Returns an error if a directory or the configuration file cannot be
/// created.
pub fn initialize(location: &ConfigLocation, log: &dyn Log) -> Result<()> {
    let repo = &location.repo;
    let dirs = std::iter::once(repo.clone())
        .chain(Category::ALL.iter().map(|c| repo.join(c.as_str())));
    for dir in dirs {
        if dir.is_dir() {
            log.debug(&format!("{} exists", dir.display()));
            continue;
        }
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        log.info(&format!("✓ Created {}", dir.display()));
    }

    let file = &location.file;
    if file.exists() {
        log.warn(&format!("{} already exists", file.display()));
    } else {
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(file, STARTER_CONFIG).with_context(|| format!("writing {}", file.display()))?;
        log.info(&format!("✓ Created {}", file.display()));
    }

    log.info(&format!("✓ Repository initialized at {}", repo.display()));
    Ok(())
}

/// Run the init command.
///
/// # Errors
///
/// Returns an error if the layout cannot be created.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let location = ConfigLocation::discover(global.repo.as_deref(), global.config.as_deref());
    initialize(&location, log)
}
