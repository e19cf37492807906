//! Command: show registered platforms.
use anyhow::Result;
use crossterm::style::Stylize;

use crate::catalog::Category;
use crate::cli::GlobalOpts;
use crate::config::{Config, Platform};
use crate::logging::{Log, Logger};

fn category_dirs(root: &str, platform: &Platform) -> String {
    let root = root.trim_end_matches('/');
    Category::ALL
        .iter()
        .map(|c| format!("{root}/{}/", platform.category_dir(*c)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Log every platform in display order with its roots.  Members of an
/// explicit default set are marked.
pub fn show(config: &Config, log: &dyn Log) {
    log.stage(&format!("Registered Platforms ({})", config.platforms.len()));
    for (key, platform) in config.ordered_platforms() {
        let marker = if config.default_platforms.contains(&key) {
            format!(" {}", "[default]".yellow())
        } else {
            String::new()
        };
        log.info(&format!(
            "{} {}{marker}",
            platform.name.clone().white(),
            format!("({key})").dark_grey()
        ));
        log.info(&format!(
            "    Project: {}",
            category_dirs(&platform.project, platform).dark_grey()
        ));
        log.info(&format!(
            "    Global:  {}",
            category_dirs(&platform.global, platform).dark_grey()
        ));
    }
}

/// Run the platforms command.
///
/// # Errors
///
/// Returns an error if configuration loading fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    show(&setup.config, log);
    Ok(())
}
