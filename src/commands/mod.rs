//! Subcommand orchestration.
//!
//! Each command module exposes a `run` entry point called from `main`;
//! the shared setup sequence, lookups and preview table live here.
pub mod completions;
pub mod info;
pub mod init;
pub mod interactive;
pub mod list;
pub mod platforms;
pub mod remove;
pub mod status;
pub mod sync;
pub mod use_module;
pub mod version;

use anyhow::Result;
use crossterm::style::Stylize;

use crate::catalog::{self, Module};
use crate::cli::GlobalOpts;
use crate::config::{Config, ConfigLocation, Platform, validation};
use crate::error::{ConfigError, SkillkitError};
use crate::logging::{ItemStatus, Log, Logger};
use crate::reconcile::{PreviewAction, PreviewRow};

/// Shared state produced by the common command setup sequence.
///
/// Resolves the repository location, loads `platforms.toml` and reports
/// validation warnings so that each command does not repeat the
/// boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Where the repository and `platforms.toml` were found.
    pub location: ConfigLocation,
    /// Loaded configuration.
    pub config: Config,
}

impl CommandSetup {
    /// Discover the location and load the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is missing or invalid.
    pub fn init(global: &GlobalOpts, log: &dyn Log) -> Result<Self> {
        let location = ConfigLocation::discover(global.repo.as_deref(), global.config.as_deref());
        log.debug(&format!("repo: {}", location.repo.display()));
        log.debug(&format!("config: {}", location.file.display()));

        let config = match Config::load(&location) {
            Ok(config) => config,
            Err(e @ ConfigError::Unavailable { .. }) => {
                return Err(anyhow::Error::new(SkillkitError::from(e))
                    .context("no configuration found; run 'sk init' first"));
            }
            Err(e) => return Err(SkillkitError::from(e).into()),
        };
        log.debug(&format!("{} platforms configured", config.platforms.len()));

        report_warnings(&validation::validate(&config), log);

        Ok(Self { location, config })
    }

    /// Resolve a module by name.
    ///
    /// # Errors
    ///
    /// Returns [`SkillkitError::Catalog`] if no such module exists.
    pub fn module(&self, name: &str) -> Result<Module, SkillkitError> {
        Ok(catalog::find(&self.config, name)?)
    }

    /// Platforms an operation targets: the single named key, or every
    /// platform in display order.
    ///
    /// # Errors
    ///
    /// Returns [`SkillkitError::Catalog`] for an unknown platform key.
    pub fn targets(&self, key: Option<&str>) -> Result<Vec<(String, &Platform)>, SkillkitError> {
        match key {
            Some(key) => Ok(vec![(key.to_string(), self.config.platform(key)?)]),
            None => Ok(self.config.ordered_platforms()),
        }
    }
}

fn report_warnings(warnings: &[validation::ValidationWarning], log: &dyn Log) {
    if warnings.is_empty() {
        return;
    }
    log.warn(&format!(
        "found {} configuration warning(s):",
        warnings.len()
    ));
    for warning in warnings {
        log.warn(&format!(
            "  {} [{}]: {}",
            warning.source, warning.item, warning.message
        ));
    }
}

/// Print the summary and bail if any link operation failed.
///
/// # Errors
///
/// Returns an error carrying the failure count.
pub fn finish(log: &Logger) -> Result<()> {
    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} link operation(s) failed");
    }
    Ok(())
}

/// Print a dry-run preview as a table and record each row for the summary.
///
/// Every line goes through [`Log::dry_run`] so the table carries the
/// dry-run marker on the console and in the log file.
pub fn print_preview(rows: &[PreviewRow], log: &dyn Log) {
    const HEADERS: [&str; 4] = ["Module", "Platform", "Target Path", "Action"];

    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|r| {
            [
                r.module.clone(),
                r.platform.clone(),
                r.target.display().to_string(),
            ]
        })
        .collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let [w_module, w_platform, w_target, w_action] = widths;
    let [h_module, h_platform, h_target, h_action] = HEADERS;

    log.dry_run(&format!(
        "{h_module:<w_module$}  {h_platform:<w_platform$}  {h_target:<w_target$}  {h_action}"
    ));
    log.dry_run(&"-".repeat(w_module + w_platform + w_target + w_action + 6));
    for (row, [module, platform, target]) in rows.iter().zip(&cells) {
        let action = match row.action {
            PreviewAction::Create => row.action.to_string().green(),
            PreviewAction::Update => row.action.to_string().yellow(),
        };
        log.dry_run(&format!(
            "{module:<w_module$}  {platform:<w_platform$}  {target:<w_target$}  {action}"
        ));
        log.record_item(
            &format!("{module} → {platform}"),
            ItemStatus::DryRun,
            Some(&row.action.to_string()),
        );
    }
}
