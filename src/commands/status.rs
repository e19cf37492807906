//! Command: health check over every module and platform.
use anyhow::Result;

use crate::catalog::{self, Module};
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::{Log, Logger};
use crate::reconcile::{self, LinkStatus};

/// Aggregate link health.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HealthReport {
    /// Links pointing at their module.
    pub healthy: usize,
    /// Links pointing elsewhere, or targets occupied by real entries.
    pub broken: usize,
    /// Targets with nothing at them.
    pub missing: usize,
}

/// Classify every module on every platform, logging each problem found.
pub fn check(config: &Config, modules: &[Module], log: &dyn Log) -> HealthReport {
    let mut report = HealthReport::default();
    for module in modules {
        for (key, platform) in config.ordered_platforms() {
            match reconcile::status(module, &key, platform) {
                LinkStatus::Healthy => report.healthy += 1,
                LinkStatus::Broken(dest) => {
                    report.broken += 1;
                    log.error(&format!(
                        "{} → {key}: broken (points to {})",
                        module.name,
                        dest.display()
                    ));
                }
                LinkStatus::Blocked => {
                    report.broken += 1;
                    log.warn(&format!("{} → {key}: blocked by real file/dir", module.name));
                }
                LinkStatus::Missing => report.missing += 1,
            }
        }
    }
    report
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if configuration loading fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let modules = catalog::list_all(&setup.config);
    if modules.is_empty() {
        log.warn("No modules found");
        return Ok(());
    }

    log.stage("Health Check");
    let report = check(&setup.config, &modules, log);
    log.info(&format!(
        "✓ Healthy: {}  ✗ Broken: {}  ○ Not linked: {}",
        report.healthy, report.broken, report.missing
    ));
    if report.broken > 0 {
        log.info("Run 'sk sync' to fix broken links.");
    }
    Ok(())
}
