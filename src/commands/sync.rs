//! Command: link every module onto every platform.
use anyhow::Result;

use crate::catalog;
use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::reconcile::{self, Scope};

/// Run the sync command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or any link could not
/// be created.
pub fn run(global: &GlobalOpts, dry_run: bool, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let modules = catalog::list_all(&setup.config);
    if modules.is_empty() {
        log.warn("No modules to sync");
        return Ok(());
    }
    let targets = setup.config.ordered_platforms();

    if dry_run {
        log.stage(&format!(
            "Preview: {} modules → {} platforms = {} symlinks",
            modules.len(),
            targets.len(),
            modules.len() * targets.len()
        ));
        super::print_preview(&reconcile::preview(&modules, &targets, Scope::Global), log);
        log.print_summary();
        return Ok(());
    }

    log.stage(&format!(
        "Syncing {} modules to {} platforms",
        modules.len(),
        targets.len()
    ));
    let tally = reconcile::sync_all(&modules, &targets, log);
    log.debug(&format!("{} linked, {} failed", tally.success, tally.failed));
    super::finish(log)
}
