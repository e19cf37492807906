//! Command: remove a module's links.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::links::{self, LinkState};
use crate::logging::Logger;
use crate::reconcile::{self, Change, Scope};

/// Run the remove command.
///
/// Only targets that carry something are touched: an absent link is
/// skipped silently, a real file or directory is refused.  Skipped
/// platforms are logged at debug level only and never reach the summary,
/// so a module linked nowhere reports a single "not linked" line instead of
/// a per-platform result.
///
/// # Errors
///
/// Returns an error if configuration loading or a lookup fails, or if any
/// removal was refused.
pub fn run(
    global: &GlobalOpts,
    module: &str,
    platform: Option<&str>,
    log: &Logger,
) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let module = setup.module(module)?;
    let targets = setup.targets(platform)?;

    log.stage(&format!("Removing {}", module.name));
    let mut touched = 0;
    for (key, platform) in &targets {
        let target = reconcile::link_target(&module, key, platform, Scope::Global);
        if links::query(&target) == LinkState::Absent {
            log.debug(&format!("{} not linked on {key}", module.name));
            continue;
        }
        touched += 1;
        let result = links::remove(&target);
        reconcile::report(log, &module, key, platform, Change::Remove, result.as_ref().err());
    }
    if touched == 0 {
        log.info(&format!("{} is not linked on any platform", module.name));
    }
    super::finish(log)
}
