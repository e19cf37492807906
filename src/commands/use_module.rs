//! Command: link one module into platform directories.
use anyhow::Result;

use crate::cli::{GlobalOpts, UseOpts};
use crate::logging::Logger;
use crate::reconcile::{self, Change, Scope};

/// Run the use command.
///
/// Links onto the named platform, or every platform in display order.
/// Each platform is attempted independently.
///
/// # Errors
///
/// Returns an error if configuration loading or a lookup fails, or if any
/// link could not be created.
pub fn run(global: &GlobalOpts, opts: &UseOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let mut module = setup.module(&opts.module)?;
    if let Some(name) = &opts.link_as {
        module = module.renamed(name);
    }
    let targets = setup.targets(opts.platform.as_deref())?;
    let scope = if opts.project {
        Scope::Project
    } else {
        Scope::Global
    };

    if opts.dry_run {
        log.stage(&format!(
            "Preview: {} → {} platform(s)",
            module.name,
            targets.len()
        ));
        let rows = reconcile::preview(std::slice::from_ref(&module), &targets, scope);
        super::print_preview(&rows, log);
        log.print_summary();
        return Ok(());
    }

    log.stage(&format!("Linking {}", module.name));
    for (key, platform) in &targets {
        let result = reconcile::apply_one(&module, key, platform, scope);
        if let Ok(target) = &result {
            log.debug(&format!("{} → {}", target.display(), module.path.display()));
        }
        reconcile::report(log, &module, key, platform, Change::Sync, result.as_ref().err());
    }
    super::finish(log)
}
