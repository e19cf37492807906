//! Command: show details of a module.
use anyhow::Result;
use crossterm::style::Stylize;

use crate::cli::GlobalOpts;
use crate::logging::Logger;

/// Run the info command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or the module does not
/// exist.
pub fn run(global: &GlobalOpts, name: &str, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let module = setup.module(name)?;

    log.info(&format!("{} {}", "Module:".blue(), module.name.clone().white()));
    log.info(&format!("{} {}", "Category:".blue(), module.category));
    log.info(&format!("{} {}", "Path:".blue(), module.path.display()));
    if !module.description.is_empty() {
        log.info(&format!("{} {}", "Description:".blue(), module.description));
    }
    if !module.aliases.is_empty() {
        log.info(&"Aliases:".blue().to_string());
        for (key, alias) in &module.aliases {
            log.info(&format!("  {key} → {alias}"));
        }
    }
    Ok(())
}
