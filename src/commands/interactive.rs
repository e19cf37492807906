//! Command: the interactive menu, started when no subcommand is given.
use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Config, ConfigLocation, TomlConfigStore, validation};
use crate::error::ConfigError;
use crate::logging::Logger;
use crate::navigation::Session;
use crate::navigation::terminal::CrosstermTerminal;

/// Run the interactive session.
///
/// A missing configuration is not fatal here: the session starts empty so
/// that the Init entry can create it.
///
/// # Errors
///
/// Returns an error if the configuration exists but cannot be parsed.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let location = ConfigLocation::discover(global.repo.as_deref(), global.config.as_deref());
    let config = match Config::load(&location) {
        Ok(config) => {
            super::report_warnings(&validation::validate(&config), log);
            config
        }
        Err(ConfigError::Unavailable { path, .. }) => {
            log.warn(&format!(
                "no configuration at {}; choose Init to create it",
                path.display()
            ));
            Config {
                repo: location.repo,
                file: location.file,
                ..Config::default()
            }
        }
        Err(e) => return Err(e.into()),
    };

    let store = TomlConfigStore;
    Session::new(config, &store, CrosstermTerminal::new(), log).run();
    Ok(())
}
