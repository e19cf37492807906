//! Platform configuration: discovery, loading, and persistence of
//! `platforms.toml`.
pub mod platforms;
pub mod toml_loader;
pub mod validation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::paths;

pub use platforms::{Platform, PlatformSelection};

/// File name of the configuration inside the repository root.
pub const CONFIG_FILE: &str = "platforms.toml";

/// Environment variable overriding the repository root.
pub const REPO_ENV: &str = "SKILLKIT_REPO";

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "SKILLKIT_CONFIG";

/// Configuration written by `sk init` when no `platforms.toml` exists yet.
pub const STARTER_CONFIG: &str = r#"default_platforms = []
platform_order = []

[platforms.claude]
name = "Claude Code"
project = ".claude"
global = "~/.claude"
skill_dir = "skills"
agent_dir = "agents"

[platforms.codex]
name = "Codex"
project = ".codex"
global = "~/.codex"
skill_dir = "skills"
agent_dir = "agents"

[platforms.cursor]
name = "Cursor"
project = ".cursor"
global = "~/.cursor"
skill_dir = "skills"
agent_dir = "agents"

[platforms.gemini]
name = "Gemini CLI"
project = ".gemini"
global = "~/.gemini"
skill_dir = "skills"
agent_dir = "agents"
"#;

/// Where the repository root and its configuration file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    /// Repository root containing `skill/` and `agent/`.
    pub repo: PathBuf,
    /// Path of the configuration file.
    pub file: PathBuf,
}

impl ConfigLocation {
    /// Resolve the location from CLI overrides, then environment variables,
    /// then the default `~/.config/agent`.
    #[must_use]
    pub fn discover(repo: Option<&Path>, file: Option<&Path>) -> Self {
        let repo = repo
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(REPO_ENV).map(PathBuf::from));
        let file = file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        Self::from_parts(repo, file)
    }

    /// Build a location from optional explicit parts, filling the gaps with
    /// defaults.
    #[must_use]
    pub fn from_parts(repo: Option<PathBuf>, file: Option<PathBuf>) -> Self {
        let repo = repo.map_or_else(
            || paths::resolve(&["~", ".config", "agent"]),
            |r| paths::resolve(&[r]),
        );
        let file = file.map_or_else(|| repo.join(CONFIG_FILE), |f| paths::resolve(&[f]));
        Self { repo, file }
    }
}

/// In-memory configuration aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Repository root; not persisted.
    #[serde(skip)]
    pub repo: PathBuf,

    /// File the configuration was loaded from and is saved back to.
    #[serde(skip)]
    pub file: PathBuf,

    /// Platforms targeted by quick sync; empty means every platform.
    #[serde(default)]
    pub default_platforms: Vec<String>,

    /// Persisted display order of platform keys.
    #[serde(default)]
    pub platform_order: Vec<String>,

    /// Configured platforms keyed by their stable short identifier.
    #[serde(default)]
    pub platforms: BTreeMap<String, Platform>,
}

impl Config {
    /// Load the configuration file named by `location`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Unavailable`] when the file cannot be read and
    /// [`ConfigError::InvalidSyntax`] when it cannot be parsed.
    pub fn load(location: &ConfigLocation) -> Result<Self, ConfigError> {
        let mut config: Self = toml_loader::load_config(&location.file)?;
        config.repo.clone_from(&location.repo);
        config.file.clone_from(&location.file);
        Ok(config)
    }

    /// Directory holding modules of the given category.
    #[must_use]
    pub fn category_root(&self, category: crate::catalog::Category) -> PathBuf {
        self.repo.join(category.as_str())
    }
}

/// Persistence seam for configuration mutations.
///
/// The navigation layer writes through this trait so that reorder and
/// default-set operations can be tested without touching disk.
#[cfg_attr(test, mockall::automock)]
pub trait ConfigStore {
    /// Persist `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Save`] if the configuration cannot be written.
    fn save(&self, config: &Config) -> Result<(), ConfigError>;
}

/// Saves the configuration as TOML to [`Config::file`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlConfigStore;

impl ConfigStore for TomlConfigStore {
    fn save(&self, config: &Config) -> Result<(), ConfigError> {
        toml_loader::save_config(&config.file, config)
    }
}
