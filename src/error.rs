//! Domain-specific error types for skillkit.
//!
//! Library layers return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! SkillkitError
//! ├── Link(LinkError)       : symlink creation and removal at a target path
//! ├── Catalog(CatalogError) : module and platform lookups by user-supplied name
//! └── Config(ConfigError)   : loading and saving platforms.toml
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for skillkit.
#[derive(Error, Debug)]
pub enum SkillkitError {
    /// A link mutation was refused or failed.
    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    /// A module or platform lookup failed.
    #[error("Lookup error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised by the link store.
///
/// The blocked and not-a-symlink variants protect user data: they are always
/// reported and never resolved automatically.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The link source does not exist.
    #[error("source not found: {}", .0.display())]
    SourceMissing(PathBuf),

    /// A real file occupies the target path.
    #[error("target is a real file (not symlink): {}", .0.display())]
    BlockedByFile(PathBuf),

    /// A real directory occupies the target path.
    #[error("target is a real directory (not symlink): {}", .0.display())]
    BlockedByDirectory(PathBuf),

    /// Removal was attempted against something that is not a symlink.
    #[error("target is not a symlink: {}", .0.display())]
    NotASymlink(PathBuf),

    /// An underlying filesystem call failed.
    #[error("{op} failed for {}: {source}", .path.display())]
    Io {
        /// Short name of the attempted operation (e.g. `"create parent"`).
        op: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl LinkError {
    pub(crate) fn io(op: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Errors from resolving user-supplied names.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// No `skill/<name>` or `agent/<name>` directory exists.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// The platform key is not configured.
    #[error("unknown platform: {0}")]
    PlatformNotFound(String),
}

/// Errors from loading or persisting `platforms.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file could be found or read.
    #[error("config file not available: {}: {source}", .path.display())]
    Unavailable {
        /// Path that was tried.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("invalid config {}: {message}", .path.display())]
    InvalidSyntax {
        /// Path of the offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Writing the configuration back failed.
    #[error("failed to save config {}: {message}", .path.display())]
    Save {
        /// Destination path.
        path: PathBuf,
        /// Serializer or I/O message.
        message: String,
    },
}
