//! Skill and agent distribution manager.
//!
//! Keeps a single repository of AI tool modules (`skill/<name>/`,
//! `agent/<name>/`) and fans them out to every configured platform as
//! symbolic links, driven by `platforms.toml`.
//!
//! The public API is organised into layers:
//!
//! - **[`links`]**: safety-checked symlink primitives
//! - **[`catalog`]**: module discovery and metadata
//! - **[`config`]**: platform registry, display order and default set
//! - **[`reconcile`]**: link status, diffs and batch application
//! - **[`navigation`]**: the interactive menu session
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod links;
pub mod logging;
pub mod navigation;
pub mod paths;
pub mod reconcile;

/// Version string: `git describe` output baked in at build time, or the
/// package version.
pub const VERSION: &str = match option_env!("SKILLKIT_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
