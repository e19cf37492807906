//! Non-fatal checks over a loaded `platforms.toml`.
use std::collections::BTreeSet;

use super::{CONFIG_FILE, Config};

/// A validation warning detected during configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The configuration source (e.g., "platforms.toml").
    pub source: String,
    /// The specific key or list that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Build a warning from its source file, offending item and message.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Check a loaded configuration for entries that will be ignored or
/// cannot produce working links.
///
/// None of these are fatal: stale keys are skipped by the registry
/// projections and the remaining platforms keep working.
#[must_use]
pub fn validate(config: &Config) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if config.platforms.is_empty() {
        warnings.push(ValidationWarning::new(
            CONFIG_FILE,
            "platforms",
            "no platforms configured",
        ));
    }

    check_key_list(config, "platform_order", &config.platform_order, &mut warnings);
    check_key_list(
        config,
        "default_platforms",
        &config.default_platforms,
        &mut warnings,
    );

    for (key, platform) in &config.platforms {
        if platform.name.trim().is_empty() {
            warnings.push(ValidationWarning::new(
                CONFIG_FILE,
                format!("platforms.{key}"),
                "platform has no display name",
            ));
        }
        if platform.global.trim().is_empty() {
            warnings.push(ValidationWarning::new(
                CONFIG_FILE,
                format!("platforms.{key}"),
                "global root is empty; global links would land in the working directory",
            ));
        }
    }

    warnings
}

/// Warn about unknown and repeated keys in a persisted key list.
fn check_key_list(
    config: &Config,
    list: &str,
    keys: &[String],
    warnings: &mut Vec<ValidationWarning>,
) {
    let mut seen = BTreeSet::new();
    for key in keys {
        if !config.platforms.contains_key(key) {
            warnings.push(ValidationWarning::new(
                CONFIG_FILE,
                list,
                format!("unknown platform '{key}' will be ignored"),
            ));
        } else if !seen.insert(key.as_str()) {
            warnings.push(ValidationWarning::new(
                CONFIG_FILE,
                list,
                format!("platform '{key}' is listed more than once"),
            ));
        }
    }
}
