//! Platform records and the registry projections over them: display
//! order and the default-platform subset.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Config, ConfigStore};
use crate::catalog::Category;
use crate::error::{CatalogError, ConfigError};

/// A consumer target: a tool that expects modules under its own roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Display label.
    pub name: String,
    /// Project-scope root (relative to the working directory).
    #[serde(default)]
    pub project: String,
    /// Global-scope root (usually home-relative).
    #[serde(default)]
    pub global: String,
    /// Subdirectory holding skill links.
    #[serde(default)]
    pub skill_dir: String,
    /// Subdirectory holding agent links.
    #[serde(default)]
    pub agent_dir: String,
}

impl Platform {
    /// Subdirectory under a root where links of `category` live.
    ///
    /// Never empty: an unset directory falls back to `skills` / `agents`.
    #[must_use]
    pub fn category_dir(&self, category: Category) -> &str {
        let (configured, fallback) = match category {
            Category::Skill => (self.skill_dir.as_str(), "skills"),
            Category::Agent => (self.agent_dir.as_str(), "agents"),
        };
        if configured.trim().is_empty() {
            fallback
        } else {
            configured
        }
    }
}

/// Which platforms an operation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformSelection {
    /// Every configured platform.
    AllPlatforms,
    /// Only the listed keys (unknown keys are skipped on resolution).
    Subset(Vec<String>),
}

impl Config {
    /// Platform keys in display order.
    ///
    /// The persisted `platform_order` filtered to known keys comes first,
    /// followed by any keys it does not mention in natural (sorted) order.
    /// Stale keys are dropped.  Recomputed on every call.
    #[must_use]
    pub fn ordered_keys(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        let mut ordered: Vec<String> = self
            .platform_order
            .iter()
            .filter(|key| self.platforms.contains_key(*key) && seen.insert(key.as_str()))
            .cloned()
            .collect();
        ordered.extend(
            self.platforms
                .keys()
                .filter(|key| !seen.contains(key.as_str()))
                .cloned(),
        );
        ordered
    }

    /// `(key, platform)` pairs in display order.
    #[must_use]
    pub fn ordered_platforms(&self) -> Vec<(String, &Platform)> {
        self.ordered_keys()
            .into_iter()
            .filter_map(|key| self.platforms.get(&key).map(|p| (key, p)))
            .collect()
    }

    /// The selection policy implied by `default_platforms`.
    #[must_use]
    pub fn default_selection(&self) -> PlatformSelection {
        if self.default_platforms.is_empty() {
            PlatformSelection::AllPlatforms
        } else {
            PlatformSelection::Subset(self.default_platforms.clone())
        }
    }

    /// Resolve a selection to `(key, platform)` pairs.
    ///
    /// `AllPlatforms` yields display order; `Subset` yields the listed order
    /// with unknown and repeated keys skipped.
    #[must_use]
    pub fn resolve_selection(&self, selection: &PlatformSelection) -> Vec<(String, &Platform)> {
        match selection {
            PlatformSelection::AllPlatforms => self.ordered_platforms(),
            PlatformSelection::Subset(keys) => {
                let mut seen = BTreeSet::new();
                keys.iter()
                    .filter(|key| seen.insert(key.as_str()))
                    .filter_map(|key| self.platforms.get(key).map(|p| (key.clone(), p)))
                    .collect()
            }
        }
    }

    /// Platforms targeted by quick sync.
    #[must_use]
    pub fn default_targets(&self) -> Vec<(String, &Platform)> {
        self.resolve_selection(&self.default_selection())
    }

    /// Look up a platform by key.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::PlatformNotFound`] for an unknown key.
    pub fn platform(&self, key: &str) -> Result<&Platform, CatalogError> {
        self.platforms
            .get(key)
            .ok_or_else(|| CatalogError::PlatformNotFound(key.to_string()))
    }

    /// Replace the display order and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to save.
    pub fn set_order(
        &mut self,
        order: Vec<String>,
        store: &dyn ConfigStore,
    ) -> Result<(), ConfigError> {
        self.platform_order = order;
        store.save(self)
    }

    /// Replace the default-platform set and persist immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to save.
    pub fn set_defaults(
        &mut self,
        defaults: Vec<String>,
        store: &dyn ConfigStore,
    ) -> Result<(), ConfigError> {
        self.default_platforms = defaults;
        store.save(self)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::MockConfigStore;
    use crate::config::test_helpers::{config_with, platform};
    use std::path::Path;

    fn three_platforms() -> Config {
        let root = Path::new("/r");
        config_with(
            Path::new("/repo"),
            vec![
                ("amp", platform("Amp", root)),
                ("claude", platform("Claude", root)),
                ("cursor", platform("Cursor", root)),
            ],
        )
    }

    fn keys(pairs: &[(String, &Platform)]) -> Vec<String> {
        pairs.iter().map(|(k, _)| k.clone()).collect()
    }

    #[test]
    fn category_dir_falls_back_when_empty() {
        let p = Platform {
            name: "x".to_string(),
            ..Platform::default()
        };
        assert_eq!(p.category_dir(Category::Skill), "skills");
        assert_eq!(p.category_dir(Category::Agent), "agents");

        let custom = Platform {
            skill_dir: "prompts".to_string(),
            ..p
        };
        assert_eq!(custom.category_dir(Category::Skill), "prompts");
    }

    #[test]
    fn ordered_keys_without_persisted_order_is_sorted() {
        assert_eq!(three_platforms().ordered_keys(), ["amp", "claude", "cursor"]);
    }

    #[test]
    fn ordered_keys_keeps_persisted_order_and_appends_new() {
        let mut cfg = three_platforms();
        cfg.platform_order = vec!["cursor".to_string(), "amp".to_string()];
        assert_eq!(cfg.ordered_keys(), ["cursor", "amp", "claude"]);
    }

    #[test]
    fn ordered_keys_drops_stale_and_duplicate_keys() {
        let mut cfg = three_platforms();
        cfg.platform_order = vec![
            "gone".to_string(),
            "claude".to_string(),
            "claude".to_string(),
        ];
        let ordered = cfg.ordered_keys();
        assert_eq!(ordered, ["claude", "amp", "cursor"]);

        let mut sorted = ordered.clone();
        sorted.sort();
        let configured: Vec<String> = cfg.platforms.keys().cloned().collect();
        assert_eq!(sorted, configured, "must be a permutation of configured keys");
    }

    #[test]
    fn empty_defaults_target_every_platform() {
        let cfg = three_platforms();
        assert_eq!(cfg.default_selection(), PlatformSelection::AllPlatforms);
        assert_eq!(cfg.default_targets().len(), cfg.platforms.len());
    }

    #[test]
    fn defaults_subset_skips_unknown_keys() {
        let mut cfg = three_platforms();
        cfg.default_platforms = vec!["cursor".to_string(), "gone".to_string()];
        assert_eq!(keys(&cfg.default_targets()), ["cursor"]);
    }

    #[test]
    fn platform_lookup_reports_unknown_key() {
        let cfg = three_platforms();
        assert!(cfg.platform("amp").is_ok());
        assert_eq!(
            cfg.platform("zed").unwrap_err(),
            CatalogError::PlatformNotFound("zed".to_string())
        );
    }

    #[test]
    fn set_order_persists_immediately() {
        let mut cfg = three_platforms();
        let mut store = MockConfigStore::new();
        store
            .expect_save()
            .withf(|c: &Config| c.platform_order == ["claude", "amp", "cursor"])
            .times(1)
            .returning(|_| Ok(()));

        cfg.set_order(
            vec!["claude".to_string(), "amp".to_string(), "cursor".to_string()],
            &store,
        )
        .unwrap();

        assert_eq!(cfg.ordered_keys(), ["claude", "amp", "cursor"]);
    }

    #[test]
    fn set_defaults_persists_immediately() {
        let mut cfg = three_platforms();
        let mut store = MockConfigStore::new();
        store
            .expect_save()
            .withf(|c: &Config| c.default_platforms == ["amp"])
            .times(1)
            .returning(|_| Ok(()));

        cfg.set_defaults(vec!["amp".to_string()], &store).unwrap();

        assert_eq!(keys(&cfg.default_targets()), ["amp"]);
    }
}
