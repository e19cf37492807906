//! Reconciliation between catalog modules and platform link targets.
//!
//! Computes where a module's link belongs on each platform, classifies the
//! observed state, and applies creations and removals one key at a time.
//! Batch operations never stop on the first error: every per-item outcome
//! is logged as it happens and recorded for the summary.
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::{Category, Module};
use crate::config::{Config, Platform};
use crate::error::LinkError;
use crate::links::{self, LinkState};
use crate::logging::{ItemStatus, Log};
use crate::paths;

/// Which platform root a link is placed under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Scope {
    /// `platform.global`; used by every reconciliation except explicit
    /// single-shot `use --project`.
    #[default]
    Global,
    /// `platform.project`, relative to the working directory.
    Project,
}

/// Health of a module's link on one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    /// A symlink pointing at the module's source directory.
    Healthy,
    /// A symlink pointing somewhere else.
    Broken(PathBuf),
    /// A real file or directory occupies the target.
    Blocked,
    /// Nothing at the target.
    Missing,
}

/// What applying a link would do, for dry-run previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewAction {
    /// No symlink exists yet.
    Create,
    /// A symlink exists and would be replaced.
    Update,
}

impl fmt::Display for PreviewAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
        })
    }
}

/// Directory under `platform` where links of `category` live.
#[must_use]
pub fn target_dir(platform: &Platform, category: Category, scope: Scope) -> PathBuf {
    let root = match scope {
        Scope::Global => platform.global.as_str(),
        Scope::Project => platform.project.as_str(),
    };
    paths::resolve(&[root, platform.category_dir(category)])
}

/// Absolute path of `module`'s link on the platform with key `key`.
#[must_use]
pub fn link_target(module: &Module, key: &str, platform: &Platform, scope: Scope) -> PathBuf {
    target_dir(platform, module.category, scope).join(module.link_name(key))
}

/// Classify the global link of `module` on one platform.
#[must_use]
pub fn status(module: &Module, key: &str, platform: &Platform) -> LinkStatus {
    match links::query(&link_target(module, key, platform, Scope::Global)) {
        LinkState::Symlink(dest) if paths::paths_equal(&dest, &module.path) => LinkStatus::Healthy,
        LinkState::Symlink(dest) => LinkStatus::Broken(dest),
        LinkState::Blocked => LinkStatus::Blocked,
        LinkState::Absent => LinkStatus::Missing,
    }
}

/// Whether applying at `target` would create a new link or replace one.
#[must_use]
pub fn preview_action(target: &Path) -> PreviewAction {
    if links::query(target).is_symlink() {
        PreviewAction::Update
    } else {
        PreviewAction::Create
    }
}

/// Create (or replace) `module`'s link on one platform.
///
/// # Errors
///
/// Returns the [`LinkError`] reported by [`links::create`].
pub fn apply_one(
    module: &Module,
    key: &str,
    platform: &Platform,
    scope: Scope,
) -> Result<PathBuf, LinkError> {
    let target = link_target(module, key, platform, scope);
    links::create(&module.path, &target)?;
    Ok(target)
}

/// Platform keys whose global target carries any symlink for `module`,
/// healthy or broken.
#[must_use]
pub fn linked_keys(config: &Config, module: &Module) -> BTreeSet<String> {
    config
        .ordered_platforms()
        .into_iter()
        .filter(|(key, platform)| {
            links::query(&link_target(module, key, platform, Scope::Global)).is_symlink()
        })
        .map(|(key, _)| key)
        .collect()
}

/// Changes needed to make a module's links match a desired platform set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diff {
    /// Desired keys without any symlink at the target.
    pub to_sync: Vec<String>,
    /// Keys carrying a symlink that are not desired.
    pub to_remove: Vec<String>,
}

impl Diff {
    /// Whether nothing needs to change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_sync.is_empty() && self.to_remove.is_empty()
    }
}

/// Compare the desired platform set with the live link state.
///
/// Both lists follow display order and are disjoint.  A broken symlink on a
/// desired key counts as present, so it is neither synced nor removed.
#[must_use]
pub fn compute_diff(config: &Config, module: &Module, desired: &BTreeSet<String>) -> Diff {
    let linked = linked_keys(config, module);
    let mut diff = Diff::default();
    for key in config.ordered_keys() {
        match (desired.contains(&key), linked.contains(&key)) {
            (true, false) => diff.to_sync.push(key),
            (false, true) => diff.to_remove.push(key),
            _ => {}
        }
    }
    diff
}

/// Which half of a [`Diff`] a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// A link was created.
    Sync,
    /// A link was removed.
    Remove,
}

/// Outcome of one key in [`apply_diff`].
#[derive(Debug)]
pub struct KeyResult {
    /// Platform key.
    pub key: String,
    /// What was attempted.
    pub change: Change,
    /// `Ok` on success, otherwise the refusal or failure.
    pub result: Result<(), LinkError>,
}

/// Apply a diff for one module, syncing first and then removing.
///
/// Each key is attempted independently and its outcome logged immediately.
/// Keys no longer present in `config` are skipped.
pub fn apply_diff(config: &Config, module: &Module, diff: &Diff, log: &dyn Log) -> Vec<KeyResult> {
    let syncs = diff.to_sync.iter().map(|key| (key, Change::Sync));
    let removes = diff.to_remove.iter().map(|key| (key, Change::Remove));

    syncs
        .chain(removes)
        .filter_map(|(key, change)| {
            let platform = config.platforms.get(key)?;
            let result = match change {
                Change::Sync => apply_one(module, key, platform, Scope::Global).map(|_| ()),
                Change::Remove => {
                    links::remove(&link_target(module, key, platform, Scope::Global))
                }
            };
            report(log, module, key, platform, change, result.as_ref().err());
            Some(KeyResult {
                key: key.clone(),
                change,
                result,
            })
        })
        .collect()
}

/// Success and failure counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchTally {
    /// Items applied successfully.
    pub success: usize,
    /// Items refused or failed.
    pub failed: usize,
}

/// Link every module onto every target, in enumeration order.
///
/// Never stops on the first error; the tally counts both outcomes.
pub fn sync_all(modules: &[Module], targets: &[(String, &Platform)], log: &dyn Log) -> BatchTally {
    let mut tally = BatchTally::default();
    for module in modules {
        for (key, platform) in targets {
            let result = apply_one(module, key, platform, Scope::Global);
            report(log, module, key, platform, Change::Sync, result.as_ref().err());
            if result.is_ok() {
                tally.success += 1;
            } else {
                tally.failed += 1;
            }
        }
    }
    tally
}

/// One row of a dry-run preview table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    /// Module link name.
    pub module: String,
    /// Platform key.
    pub platform: String,
    /// Absolute link path.
    pub target: PathBuf,
    /// What applying would do.
    pub action: PreviewAction,
}

/// Preview linking every module onto every target without mutating anything.
#[must_use]
pub fn preview(
    modules: &[Module],
    targets: &[(String, &Platform)],
    scope: Scope,
) -> Vec<PreviewRow> {
    modules
        .iter()
        .flat_map(|module| {
            targets.iter().map(move |(key, platform)| {
                let target = link_target(module, key, platform, scope);
                PreviewRow {
                    module: module.name.clone(),
                    platform: key.clone(),
                    action: preview_action(&target),
                    target,
                }
            })
        })
        .collect()
}

/// Log and record the outcome of one link mutation.
pub fn report(
    log: &dyn Log,
    module: &Module,
    key: &str,
    platform: &Platform,
    change: Change,
    error: Option<&LinkError>,
) {
    let item = format!("{} → {key}", module.name);
    match (change, error) {
        (_, Some(e)) => {
            log.error(&format!("{item}: {e}"));
            log.record_item(&item, ItemStatus::Failed, Some(&e.to_string()));
        }
        (Change::Sync, None) => {
            log.info(&format!("✓ {} → {}", module.name, platform.name));
            log.record_item(&item, ItemStatus::Ok, None);
        }
        (Change::Remove, None) => {
            log.info(&format!("✓ Removed {} from {}", module.name, platform.name));
            log.record_item(&item, ItemStatus::Ok, None);
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::config::test_helpers::{config_with, platform};
    use crate::logging::isolated_logger;
    use std::fs;

    /// A repo with `skill/foo` and three platforms `p1..p3` rooted in `tmp`.
    fn fixture() -> (tempfile::TempDir, Config, Module) {
        let tmp = tempfile::tempdir().unwrap();
        let repo = tmp.path().join("repo");
        fs::create_dir_all(repo.join("skill/foo")).unwrap();
        let cfg = config_with(
            &repo,
            vec![
                ("p1", platform("P1", &tmp.path().join("p1"))),
                ("p2", platform("P2", &tmp.path().join("p2"))),
                ("p3", platform("P3", &tmp.path().join("p3"))),
            ],
        );
        let module = catalog::find(&cfg, "foo").unwrap();
        (tmp, cfg, module)
    }

    fn keys(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn link_target_uses_category_dir_and_alias() {
        let (tmp, cfg, mut module) = fixture();
        module.aliases.insert("p2".to_string(), "renamed".to_string());

        assert_eq!(
            link_target(&module, "p1", &cfg.platforms["p1"], Scope::Global),
            tmp.path().join("p1/skills/foo")
        );
        assert_eq!(
            link_target(&module, "p2", &cfg.platforms["p2"], Scope::Global),
            tmp.path().join("p2/skills/renamed")
        );
    }

    #[test]
    fn project_scope_uses_project_root() {
        let (tmp, mut cfg, module) = fixture();
        let p1 = cfg.platforms.get_mut("p1").unwrap();
        p1.project = tmp.path().join("proj").to_string_lossy().into_owned();

        assert_eq!(
            link_target(&module, "p1", &cfg.platforms["p1"], Scope::Project),
            tmp.path().join("proj/skills/foo")
        );
    }

    #[test]
    fn create_then_status_is_healthy() {
        let (_tmp, cfg, module) = fixture();
        let p1 = &cfg.platforms["p1"];
        assert_eq!(status(&module, "p1", p1), LinkStatus::Missing);

        apply_one(&module, "p1", p1, Scope::Global).unwrap();

        assert_eq!(status(&module, "p1", p1), LinkStatus::Healthy);
    }

    #[cfg(unix)]
    #[test]
    fn repointed_link_is_broken_with_actual_destination() {
        let (tmp, cfg, module) = fixture();
        let p1 = &cfg.platforms["p1"];
        let target = apply_one(&module, "p1", p1, Scope::Global).unwrap();
        let elsewhere = tmp.path().join("elsewhere");
        fs::create_dir(&elsewhere).unwrap();
        fs::remove_file(&target).unwrap();
        std::os::unix::fs::symlink(&elsewhere, &target).unwrap();

        assert_eq!(status(&module, "p1", p1), LinkStatus::Broken(elsewhere));
    }

    #[test]
    fn real_directory_blocks_and_survives() {
        let (_tmp, cfg, module) = fixture();
        let p1 = &cfg.platforms["p1"];
        let target = link_target(&module, "p1", p1, Scope::Global);
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("mine.txt"), "keep").unwrap();

        let err = apply_one(&module, "p1", p1, Scope::Global).unwrap_err();

        assert!(matches!(err, LinkError::BlockedByDirectory(_)));
        assert_eq!(status(&module, "p1", p1), LinkStatus::Blocked);
        assert_eq!(fs::read_to_string(target.join("mine.txt")).unwrap(), "keep");
    }

    #[test]
    fn preview_action_reflects_existing_link() {
        let (_tmp, cfg, module) = fixture();
        let p1 = &cfg.platforms["p1"];
        let target = link_target(&module, "p1", p1, Scope::Global);
        assert_eq!(preview_action(&target), PreviewAction::Create);

        apply_one(&module, "p1", p1, Scope::Global).unwrap();

        assert_eq!(preview_action(&target), PreviewAction::Update);
        assert_eq!(PreviewAction::Update.to_string(), "UPDATE");
    }

    #[test]
    fn turning_one_platform_off_removes_only_that_link() {
        let (_tmp, cfg, module) = fixture();
        for key in ["p1", "p2", "p3"] {
            apply_one(&module, key, &cfg.platforms[key], Scope::Global).unwrap();
        }

        let diff = compute_diff(&cfg, &module, &keys(&["p1", "p3"]));

        assert_eq!(
            diff,
            Diff {
                to_sync: vec![],
                to_remove: vec!["p2".to_string()],
            }
        );
    }

    #[test]
    fn diff_is_disjoint_and_reaches_fixed_point() {
        let (_tmp, cfg, module) = fixture();
        apply_one(&module, "p2", &cfg.platforms["p2"], Scope::Global).unwrap();
        let desired = keys(&["p1", "p3"]);

        let diff = compute_diff(&cfg, &module, &desired);
        assert_eq!(diff.to_sync, ["p1", "p3"]);
        assert_eq!(diff.to_remove, ["p2"]);
        assert!(diff.to_sync.iter().all(|k| !diff.to_remove.contains(k)));

        let (log, _log_tmp, _guard) = isolated_logger();
        let results = apply_diff(&cfg, &module, &diff, &log);
        assert!(results.iter().all(|r| r.result.is_ok()));
        assert_eq!(results.len(), 3);

        assert!(compute_diff(&cfg, &module, &desired).is_empty());
        assert_eq!(linked_keys(&cfg, &module), desired);
    }

    #[cfg(unix)]
    #[test]
    fn broken_link_on_undesired_key_is_removed() {
        let (tmp, cfg, module) = fixture();
        apply_one(&module, "p1", &cfg.platforms["p1"], Scope::Global).unwrap();
        let dangling = link_target(&module, "p2", &cfg.platforms["p2"], Scope::Global);
        fs::create_dir_all(dangling.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), &dangling).unwrap();
        let desired = keys(&["p1"]);

        let diff = compute_diff(&cfg, &module, &desired);
        assert!(diff.to_sync.is_empty());
        assert_eq!(diff.to_remove, ["p2"]);

        let (log, _log_tmp, _guard) = isolated_logger();
        let results = apply_diff(&cfg, &module, &diff, &log);
        assert!(results.iter().all(|r| r.result.is_ok()));
        assert!(!dangling.is_symlink());
        assert!(compute_diff(&cfg, &module, &desired).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn broken_link_on_desired_key_is_left_alone() {
        let (tmp, cfg, module) = fixture();
        let dangling = link_target(&module, "p2", &cfg.platforms["p2"], Scope::Global);
        fs::create_dir_all(dangling.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), &dangling).unwrap();

        let diff = compute_diff(&cfg, &module, &keys(&["p2"]));

        assert!(diff.is_empty());
        assert_eq!(
            status(&module, "p2", &cfg.platforms["p2"]),
            LinkStatus::Broken(tmp.path().join("gone"))
        );
    }

    #[test]
    fn apply_diff_continues_past_failures() {
        let (_tmp, cfg, module) = fixture();
        let blocked = link_target(&module, "p1", &cfg.platforms["p1"], Scope::Global);
        fs::create_dir_all(&blocked).unwrap();
        let diff = Diff {
            to_sync: vec!["p1".to_string(), "p2".to_string()],
            to_remove: vec![],
        };

        let (log, _log_tmp, _guard) = isolated_logger();
        let results = apply_diff(&cfg, &module, &diff, &log);

        assert!(results[0].result.is_err());
        assert!(results[1].result.is_ok());
        assert_eq!(log.failure_count(), 1);
        assert_eq!(log.item_entries().len(), 2);
    }

    #[test]
    fn sync_all_tallies_every_pair() {
        let (tmp, cfg, foo) = fixture();
        fs::create_dir_all(cfg.repo.join("agent/bar")).unwrap();
        let bar = catalog::find(&cfg, "bar").unwrap();
        fs::create_dir_all(tmp.path().join("p3/skills/foo")).unwrap();

        let (log, _log_tmp, _guard) = isolated_logger();
        let tally = sync_all(&[foo.clone(), bar.clone()], &cfg.ordered_platforms(), &log);

        assert_eq!(tally, BatchTally { success: 5, failed: 1 });
        assert_eq!(status(&bar, "p3", &cfg.platforms["p3"]), LinkStatus::Healthy);
        assert_eq!(status(&foo, "p3", &cfg.platforms["p3"]), LinkStatus::Blocked);
    }

    #[test]
    fn preview_does_not_mutate() {
        let (_tmp, cfg, module) = fixture();
        let rows = preview(
            std::slice::from_ref(&module),
            &cfg.ordered_platforms(),
            Scope::Global,
        );

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.action == PreviewAction::Create));
        assert!(rows.iter().all(|r| !r.target.exists()));
        assert_eq!(rows[0].platform, "p1");
    }
}
