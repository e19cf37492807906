//! Module catalog: resolves module names to records and enumerates the
//! repository.
//!
//! A module is a directory under `<repo>/skill/` or `<repo>/agent/`.  Its
//! optional `skillkit.toml` may override the link name, globally or per
//! platform, and its `SKILL.md` / `AGENT.md` supplies a one-line description.
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, toml_loader};
use crate::error::CatalogError;
use crate::paths;

/// Per-module manifest file name.
pub const MODULE_MANIFEST: &str = "skillkit.toml";

/// Which top-level repository directory a module lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `<repo>/skill/<name>`
    Skill,
    /// `<repo>/agent/<name>`
    Agent,
}

impl Category {
    /// Lookup order for [`find`]: skills shadow agents of the same name.
    pub const ALL: [Self; 2] = [Self::Skill, Self::Agent];

    /// Repository subdirectory name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skill => "skill",
            Self::Agent => "agent",
        }
    }

    /// Descriptor document read for the module description.
    #[must_use]
    pub const fn descriptor_file(self) -> &'static str {
        match self {
            Self::Skill => "SKILL.md",
            Self::Agent => "AGENT.md",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reusable content unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Link name; the directory name unless `link.default` overrides it.
    pub name: String,
    /// Category fixed by the containing directory.
    pub category: Category,
    /// Absolute canonical source directory.
    pub path: PathBuf,
    /// Platform key to link name overrides.
    pub aliases: BTreeMap<String, String>,
    /// First descriptive line of the descriptor document, or empty.
    pub description: String,
}

impl Module {
    /// Link name used on the platform with key `key`.
    #[must_use]
    pub fn link_name(&self, key: &str) -> &str {
        self.aliases.get(key).map_or(self.name.as_str(), String::as_str)
    }

    /// The same module linked as `name` on every platform, ignoring any
    /// per-platform aliases.
    #[must_use]
    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self.aliases.clear();
        self
    }
}

/// Shape of `skillkit.toml`.
#[derive(Debug, Default, Deserialize)]
struct ModuleManifest {
    #[serde(default)]
    link: LinkSection,
}

#[derive(Debug, Default, Deserialize)]
struct LinkSection {
    #[serde(default)]
    default: String,
    #[serde(default)]
    overrides: BTreeMap<String, String>,
}

/// Resolve `name` to a module, trying `skill/` before `agent/`.
///
/// # Errors
///
/// Returns [`CatalogError::ModuleNotFound`] when neither directory exists.
pub fn find(config: &Config, name: &str) -> Result<Module, CatalogError> {
    let mut found = None;
    for category in Category::ALL {
        let dir = config.category_root(category).join(name);
        if !dir.is_dir() {
            continue;
        }
        if found.is_some() {
            tracing::debug!("{category} '{name}' is shadowed by the skill of the same name");
        } else {
            found = Some(load(name, category, &dir));
        }
    }
    found.ok_or_else(|| CatalogError::ModuleNotFound(name.to_string()))
}

/// Every module in the repository: all skills, then all agents, each group
/// sorted by directory name.
///
/// A missing category directory contributes nothing.
#[must_use]
pub fn list_all(config: &Config) -> Vec<Module> {
    let mut modules = Vec::new();
    for category in Category::ALL {
        let root = config.category_root(category);
        let Ok(entries) = fs::read_dir(&root) else {
            tracing::debug!("no {category} directory at {}", root.display());
            continue;
        };
        let mut dirs: Vec<(String, PathBuf)> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
            .collect();
        dirs.sort_by(|a, b| a.0.cmp(&b.0));
        modules.extend(dirs.iter().map(|(name, dir)| load(name, category, dir)));
    }
    modules
}

fn load(dir_name: &str, category: Category, dir: &Path) -> Module {
    let manifest: ModuleManifest =
        toml_loader::load_optional(&dir.join(MODULE_MANIFEST)).unwrap_or_default();

    let name = if manifest.link.default.is_empty() {
        dir_name.to_string()
    } else {
        manifest.link.default
    };

    let description = fs::read_to_string(dir.join(category.descriptor_file()))
        .map(|content| extract_description(&content))
        .unwrap_or_default();

    Module {
        name,
        category,
        path: paths::resolve(&[dir]),
        aliases: manifest.link.overrides,
        description,
    }
}

/// Pull a one-line description out of a descriptor document.
///
/// A `description:` field inside a `---` front-matter block wins (quotes
/// stripped); otherwise the first line that is neither blank, a heading,
/// nor a `---` delimiter.
fn extract_description(content: &str) -> String {
    let mut in_front_matter = false;
    for line in content.lines() {
        if line == "---" {
            in_front_matter = !in_front_matter;
            continue;
        }
        if in_front_matter && let Some(value) = line.strip_prefix("description:") {
            return trim_quotes(value).to_string();
        }
    }

    content
        .lines()
        .find(|line| !line.is_empty() && !line.starts_with('#') && *line != "---")
        .unwrap_or_default()
        .to_string()
}

fn trim_quotes(value: &str) -> &str {
    let value = value.trim_matches([' ', '\t']);
    ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q)?.strip_suffix(*q))
        .unwrap_or(value)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::config_with;

    fn repo_with(modules: &[(&str, &str)]) -> (tempfile::TempDir, Config) {
        let tmp = tempfile::tempdir().unwrap();
        for (category, name) in modules {
            fs::create_dir_all(tmp.path().join(category).join(name)).unwrap();
        }
        let cfg = config_with(tmp.path(), vec![]);
        (tmp, cfg)
    }

    #[test]
    fn find_prefers_skill_over_agent() {
        let (_tmp, cfg) = repo_with(&[("skill", "dup"), ("agent", "dup")]);
        let module = find(&cfg, "dup").unwrap();
        assert_eq!(module.category, Category::Skill);
    }

    #[test]
    fn find_falls_back_to_agent() {
        let (tmp, cfg) = repo_with(&[("agent", "reviewer")]);
        let module = find(&cfg, "reviewer").unwrap();
        assert_eq!(module.category, Category::Agent);
        assert_eq!(module.path, tmp.path().join("agent/reviewer"));
    }

    #[test]
    fn find_unknown_module_fails() {
        let (_tmp, cfg) = repo_with(&[]);
        assert_eq!(
            find(&cfg, "nope").unwrap_err(),
            CatalogError::ModuleNotFound("nope".to_string())
        );
    }

    #[test]
    fn find_ignores_plain_files() {
        let (tmp, cfg) = repo_with(&[]);
        fs::create_dir_all(tmp.path().join("skill")).unwrap();
        fs::write(tmp.path().join("skill/notes"), "x").unwrap();
        assert!(find(&cfg, "notes").is_err());
    }

    #[test]
    fn list_all_orders_skills_then_agents_by_name() {
        let (_tmp, cfg) = repo_with(&[
            ("agent", "b-agent"),
            ("skill", "zeta"),
            ("agent", "a-agent"),
            ("skill", "alpha"),
        ]);
        let names: Vec<String> = list_all(&cfg).into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["alpha", "zeta", "a-agent", "b-agent"]);
    }

    #[test]
    fn list_all_on_empty_repo_is_empty() {
        let (_tmp, cfg) = repo_with(&[]);
        assert!(list_all(&cfg).is_empty());
    }

    #[test]
    fn manifest_overrides_name_and_aliases() {
        let (tmp, cfg) = repo_with(&[("skill", "code-review")]);
        fs::write(
            tmp.path().join("skill/code-review").join(MODULE_MANIFEST),
            "[link]\ndefault = \"review\"\n\n[link.overrides]\ncursor = \"cr\"\n",
        )
        .unwrap();

        let module = find(&cfg, "code-review").unwrap();

        assert_eq!(module.name, "review");
        assert_eq!(module.link_name("cursor"), "cr");
        assert_eq!(module.link_name("claude"), "review");
    }

    #[test]
    fn renamed_overrides_every_alias() {
        let (tmp, cfg) = repo_with(&[("skill", "foo")]);
        fs::write(
            tmp.path().join("skill/foo").join(MODULE_MANIFEST),
            "[link.overrides]\ncursor = \"f\"\n",
        )
        .unwrap();

        let module = find(&cfg, "foo").unwrap().renamed("bar");

        assert_eq!(module.link_name("cursor"), "bar");
        assert_eq!(module.link_name("claude"), "bar");
    }

    #[test]
    fn malformed_manifest_is_ignored() {
        let (tmp, cfg) = repo_with(&[("skill", "foo")]);
        fs::write(
            tmp.path().join("skill/foo").join(MODULE_MANIFEST),
            "[link\ndefault =",
        )
        .unwrap();

        let module = find(&cfg, "foo").unwrap();

        assert_eq!(module.name, "foo");
        assert!(module.aliases.is_empty());
    }

    #[test]
    fn description_from_front_matter() {
        let doc = "---\nname: foo\ndescription: \"Reviews pull requests\"\n---\n# Foo\n\nBody\n";
        assert_eq!(extract_description(doc), "Reviews pull requests");
    }

    #[test]
    fn description_single_quotes_are_stripped() {
        let doc = "---\ndescription: 'Quoted'\n---\n";
        assert_eq!(extract_description(doc), "Quoted");
    }

    #[test]
    fn description_falls_back_to_first_body_line() {
        let doc = "# Title\n\nFirst real line.\nSecond line.\n";
        assert_eq!(extract_description(doc), "First real line.");
    }

    #[test]
    fn description_skips_front_matter_delimiters_in_fallback() {
        let doc = "---\n---\n# Title\nBody\n";
        assert_eq!(extract_description(doc), "Body");
    }

    #[test]
    fn description_read_from_category_document() {
        let (tmp, cfg) = repo_with(&[("agent", "helper")]);
        fs::write(tmp.path().join("agent/helper/AGENT.md"), "# Helper\nAssists.\n").unwrap();
        fs::write(tmp.path().join("agent/helper/SKILL.md"), "Wrong file.\n").unwrap();

        assert_eq!(find(&cfg, "helper").unwrap().description, "Assists.");
    }

    #[test]
    fn missing_document_means_empty_description() {
        let (_tmp, cfg) = repo_with(&[("skill", "bare")]);
        assert_eq!(find(&cfg, "bare").unwrap().description, "");
    }
}
