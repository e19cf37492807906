// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed skill repository and a fluent
// builder so each integration test can set up an isolated repository and
// platform roots without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use skillkit::cli::GlobalOpts;
use skillkit::config::{CONFIG_FILE, Config, ConfigLocation};

/// An isolated repository plus one platform root per configured key, all
/// inside a [`tempfile::TempDir`].
pub struct TestRepo {
    /// Temporary directory holding `repo/` and `home/<key>/`.
    pub root: tempfile::TempDir,
}

impl TestRepo {
    /// Repository root containing `skill/`, `agent/` and `platforms.toml`.
    pub fn repo(&self) -> PathBuf {
        self.root.path().join("repo")
    }

    /// Global root of platform `key`.
    pub fn platform_root(&self, key: &str) -> PathBuf {
        self.root.path().join("home").join(key)
    }

    /// Where the link for skill `name` lands on platform `key`.
    pub fn skill_link(&self, key: &str, name: &str) -> PathBuf {
        self.platform_root(key).join("skills").join(name)
    }

    /// Where the link for agent `name` lands on platform `key`.
    pub fn agent_link(&self, key: &str, name: &str) -> PathBuf {
        self.platform_root(key).join("agents").join(name)
    }

    /// Source directory of skill `name`.
    pub fn skill_dir(&self, name: &str) -> PathBuf {
        self.repo().join("skill").join(name)
    }

    /// Location pointing at this repository.
    pub fn location(&self) -> ConfigLocation {
        ConfigLocation::from_parts(Some(self.repo()), None)
    }

    /// Global options as the CLI would pass them with `--repo`.
    pub fn global_opts(&self) -> GlobalOpts {
        GlobalOpts {
            repo: Some(self.repo()),
            config: None,
        }
    }

    /// Load the repository's configuration.
    pub fn config(&self) -> Config {
        Config::load(&self.location()).expect("load config")
    }
}

/// Whether `path` is a symlink pointing at `dest`.
pub fn links_to(path: &Path, dest: &Path) -> bool {
    std::fs::read_link(path).is_ok_and(|actual| actual == dest)
}

/// Fluent builder for [`TestRepo`].
pub struct TestRepoBuilder {
    platforms: Vec<String>,
    defaults: Vec<String>,
    skills: Vec<(String, String)>,
    agents: Vec<(String, String)>,
    manifests: Vec<(String, String)>,
}

impl TestRepoBuilder {
    /// Begin with no platforms and no modules.
    pub fn new() -> Self {
        Self {
            platforms: Vec::new(),
            defaults: Vec::new(),
            skills: Vec::new(),
            agents: Vec::new(),
            manifests: Vec::new(),
        }
    }

    /// Register a platform rooted at `home/<key>`.
    pub fn with_platform(mut self, key: &str) -> Self {
        self.platforms.push(key.to_string());
        self
    }

    /// Persist `keys` as `default_platforms`.
    pub fn with_defaults(mut self, keys: &[&str]) -> Self {
        self.defaults = keys.iter().map(ToString::to_string).collect();
        self
    }

    /// Add `skill/<name>/SKILL.md` with a front-matter description.
    pub fn with_skill(mut self, name: &str, description: &str) -> Self {
        self.skills.push((name.to_string(), description.to_string()));
        self
    }

    /// Add `agent/<name>/AGENT.md` with a front-matter description.
    pub fn with_agent(mut self, name: &str, description: &str) -> Self {
        self.agents.push((name.to_string(), description.to_string()));
        self
    }

    /// Write `skill/<name>/skillkit.toml`.
    pub fn with_skill_manifest(mut self, name: &str, content: &str) -> Self {
        self.manifests.push((name.to_string(), content.to_string()));
        self
    }

    /// Write everything to disk.
    pub fn build(self) -> TestRepo {
        let repo = TestRepo {
            root: tempfile::tempdir().expect("create temp dir"),
        };
        let root = repo.repo();

        for (category, descriptor, modules) in [
            ("skill", "SKILL.md", &self.skills),
            ("agent", "AGENT.md", &self.agents),
        ] {
            std::fs::create_dir_all(root.join(category)).expect("create category dir");
            for (name, description) in modules {
                let dir = root.join(category).join(name);
                std::fs::create_dir_all(&dir).expect("create module dir");
                std::fs::write(
                    dir.join(descriptor),
                    format!("---\nname: {name}\ndescription: \"{description}\"\n---\n\n# {name}\n"),
                )
                .expect("write descriptor");
            }
        }
        for (name, content) in &self.manifests {
            std::fs::write(root.join("skill").join(name).join("skillkit.toml"), content)
                .expect("write manifest");
        }

        let quoted = |keys: &[String]| {
            keys.iter()
                .map(|k| format!("\"{k}\""))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut toml = format!(
            "default_platforms = [{}]\nplatform_order = []\n",
            quoted(&self.defaults)
        );
        for key in &self.platforms {
            let global = repo.platform_root(key);
            write!(
                toml,
                "\n[platforms.{key}]\nname = \"{}\"\nproject = \".{key}\"\nglobal = '{}'\n\
                 skill_dir = \"skills\"\nagent_dir = \"agents\"\n",
                key.to_uppercase(),
                global.display()
            )
            .expect("format platform");
        }
        std::fs::write(root.join(CONFIG_FILE), toml).expect("write platforms.toml");

        repo
    }
}
