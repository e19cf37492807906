//! Command: module tree with per-platform link state.
use anyhow::Result;
use crossterm::style::Stylize;

use crate::catalog::{self, Module};
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::Logger;
use crate::reconcile::{self, LinkStatus};

/// Lines describing where `module` is linked: one per platform carrying a
/// symlink, in display order.
#[must_use]
pub fn link_lines(config: &Config, module: &Module) -> Vec<String> {
    config
        .ordered_platforms()
        .into_iter()
        .filter_map(|(key, platform)| match reconcile::status(module, &key, platform) {
            LinkStatus::Healthy => Some(format!("{key} {}", "✓".green())),
            LinkStatus::Broken(_) => Some(format!("{key} {}", "✗ (broken)".red())),
            LinkStatus::Blocked | LinkStatus::Missing => None,
        })
        .collect()
}

/// Run the list command.
///
/// # Errors
///
/// Returns an error if configuration loading fails.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let modules = catalog::list_all(&setup.config);
    if modules.is_empty() {
        log.warn(&format!(
            "No modules found in {}",
            setup.location.repo.display()
        ));
        log.info("Run 'sk init' to initialize the repository.");
        return Ok(());
    }

    log.stage("Modules");
    for module in &modules {
        log.info(&format!(
            "{} {}",
            module.name.clone().white(),
            format!("({})", module.category).dark_grey()
        ));
        let lines = link_lines(&setup.config, module);
        if lines.is_empty() {
            log.info(&format!("{} {}", "└──".dark_grey(), "(not linked)".dark_grey()));
        }
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let branch = if i == last { "└──" } else { "├──" };
            log.info(&format!("{} {line}", branch.dark_grey()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::test_helpers::{config_with, platform};
    use crate::links;
    use std::fs;

    #[test]
    fn link_lines_follow_display_order_and_skip_unlinked() {
        let dir = tempfile::tempdir().unwrap();
        let repo = dir.path().join("repo");
        fs::create_dir_all(repo.join("skill").join("a")).unwrap();
        fs::create_dir_all(repo.join("skill").join("b")).unwrap();
        let roots: Vec<_> = ["p1", "p2", "p3"].iter().map(|k| dir.path().join(k)).collect();
        let mut config = config_with(
            &repo,
            vec![
                ("p1", platform("P1", &roots[0])),
                ("p2", platform("P2", &roots[1])),
                ("p3", platform("P3", &roots[2])),
            ],
        );
        config.platform_order = vec!["p3".to_string()];
        let module = catalog::find(&config, "a").unwrap();

        links::create(&module.path, &roots[0].join("skills/a")).unwrap();
        links::create(&repo.join("skill/b"), &roots[2].join("skills/a")).unwrap();

        let lines = link_lines(&config, &module);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("p3 ") && lines[0].contains("broken"));
        assert!(lines[1].starts_with("p1 ") && lines[1].contains('✓'));
    }
}
