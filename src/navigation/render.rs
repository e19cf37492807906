//! Frame rendering for the interactive menus.
//!
//! Every function returns the full frame as lines; the session hands them to
//! [`Terminal::draw`](super::terminal::Terminal::draw).  Link state is
//! queried live on each frame.
use clap::CommandFactory;
use crossterm::style::Stylize;

use super::menus::{
    DefaultsState, DetailState, ListView, ListViewState, MainEntry, MainMenuState,
    ModuleListState, ToggleRow,
};
use crate::catalog::Module;
use crate::cli::Cli;
use crate::config::Config;
use crate::reconcile::{self, Scope};

const ARROW: &str = "▸";
const TAGLINE: &str = "Cross-Platform AI Skill Distribution Hub";
const DESC_INDENT: &str = "        ";

fn hint(text: &str) -> String {
    format!("  {}", text.dark_grey())
}

fn banner() -> Vec<String> {
    vec![
        String::new(),
        format!("  {}  {}", "skillkit".cyan().bold(), TAGLINE.dark_grey()),
        String::new(),
    ]
}

/// Main menu frame.
#[must_use]
pub fn main_menu(state: MainMenuState) -> Vec<String> {
    let mut lines = banner();
    for (i, entry) in MainEntry::ALL.iter().enumerate() {
        let label = format!("{}. {:<12}", i + 1, entry.label());
        if i == state.cursor {
            lines.push(format!("  {} {} {}", ARROW.cyan(), label.cyan(), entry.description()));
        } else {
            lines.push(format!("    {label} {}", entry.description()));
        }
    }
    lines.push(String::new());
    lines.push(hint("↑↓ Navigate  |  →/Enter Select  |  1-5 Jump  |  H Help  |  Q Quit"));
    lines
}

/// Help frame: the command-line reference followed by the menu keys.
#[must_use]
pub fn help() -> Vec<String> {
    let mut lines = banner();
    let usage = Cli::command().render_help().to_string();
    lines.extend(usage.lines().map(|l| format!("  {l}")));
    lines.push(String::new());
    lines.push(format!("  {}", "Interactive keys".blue()));
    for (keys, action) in [
        ("↑↓ / j k", "Move the cursor"),
        ("→ / Enter", "Open or apply"),
        ("←", "Back (commits the detail page)"),
        ("A", "Toggle select-all in the module list"),
        ("Space", "Toggle a platform"),
        ("Tab", "Switch list view"),
        ("Shift+↑↓ / J K", "Reorder platforms"),
        ("Q", "Quit"),
    ] {
        lines.push(format!("    {} {action}", format!("{keys:<16}").green()));
    }
    lines.push(String::new());
    lines
}

/// Split `desc` into lines no wider than two thirds of `width` (at least
/// 40 columns).  Non-ASCII characters count as two columns.
#[must_use]
pub fn wrap_description(desc: &str, width: usize) -> Vec<String> {
    let max = (width * 2 / 3).max(40);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;
    for c in desc.chars() {
        let w = if c.is_ascii() { 1 } else { 2 };
        if used + w > max && used > 0 {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(c);
        used += w;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn names_or(names: &[String], empty: &str) -> String {
    if names.is_empty() {
        empty.dark_grey().to_string()
    } else {
        names.join(", ")
    }
}

/// Module list frame: default targets, the highlighted module's linked
/// platforms and description, then the module rows.
#[must_use]
pub fn module_list(config: &Config, state: ModuleListState<'_>, width: usize) -> Vec<String> {
    let mut lines = vec![String::new()];
    let title = format!("  {} Select Module", ARROW.blue());
    if state.select_all {
        lines.push(format!("{title} {}", "[ALL]".magenta()));
    } else {
        lines.push(title);
    }

    let defaults: Vec<String> = if config.default_platforms.is_empty() {
        Vec::new()
    } else {
        config
            .default_targets()
            .into_iter()
            .map(|(_, p)| p.name.clone())
            .collect()
    };
    lines.push(format!(
        "  {} {}",
        "Default:".dark_grey(),
        names_or(&defaults, "(all platforms)").yellow()
    ));

    if let Some(current) = state.current() {
        let linked = reconcile::linked_keys(config, current);
        let synced: Vec<String> = config
            .ordered_platforms()
            .into_iter()
            .filter(|(key, _)| linked.contains(key))
            .map(|(_, p)| p.name.clone())
            .collect();
        lines.push(format!(
            "  {} {}",
            "Synced:".dark_grey(),
            names_or(&synced, "(none)").cyan()
        ));

        for (i, part) in wrap_description(&current.description, width).into_iter().enumerate() {
            if i == 0 {
                lines.push(format!("  {} {part}", "Desc:".dark_grey()));
            } else {
                lines.push(format!("{DESC_INDENT}{part}"));
            }
        }
    }
    lines.push(String::new());

    for (i, module) in state.modules.iter().enumerate() {
        let mark = if state.select_all {
            "✓ ".green().to_string()
        } else {
            "  ".to_string()
        };
        let category = format!("({})", module.category).dark_grey();
        if i == state.cursor {
            lines.push(format!(
                "{mark}{} {} {category}",
                ARROW.cyan(),
                module.name.clone().white()
            ));
        } else {
            lines.push(format!("{mark}  {} {category}", module.name));
        }
    }
    lines.push(String::new());
    lines.push(hint(
        "↑↓ Navigate  |  Enter Sync to Default  |  A Select All  |  → Details  |  ← Back",
    ));
    lines
}

fn toggle_line(row: &ToggleRow, highlighted: bool, status: &str) -> String {
    let checkbox = if row.selected {
        "[✓]".green().to_string()
    } else {
        "[ ]".to_string()
    };
    if highlighted {
        format!("  {} {checkbox} {}{status}", ARROW.cyan(), row.name.clone().white())
    } else {
        format!("    {checkbox} {}{status}", row.name)
    }
}

/// Module detail frame with one toggle per platform.
#[must_use]
pub fn detail(module: &Module, state: &DetailState) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("  {} {}", "Module:".blue(), module.name.clone().white()),
        format!("  {} {}", "Category:".blue(), module.category),
    ];
    if !module.description.is_empty() {
        lines.push(format!(
            "  {} {}",
            "Desc:".blue(),
            module.description.clone().dark_grey()
        ));
    }
    lines.push(format!(
        "  {} {}",
        "Path:".blue(),
        module.path.display().to_string().dark_grey()
    ));
    lines.push(String::new());
    lines.push(format!("  {}", "Platforms (✓=sync, ✗=remove):".blue()));
    lines.push(String::new());

    for (i, row) in state.rows.iter().enumerate() {
        let status = match (row.initial, row.selected) {
            (true, false) => " (will remove)".yellow().to_string(),
            (false, true) => " (will sync)".green().to_string(),
            (true, true) => " (synced)".dark_grey().to_string(),
            (false, false) => String::new(),
        };
        lines.push(toggle_line(row, i == state.cursor, &status));
    }
    lines.push(String::new());
    lines.push(hint(
        "↑↓ Navigate  |  Space/Enter Toggle  |  ← Back & Apply  |  Q Quit",
    ));
    lines
}

/// List frame in either projection.
#[must_use]
pub fn list_view(config: &Config, modules: &[Module], state: &ListViewState) -> Vec<String> {
    let mut lines = vec![String::new()];
    let check = "✓".green();

    match state.view {
        ListView::Modules => {
            lines.push(format!(
                "  {} {}",
                "Modules".blue(),
                "[Tab: Platform view]".dark_grey()
            ));
            lines.push(String::new());
            if modules.is_empty() {
                lines.push(format!("  {} No modules found", "!".yellow()));
            }
            for module in modules {
                lines.push(format!(
                    "  {} {} {}",
                    ARROW.cyan(),
                    module.name.clone().white(),
                    format!("({})", module.category).dark_grey()
                ));
                for key in &state.order {
                    let Some(platform) = config.platforms.get(key) else {
                        continue;
                    };
                    let target = reconcile::link_target(module, key, platform, Scope::Global);
                    if crate::links::query(&target).is_symlink() {
                        lines.push(format!("      {check} {}", platform.name));
                    }
                }
            }
            lines.push(String::new());
            lines.push(hint("Tab Switch View  |  ← Back  |  Q Quit"));
        }
        ListView::Platforms => {
            lines.push(format!(
                "  {} {}",
                "Platforms".blue(),
                "[Tab: Module view]".dark_grey()
            ));
            lines.push(String::new());
            for (i, key) in state.order.iter().enumerate() {
                let Some(platform) = config.platforms.get(key) else {
                    continue;
                };
                let prefix = if i == state.cursor {
                    format!("{} ", ARROW.cyan())
                } else {
                    "  ".to_string()
                };
                lines.push(format!(
                    "{prefix}{} {}",
                    platform.name.clone().white(),
                    format!("({key})").dark_grey()
                ));
                let linked: Vec<&Module> = modules
                    .iter()
                    .filter(|m| {
                        let target = reconcile::link_target(m, key, platform, Scope::Global);
                        crate::links::query(&target).is_symlink()
                    })
                    .collect();
                if linked.is_empty() {
                    lines.push(format!("      {}", "(no modules)".dark_grey()));
                }
                for module in linked {
                    lines.push(format!(
                        "      {check} {} {}",
                        module.name,
                        format!("({})", module.category).dark_grey()
                    ));
                }
            }
            lines.push(String::new());
            lines.push(hint("Tab Switch  |  ↑↓ Select  |  Shift+↑↓ Move  |  ← Back"));
        }
    }
    lines
}

/// Default-platform frame.
#[must_use]
pub fn defaults(state: &DefaultsState) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "  {} {}",
            "Set Default Platforms for Sync".blue(),
            "(used when pressing Enter on a module)".white()
        ),
        String::new(),
    ];
    let count = state.selected_count();
    if count > 0 {
        lines.push(format!("  Selected: {count} platform(s)"));
    } else {
        lines.push(format!(
            "  Selected: {}",
            "(none: Enter syncs to all platforms)".dark_grey()
        ));
    }
    lines.push(String::new());
    for (i, row) in state.rows.iter().enumerate() {
        lines.push(toggle_line(row, i == state.cursor, ""));
    }
    lines.push(String::new());
    lines.push(hint(
        "↑↓ Navigate  |  Space/Enter Toggle  |  ← Save & Back  |  Q Quit",
    ));
    lines
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn short_description_is_one_line() {
        assert_eq!(wrap_description("Reviews code", 120), ["Reviews code"]);
    }

    #[test]
    fn empty_description_has_no_lines() {
        assert!(wrap_description("", 80).is_empty());
    }

    #[test]
    fn long_description_wraps_at_two_thirds_width() {
        let desc = "x".repeat(130);
        let lines = wrap_description(&desc, 90);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 60);
        assert_eq!(lines[2].len(), 10);
    }

    #[test]
    fn narrow_terminals_still_get_forty_columns() {
        let desc = "y".repeat(50);
        let lines = wrap_description(&desc, 20);
        assert_eq!(lines[0].len(), 40);
    }

    #[test]
    fn wide_characters_count_double() {
        let desc = "界".repeat(30);
        let lines = wrap_description(&desc, 60);
        assert_eq!(lines[0].chars().count(), 20);
    }

    #[test]
    fn main_menu_lists_every_entry() {
        let frame = main_menu(MainMenuState::default()).join("\n");
        for entry in MainEntry::ALL {
            assert!(frame.contains(entry.label()));
        }
    }

    #[test]
    fn help_includes_command_reference() {
        let frame = help().join("\n");
        assert!(frame.contains("sync"));
        assert!(frame.contains("Interactive keys"));
    }
}
