//! Per-menu state machines.
//!
//! Each state is a plain value: `on_key` consumes it and yields either the
//! next state or the menu's typed outcome.  Nothing here touches the
//! filesystem or the terminal.
use std::collections::BTreeSet;

use super::keys::Key;
use crate::catalog::Module;
use crate::config::Config;

/// Result of feeding one key to a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<S, O> {
    /// Stay in the menu with the new state.
    Continue(S),
    /// Leave the menu with an outcome.
    Done(O),
}

const fn up(cursor: usize) -> usize {
    cursor.saturating_sub(1)
}

const fn down(cursor: usize, len: usize) -> usize {
    if cursor + 1 < len { cursor + 1 } else { cursor }
}

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainEntry {
    /// Distribute modules to platforms.
    Use,
    /// Browse link state by module or platform.
    List,
    /// Show registered platforms.
    Platforms,
    /// Choose the quick-sync platform subset.
    Defaults,
    /// Create the repository layout.
    Init,
}

impl MainEntry {
    /// All entries; number key `n` opens `ALL[n - 1]`.
    pub const ALL: [Self; 5] = [
        Self::Use,
        Self::List,
        Self::Platforms,
        Self::Defaults,
        Self::Init,
    ];

    /// Short label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Use => "Use",
            Self::List => "List",
            Self::Platforms => "Platforms",
            Self::Defaults => "Defaults",
            Self::Init => "Init",
        }
    }

    /// One-line description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Use => "Distribute skill to platforms",
            Self::List => "Show all modules and status",
            Self::Platforms => "View registered platforms",
            Self::Defaults => "Set default platforms for sync",
            Self::Init => "Initialize repository",
        }
    }
}

/// Outcome of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainOutcome {
    /// Open a sub-flow.
    Open(MainEntry),
    /// Show the help screen.
    Help,
    /// End the session.
    Quit,
}

/// Main menu state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainMenuState {
    /// Highlighted entry.
    pub cursor: usize,
}

impl MainMenuState {
    /// Feed one key.
    #[must_use]
    pub fn on_key(self, key: Key) -> Step<Self, MainOutcome> {
        let len = MainEntry::ALL.len();
        match key {
            Key::Up => Step::Continue(Self { cursor: up(self.cursor) }),
            Key::Down => Step::Continue(Self { cursor: down(self.cursor, len) }),
            Key::Right | Key::Enter => MainEntry::ALL
                .get(self.cursor)
                .map_or(Step::Continue(self), |e| Step::Done(MainOutcome::Open(*e))),
            Key::Digit(n) => MainEntry::ALL
                .get(usize::from(n).wrapping_sub(1))
                .map_or(Step::Continue(self), |e| Step::Done(MainOutcome::Open(*e))),
            Key::Help => Step::Done(MainOutcome::Help),
            Key::Quit => Step::Done(MainOutcome::Quit),
            _ => Step::Continue(self),
        }
    }
}

/// Outcome of the module list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleListOutcome<'a> {
    /// Return to the main menu.
    Back,
    /// End the session.
    Quit,
    /// Sync the highlighted module to the default targets.
    SyncDefault(&'a Module),
    /// Sync every module to the default targets.
    SyncAllDefault(&'a [Module]),
    /// Open the per-platform detail page.
    Detail(&'a Module),
}

/// Module list state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleListState<'a> {
    /// Catalog snapshot being browsed; never empty.
    pub modules: &'a [Module],
    /// Highlighted module.
    pub cursor: usize,
    /// Whether the primary action applies to every module.
    pub select_all: bool,
}

impl<'a> ModuleListState<'a> {
    /// Start at the first module with select-all off.
    #[must_use]
    pub const fn new(modules: &'a [Module]) -> Self {
        Self {
            modules,
            cursor: 0,
            select_all: false,
        }
    }

    /// The highlighted module.
    #[must_use]
    pub fn current(&self) -> Option<&'a Module> {
        self.modules.get(self.cursor)
    }

    /// Feed one key.  Moving the cursor or pressing escape clears select-all.
    #[must_use]
    pub fn on_key(self, key: Key) -> Step<Self, ModuleListOutcome<'a>> {
        match key {
            Key::Up => Step::Continue(Self {
                cursor: up(self.cursor),
                select_all: false,
                ..self
            }),
            Key::Down => Step::Continue(Self {
                cursor: down(self.cursor, self.modules.len()),
                select_all: false,
                ..self
            }),
            Key::SelectAll => Step::Continue(Self {
                select_all: !self.select_all,
                ..self
            }),
            Key::Esc => Step::Continue(Self {
                select_all: false,
                ..self
            }),
            Key::Enter if self.select_all => {
                Step::Done(ModuleListOutcome::SyncAllDefault(self.modules))
            }
            Key::Enter => self
                .current()
                .map_or(Step::Continue(self), |m| Step::Done(ModuleListOutcome::SyncDefault(m))),
            Key::Right => self
                .current()
                .map_or(Step::Continue(self), |m| Step::Done(ModuleListOutcome::Detail(m))),
            Key::Left => Step::Done(ModuleListOutcome::Back),
            Key::Quit => Step::Done(ModuleListOutcome::Quit),
            _ => Step::Continue(self),
        }
    }
}

/// One platform row on a toggle page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRow {
    /// Platform key.
    pub key: String,
    /// Platform display name.
    pub name: String,
    /// Current toggle value.
    pub selected: bool,
    /// Value the page opened with.
    pub initial: bool,
}

impl ToggleRow {
    fn rows(config: &Config, mut initial: impl FnMut(&str) -> bool) -> Vec<Self> {
        config
            .ordered_platforms()
            .into_iter()
            .map(|(key, platform)| {
                let on = initial(&key);
                Self {
                    name: platform.name.clone(),
                    key,
                    selected: on,
                    initial: on,
                }
            })
            .collect()
    }
}

fn toggle_at(mut rows: Vec<ToggleRow>, cursor: usize) -> Vec<ToggleRow> {
    if let Some(row) = rows.get_mut(cursor) {
        row.selected = !row.selected;
    }
    rows
}

fn selected_keys(rows: &[ToggleRow]) -> impl Iterator<Item = &String> {
    rows.iter().filter(|r| r.selected).map(|r| &r.key)
}

/// Outcome of the module detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    /// Back: reconcile the module against these desired platform keys.
    Commit(BTreeSet<String>),
    /// End the session without applying anything.
    Quit,
}

/// Module detail page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    /// One row per configured platform, in display order.
    pub rows: Vec<ToggleRow>,
    /// Highlighted row.
    pub cursor: usize,
}

impl DetailState {
    /// Rows pre-populated from the keys currently carrying a link.
    #[must_use]
    pub fn new(config: &Config, linked: &BTreeSet<String>) -> Self {
        Self {
            rows: ToggleRow::rows(config, |key| linked.contains(key)),
            cursor: 0,
        }
    }

    /// Feed one key.
    #[must_use]
    pub fn on_key(self, key: Key) -> Step<Self, DetailOutcome> {
        match key {
            Key::Up => Step::Continue(Self {
                cursor: up(self.cursor),
                ..self
            }),
            Key::Down => {
                let cursor = down(self.cursor, self.rows.len());
                Step::Continue(Self { cursor, ..self })
            }
            Key::Space | Key::Enter => Step::Continue(Self {
                rows: toggle_at(self.rows, self.cursor),
                ..self
            }),
            Key::Left => Step::Done(DetailOutcome::Commit(
                selected_keys(&self.rows).cloned().collect(),
            )),
            Key::Quit => Step::Done(DetailOutcome::Quit),
            _ => Step::Continue(self),
        }
    }
}

/// Outcome of the default-platform page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultsOutcome {
    /// Back: persist these keys as the new default set.
    Save(Vec<String>),
    /// End the session without saving.
    Quit,
}

/// Default-platform page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsState {
    /// One row per configured platform, in display order.
    pub rows: Vec<ToggleRow>,
    /// Highlighted row.
    pub cursor: usize,
}

impl DefaultsState {
    /// Rows pre-populated from the persisted default set.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            rows: ToggleRow::rows(config, |key| config.default_platforms.iter().any(|d| d == key)),
            cursor: 0,
        }
    }

    /// Number of toggled rows.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        selected_keys(&self.rows).count()
    }

    /// Feed one key.
    #[must_use]
    pub fn on_key(self, key: Key) -> Step<Self, DefaultsOutcome> {
        match key {
            Key::Up => Step::Continue(Self {
                cursor: up(self.cursor),
                ..self
            }),
            Key::Down => {
                let cursor = down(self.cursor, self.rows.len());
                Step::Continue(Self { cursor, ..self })
            }
            Key::Space | Key::Enter => Step::Continue(Self {
                rows: toggle_at(self.rows, self.cursor),
                ..self
            }),
            Key::Left => Step::Done(DefaultsOutcome::Save(
                selected_keys(&self.rows).cloned().collect(),
            )),
            Key::Quit => Step::Done(DefaultsOutcome::Quit),
            _ => Step::Continue(self),
        }
    }
}

/// Projection shown by the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    /// Each module with the platforms it is linked on.
    Modules,
    /// Each platform with the modules linked on it; supports reordering.
    Platforms,
}

/// Outcome of the list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOutcome {
    /// Return to the main menu.
    Back,
    /// End the session.
    Quit,
}

/// List page state.
///
/// The caller persists `order` whenever a step changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewState {
    /// Current projection.
    pub view: ListView,
    /// Highlighted platform in the platform view.
    pub cursor: usize,
    /// Platform keys in display order.
    pub order: Vec<String>,
}

impl ListViewState {
    /// Start in the module view.
    #[must_use]
    pub const fn new(order: Vec<String>) -> Self {
        Self {
            view: ListView::Modules,
            cursor: 0,
            order,
        }
    }

    /// Feed one key.  Cursor and reorder keys only act in the platform view.
    #[must_use]
    pub fn on_key(mut self, key: Key) -> Step<Self, ListOutcome> {
        let in_platforms = self.view == ListView::Platforms;
        match key {
            Key::Tab => {
                self.view = match self.view {
                    ListView::Modules => ListView::Platforms,
                    ListView::Platforms => ListView::Modules,
                };
                self.cursor = 0;
            }
            Key::Up if in_platforms => self.cursor = up(self.cursor),
            Key::Down if in_platforms => self.cursor = down(self.cursor, self.order.len()),
            Key::MoveUp if in_platforms && self.cursor > 0 => {
                self.order.swap(self.cursor, self.cursor - 1);
                self.cursor -= 1;
            }
            Key::MoveDown if in_platforms && self.cursor + 1 < self.order.len() => {
                self.order.swap(self.cursor, self.cursor + 1);
                self.cursor += 1;
            }
            Key::Left | Key::Esc => return Step::Done(ListOutcome::Back),
            Key::Quit => return Step::Done(ListOutcome::Quit),
            _ => {}
        }
        Step::Continue(self)
    }
}

/// Decode a key on the confirm prompt: `Some(true)` to proceed,
/// `Some(false)` to decline, `None` to keep waiting.
///
/// `q` declines here rather than ending the session.
#[must_use]
pub const fn confirm_key(key: Key) -> Option<bool> {
    match key {
        Key::Enter | Key::Yes => Some(true),
        Key::Esc | Key::No | Key::Quit | Key::Left => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::config::test_helpers::{config_with, platform};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    fn module(name: &str) -> Module {
        Module {
            name: name.to_string(),
            category: Category::Skill,
            path: PathBuf::from("/repo/skill").join(name),
            aliases: BTreeMap::new(),
            description: String::new(),
        }
    }

    fn three_platforms() -> Config {
        let root = Path::new("/r");
        config_with(
            Path::new("/repo"),
            vec![
                ("p1", platform("P1", root)),
                ("p2", platform("P2", root)),
                ("p3", platform("P3", root)),
            ],
        )
    }

    fn cont<S, O: std::fmt::Debug>(step: Step<S, O>) -> S {
        match step {
            Step::Continue(s) => s,
            Step::Done(o) => panic!("expected Continue, got Done({o:?})"),
        }
    }

    #[test]
    fn main_menu_cursor_is_clamped() {
        let s = cont(MainMenuState::default().on_key(Key::Up));
        assert_eq!(s.cursor, 0);
        let mut s = s;
        for _ in 0..10 {
            s = cont(s.on_key(Key::Down));
        }
        assert_eq!(s.cursor, MainEntry::ALL.len() - 1);
    }

    #[test]
    fn main_menu_enter_opens_highlighted_entry() {
        let s = cont(MainMenuState::default().on_key(Key::Down));
        assert_eq!(s.on_key(Key::Enter), Step::Done(MainOutcome::Open(MainEntry::List)));
    }

    #[test]
    fn main_menu_digits_jump() {
        let s = MainMenuState::default();
        assert_eq!(
            s.on_key(Key::Digit(4)),
            Step::Done(MainOutcome::Open(MainEntry::Defaults))
        );
        assert_eq!(s.on_key(Key::Digit(9)), Step::Continue(s));
        assert_eq!(s.on_key(Key::Help), Step::Done(MainOutcome::Help));
        assert_eq!(s.on_key(Key::Quit), Step::Done(MainOutcome::Quit));
    }

    #[test]
    fn module_list_select_all_toggles_and_clears() {
        let modules = vec![module("a"), module("b")];
        let s = ModuleListState::new(&modules);

        let on = cont(s.on_key(Key::SelectAll));
        assert!(on.select_all);
        assert!(!cont(on.on_key(Key::SelectAll)).select_all);
        assert!(!cont(on.on_key(Key::Esc)).select_all);
        assert!(!cont(on.on_key(Key::Down)).select_all);
        assert!(!cont(on.on_key(Key::Up)).select_all);
    }

    #[test]
    fn module_list_enter_syncs_highlighted_or_all() {
        let modules = vec![module("a"), module("b")];
        let s = cont(ModuleListState::new(&modules).on_key(Key::Down));

        assert_eq!(
            s.on_key(Key::Enter),
            Step::Done(ModuleListOutcome::SyncDefault(&modules[1]))
        );

        let all = cont(s.on_key(Key::SelectAll));
        assert_eq!(
            all.on_key(Key::Enter),
            Step::Done(ModuleListOutcome::SyncAllDefault(&modules))
        );
    }

    #[test]
    fn module_list_navigation_outcomes() {
        let modules = vec![module("a")];
        let s = ModuleListState::new(&modules);
        assert_eq!(
            s.on_key(Key::Right),
            Step::Done(ModuleListOutcome::Detail(&modules[0]))
        );
        assert_eq!(s.on_key(Key::Left), Step::Done(ModuleListOutcome::Back));
        assert_eq!(s.on_key(Key::Quit), Step::Done(ModuleListOutcome::Quit));
    }

    #[test]
    fn detail_prefills_from_linked_keys_and_commits_toggles() {
        let cfg = three_platforms();
        let linked: BTreeSet<String> = ["p1", "p2", "p3"].iter().map(ToString::to_string).collect();
        let s = DetailState::new(&cfg, &linked);
        assert!(s.rows.iter().all(|r| r.selected && r.initial));

        let s = cont(s.on_key(Key::Down));
        let s = cont(s.on_key(Key::Space));
        assert!(!s.rows[1].selected);
        assert!(s.rows[1].initial);

        let expected: BTreeSet<String> = ["p1", "p3"].iter().map(ToString::to_string).collect();
        assert_eq!(s.on_key(Key::Left), Step::Done(DetailOutcome::Commit(expected)));
    }

    #[test]
    fn detail_quit_commits_nothing() {
        let cfg = three_platforms();
        let s = cont(DetailState::new(&cfg, &BTreeSet::new()).on_key(Key::Enter));
        assert_eq!(s.on_key(Key::Quit), Step::Done(DetailOutcome::Quit));
    }

    #[test]
    fn defaults_prefill_and_save_in_display_order() {
        let mut cfg = three_platforms();
        cfg.default_platforms = vec!["p3".to_string()];
        let s = DefaultsState::new(&cfg);
        assert_eq!(s.selected_count(), 1);

        let s = cont(s.on_key(Key::Enter));
        assert_eq!(
            s.on_key(Key::Left),
            Step::Done(DefaultsOutcome::Save(vec!["p1".to_string(), "p3".to_string()]))
        );
    }

    #[test]
    fn list_reorders_only_in_platform_view() {
        let order = vec!["p1".to_string(), "p2".to_string(), "p3".to_string()];
        let s = ListViewState::new(order.clone());

        let unchanged = cont(s.clone().on_key(Key::MoveDown));
        assert_eq!(unchanged.order, order);

        let s = cont(s.on_key(Key::Tab));
        assert_eq!(s.view, ListView::Platforms);
        let s = cont(s.on_key(Key::MoveDown));
        assert_eq!(s.order, ["p2", "p1", "p3"]);
        assert_eq!(s.cursor, 1);
        let s = cont(s.on_key(Key::MoveUp));
        assert_eq!(s.order, ["p1", "p2", "p3"]);
        assert_eq!(s.cursor, 0);
        let s = cont(s.on_key(Key::MoveUp));
        assert_eq!(s.order, ["p1", "p2", "p3"]);
    }

    #[test]
    fn list_leaves_on_back_and_quit() {
        let s = ListViewState::new(vec![]);
        assert_eq!(s.clone().on_key(Key::Left), Step::Done(ListOutcome::Back));
        assert_eq!(s.clone().on_key(Key::Esc), Step::Done(ListOutcome::Back));
        assert_eq!(s.on_key(Key::Quit), Step::Done(ListOutcome::Quit));
    }

    #[test]
    fn confirm_keys() {
        assert_eq!(confirm_key(Key::Enter), Some(true));
        assert_eq!(confirm_key(Key::Yes), Some(true));
        assert_eq!(confirm_key(Key::Esc), Some(false));
        assert_eq!(confirm_key(Key::Quit), Some(false));
        assert_eq!(confirm_key(Key::Left), Some(false));
        assert_eq!(confirm_key(Key::Down), None);
    }
}
