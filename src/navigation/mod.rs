//! Interactive session: a main menu over the module catalog and platform
//! registry.
//!
//! Each menu is a state machine in [`menus`]; the [`Session`] here draws its
//! frame, feeds it keys and performs the side effects its outcome asks for.
//! Quitting from any menu ends the session without applying or saving
//! anything pending.
pub mod keys;
pub mod menus;
pub mod render;
pub mod terminal;

use crate::catalog::{self, Module};
use crate::commands;
use crate::config::{Config, ConfigLocation, ConfigStore};
use crate::logging::Log;
use crate::reconcile;

use menus::{
    DefaultsOutcome, DefaultsState, DetailOutcome, DetailState, ListOutcome, ListViewState,
    MainEntry, MainMenuState, MainOutcome, ModuleListOutcome, ModuleListState, Step,
};
use terminal::Terminal;

/// Where control goes after a sub-flow returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Back,
    Quit,
}

/// An interactive session over one configuration.
pub struct Session<'a, T: Terminal> {
    config: Config,
    store: &'a dyn ConfigStore,
    terminal: T,
    log: &'a dyn Log,
}

impl<T: Terminal> std::fmt::Debug for Session<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config.file)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Terminal> Session<'a, T> {
    /// Create a session.  `config` may be empty (not yet initialised); the
    /// Init entry reloads it from `config.file`.
    pub const fn new(
        config: Config,
        store: &'a dyn ConfigStore,
        terminal: T,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            config,
            store,
            terminal,
            log,
        }
    }

    /// Drive the main menu until the user quits.
    pub fn run(&mut self) {
        let mut state = MainMenuState::default();
        loop {
            self.terminal.draw(&render::main_menu(state));
            let flow = match state.on_key(self.terminal.read_key()) {
                Step::Continue(next) => {
                    state = next;
                    continue;
                }
                Step::Done(MainOutcome::Quit) => Flow::Quit,
                Step::Done(MainOutcome::Help) => {
                    self.terminal.draw(&render::help());
                    pause(&mut self.terminal);
                    Flow::Back
                }
                Step::Done(MainOutcome::Open(entry)) => self.open(entry),
            };
            if flow == Flow::Quit {
                self.terminal.clear();
                return;
            }
        }
    }

    fn open(&mut self, entry: MainEntry) -> Flow {
        match entry {
            MainEntry::Use => self.use_flow(),
            MainEntry::List => self.list_flow(),
            MainEntry::Defaults => self.defaults_flow(),
            MainEntry::Platforms => {
                self.terminal.clear();
                commands::platforms::show(&self.config, self.log);
                pause(&mut self.terminal);
                Flow::Back
            }
            MainEntry::Init => {
                self.init_flow();
                Flow::Back
            }
        }
    }

    fn use_flow(&mut self) -> Flow {
        let modules = catalog::list_all(&self.config);
        if modules.is_empty() {
            self.terminal.clear();
            self.log.warn(&format!(
                "No modules found under {}",
                self.config.repo.display()
            ));
            pause(&mut self.terminal);
            return Flow::Back;
        }

        let mut state = ModuleListState::new(&modules);
        loop {
            let width = self.terminal.width();
            self.terminal
                .draw(&render::module_list(&self.config, state, width));
            match state.on_key(self.terminal.read_key()) {
                Step::Continue(next) => state = next,
                Step::Done(ModuleListOutcome::Back) => return Flow::Back,
                Step::Done(ModuleListOutcome::Quit) => return Flow::Quit,
                Step::Done(ModuleListOutcome::SyncDefault(module)) => {
                    self.quick_sync(std::slice::from_ref(module));
                }
                Step::Done(ModuleListOutcome::SyncAllDefault(all)) => self.quick_sync(all),
                Step::Done(ModuleListOutcome::Detail(module)) => {
                    if self.detail_flow(module) == Flow::Quit {
                        return Flow::Quit;
                    }
                }
            }
        }
    }

    /// Link `modules` onto the default targets after confirmation.
    fn quick_sync(&mut self, modules: &[Module]) {
        let count = self.config.default_targets().len();
        if count == 0 {
            self.terminal.clear();
            self.log.warn("No platforms configured");
            pause(&mut self.terminal);
            return;
        }
        let prompt = match modules {
            [module] => format!("Sync '{}' to {count} default platform(s)?", module.name),
            _ => format!(
                "Sync ALL {} modules to {count} default platform(s)?",
                modules.len()
            ),
        };
        if !confirm(&mut self.terminal, &prompt) {
            return;
        }

        self.terminal.clear();
        let tally = reconcile::sync_all(modules, &self.config.default_targets(), self.log);
        self.log.info(&format!(
            "Done: {} succeeded, {} failed",
            tally.success, tally.failed
        ));
        pause(&mut self.terminal);
    }

    fn detail_flow(&mut self, module: &Module) -> Flow {
        let linked = reconcile::linked_keys(&self.config, module);
        let mut state = DetailState::new(&self.config, &linked);
        loop {
            self.terminal.draw(&render::detail(module, &state));
            match state.on_key(self.terminal.read_key()) {
                Step::Continue(next) => state = next,
                Step::Done(DetailOutcome::Quit) => return Flow::Quit,
                Step::Done(DetailOutcome::Commit(desired)) => {
                    let diff = reconcile::compute_diff(&self.config, module, &desired);
                    if diff.is_empty() {
                        return Flow::Back;
                    }
                    let prompt = format!(
                        "Apply changes? (+{} sync, -{} remove)",
                        diff.to_sync.len(),
                        diff.to_remove.len()
                    );
                    if confirm(&mut self.terminal, &prompt) {
                        self.terminal.clear();
                        let results = reconcile::apply_diff(&self.config, module, &diff, self.log);
                        let failed = results.iter().filter(|r| r.result.is_err()).count();
                        self.log.info(&format!(
                            "Done: {} succeeded, {failed} failed",
                            results.len() - failed
                        ));
                        pause(&mut self.terminal);
                    }
                    return Flow::Back;
                }
            }
        }
    }

    fn list_flow(&mut self) -> Flow {
        let modules = catalog::list_all(&self.config);
        let mut state = ListViewState::new(self.config.ordered_keys());
        loop {
            self.terminal
                .draw(&render::list_view(&self.config, &modules, &state));
            match state.on_key(self.terminal.read_key()) {
                Step::Continue(next) => {
                    if next.order != self.config.ordered_keys()
                        && let Err(e) = self.config.set_order(next.order.clone(), self.store)
                    {
                        self.log.error(&format!("Failed to save platform order: {e}"));
                    }
                    state = next;
                }
                Step::Done(ListOutcome::Back) => return Flow::Back,
                Step::Done(ListOutcome::Quit) => return Flow::Quit,
            }
        }
    }

    fn defaults_flow(&mut self) -> Flow {
        let mut state = DefaultsState::new(&self.config);
        loop {
            self.terminal.draw(&render::defaults(&state));
            match state.on_key(self.terminal.read_key()) {
                Step::Continue(next) => state = next,
                Step::Done(DefaultsOutcome::Quit) => return Flow::Quit,
                Step::Done(DefaultsOutcome::Save(keys)) => {
                    if let Err(e) = self.config.set_defaults(keys, self.store) {
                        self.terminal.clear();
                        self.log.error(&format!("Failed to save default platforms: {e}"));
                        pause(&mut self.terminal);
                    }
                    return Flow::Back;
                }
            }
        }
    }

    fn init_flow(&mut self) {
        self.terminal.clear();
        let location = ConfigLocation {
            repo: self.config.repo.clone(),
            file: self.config.file.clone(),
        };
        match commands::init::initialize(&location, self.log) {
            Ok(()) => match Config::load(&location) {
                Ok(config) => self.config = config,
                Err(e) => self.log.warn(&e.to_string()),
            },
            Err(e) => self.log.error(&format!("{e:#}")),
        }
        pause(&mut self.terminal);
    }
}

/// Print `prompt` and wait for a yes/no answer.
fn confirm<T: Terminal>(terminal: &mut T, prompt: &str) -> bool {
    terminal.print("");
    terminal.print(&format!("  {prompt} [Y/n]"));
    loop {
        if let Some(answer) = menus::confirm_key(terminal.read_key()) {
            return answer;
        }
    }
}

fn pause<T: Terminal>(terminal: &mut T) {
    terminal.print("");
    terminal.print("  Press any key to continue...");
    terminal.read_key();
}
