//! Terminal seam for the interactive session.
//!
//! Raw mode is held only while a single key is being read, so output
//! produced between reads (apply results, log lines) renders normally.
use crossterm::{
    cursor, execute,
    event::{self, Event},
    terminal::{self, Clear, ClearType},
};
use std::io::{Stdout, Write as _};

use super::keys::Key;

/// Width assumed when the terminal size cannot be queried.
const DEFAULT_WIDTH: usize = 80;

/// Input and full-screen output used by the session.
pub trait Terminal {
    /// Block until a key is pressed.  Read failures decode to [`Key::Quit`].
    fn read_key(&mut self) -> Key;
    /// Clear the screen and draw `frame` from the top-left corner.
    fn draw(&mut self, frame: &[String]);
    /// Clear the screen without drawing anything.
    fn clear(&mut self) {
        self.draw(&[]);
    }
    /// Print `line` below the current output without clearing.
    fn print(&mut self, line: &str);
    /// Columns available for wrapping.
    fn width(&self) -> usize;
}

/// [`Terminal`] backed by the process's stdin/stdout via crossterm.
#[derive(Debug)]
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl CrosstermTerminal {
    /// Take over stdout and hide the cursor until dropped.
    #[must_use]
    pub fn new() -> Self {
        let mut stdout = std::io::stdout();
        execute!(stdout, cursor::Hide).ok();
        Self { stdout }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        execute!(self.stdout, cursor::Show).ok();
    }
}

impl Terminal for CrosstermTerminal {
    fn read_key(&mut self) -> Key {
        if terminal::enable_raw_mode().is_err() {
            return Key::Quit;
        }
        let key = loop {
            match event::read() {
                Ok(Event::Key(ev)) => {
                    if let Some(key) = Key::from_event(ev) {
                        break key;
                    }
                }
                Ok(_) => {}
                Err(_) => break Key::Quit,
            }
        };
        terminal::disable_raw_mode().ok();
        key
    }

    fn draw(&mut self, frame: &[String]) {
        execute!(self.stdout, Clear(ClearType::All), cursor::MoveTo(0, 0)).ok();
        for line in frame {
            writeln!(self.stdout, "{line}").ok();
        }
        self.stdout.flush().ok();
    }

    fn print(&mut self, line: &str) {
        writeln!(self.stdout, "{line}").ok();
        self.stdout.flush().ok();
    }

    fn width(&self) -> usize {
        terminal_size::terminal_size().map_or(DEFAULT_WIDTH, |(terminal_size::Width(w), _)| {
            usize::from(w)
        })
    }
}

/// Restore the cursor after an interrupt; installed by `main`.
pub fn restore_cursor() {
    terminal::disable_raw_mode().ok();
    execute!(std::io::stdout(), cursor::Show).ok();
}
