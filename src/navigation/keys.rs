//! Logical keys understood by the interactive menus.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A decoded keystroke.
///
/// Vim-style letters alias the arrows: `j`/`k` move, `J`/`K` reorder and
/// `l` opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Up arrow or `k`.
    Up,
    /// Down arrow or `j`.
    Down,
    /// Left arrow: back.
    Left,
    /// Right arrow or `l`: open.
    Right,
    /// Enter: primary action.
    Enter,
    /// Space: toggle.
    Space,
    /// Tab: switch view.
    Tab,
    /// Escape.
    Esc,
    /// Shift+Up or `K`.
    MoveUp,
    /// Shift+Down or `J`.
    MoveDown,
    /// `a`
    SelectAll,
    /// `h`
    Help,
    /// `y`
    Yes,
    /// `n`
    No,
    /// `q`, Ctrl+C, or a failed read.
    Quit,
    /// `1`..=`9`
    Digit(u8),
    /// Anything without a binding.
    Other,
}

impl Key {
    /// Decode a crossterm key event; releases and repeats decode to `None`.
    #[must_use]
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        let shift = event.modifiers.contains(KeyModifiers::SHIFT);
        let key = match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Up if shift => Self::MoveUp,
            KeyCode::Down if shift => Self::MoveDown,
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Enter => Self::Enter,
            KeyCode::Tab => Self::Tab,
            KeyCode::Esc => Self::Esc,
            KeyCode::Char(c) => Self::from_char(c),
            _ => Self::Other,
        };
        Some(key)
    }

    fn from_char(c: char) -> Self {
        match c {
            'q' | 'Q' => Self::Quit,
            'h' | 'H' => Self::Help,
            'j' => Self::Down,
            'J' => Self::MoveDown,
            'k' => Self::Up,
            'K' => Self::MoveUp,
            'l' | 'L' => Self::Right,
            ' ' => Self::Space,
            'y' | 'Y' => Self::Yes,
            'n' | 'N' => Self::No,
            'a' | 'A' => Self::SelectAll,
            '\t' => Self::Tab,
            '\r' | '\n' => Self::Enter,
            '1'..='9' => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .map_or(Self::Other, Self::Digit),
            _ => Self::Other,
        }
    }
}
