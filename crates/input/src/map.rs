//! Key mapping from terminal events to scorekeeper commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entry::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Record one ball.
    Throw(Entry),
    /// Start over with the same roster.
    NewGame,
}

/// Map keyboard input to scorekeeper commands.
///
/// Every ball is a single key: a ten is entered as `X` on a fresh rack or `/` to
/// clear what is left.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('0') | KeyCode::Char('-') => Some(KeyCommand::Throw(Entry::Gutter)),
        KeyCode::Char(c @ '1'..='9') => {
            let n = c.to_digit(10)? as u8;
            Some(KeyCommand::Throw(Entry::Pins(n)))
        }
        KeyCode::Char('x') | KeyCode::Char('X') => Some(KeyCommand::Throw(Entry::Strike)),
        KeyCode::Char('/') => Some(KeyCommand::Throw(Entry::Spare)),

        KeyCode::Char('n') | KeyCode::Char('N') => Some(KeyCommand::NewGame),

        _ => None,
    }
}

/// Check if key should quit the scorekeeper.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
