//! Keyboard handling for the terminal UI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the program.
    Quit,
    /// Move the board cursor.
    Cursor(KeyCode),
    /// Mark a cell, or type a space.
    Space,
    /// Submit the input line.
    Submit,
    /// Switch to the next variant.
    NextVariant,
    /// Delete backwards.
    Backspace,
    /// Type a character.
    Type(char),
}

/// Maps a key event to an action; releases and unbound keys yield `None`.
pub fn action_for(key: KeyEvent) -> Option<KeyAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Quit),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            Some(KeyAction::Cursor(key.code))
        }
        KeyCode::Char(' ') => Some(KeyAction::Space),
        KeyCode::Enter => Some(KeyAction::Submit),
        KeyCode::Tab => Some(KeyAction::NextVariant),
        KeyCode::Backspace => Some(KeyAction::Backspace),
        KeyCode::Char(c) => Some(KeyAction::Type(c)),
        _ => None,
    }
}

/// Moves the cursor one cell, staying on a `rows` by `columns` board.
pub fn move_cursor(
    (row, column): (usize, usize),
    key: KeyCode,
    rows: usize,
    columns: usize,
) -> (usize, usize) {
    let last_row = rows.saturating_sub(1);
    let last_column = columns.saturating_sub(1);
    let (row, column) = (row.min(last_row), column.min(last_column));

    match key {
        KeyCode::Up => (row.saturating_sub(1), column),
        KeyCode::Down => ((row + 1).min(last_row), column),
        KeyCode::Left => (row, column.saturating_sub(1)),
        KeyCode::Right => (row, (column + 1).min(last_column)),
        _ => (row, column),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_stays_on_the_board() {
        assert_eq!(move_cursor((0, 0), KeyCode::Up, 3, 3), (0, 0));
        assert_eq!(move_cursor((0, 0), KeyCode::Left, 3, 3), (0, 0));
        assert_eq!(move_cursor((2, 2), KeyCode::Down, 3, 3), (2, 2));
        assert_eq!(move_cursor((2, 2), KeyCode::Right, 3, 3), (2, 2));
        assert_eq!(move_cursor((1, 1), KeyCode::Right, 3, 3), (1, 2));
        assert_eq!(move_cursor((7, 7), KeyCode::Char('x'), 3, 8), (2, 7));
    }

    #[test]
    fn bindings() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(action_for(press(KeyCode::Esc)), Some(KeyAction::Quit));
        assert_eq!(action_for(press(KeyCode::Tab)), Some(KeyAction::NextVariant));
        assert_eq!(action_for(press(KeyCode::Char('b'))), Some(KeyAction::Type('b')));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(action_for(press(KeyCode::F(1))), None);
    }
}
