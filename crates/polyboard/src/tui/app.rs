//! Terminal UI state, fed by the controller through [`Presentation`].

use super::input::move_cursor;
use crate::glyphs::square_name;
use crossterm::event::KeyCode;
use derive_getters::Getters;
use polyboard_core::{BoardView, Presentation};
use tracing::debug;

/// Lines kept in the log pane.
const LOG_CAPACITY: usize = 500;

/// Everything the terminal UI draws.
#[derive(Debug, Clone, Default, Getters)]
pub struct TuiApp {
    /// Window title.
    title: String,
    /// Status line.
    status: String,
    /// Game log, oldest first.
    log: Vec<String>,
    /// Latest board.
    board: Option<BoardView>,
    /// Highlighted cell as row and column.
    cursor: (usize, usize),
    /// Source cell marked with Space, awaiting a target.
    mark: Option<(usize, usize)>,
    /// Text typed on the input line.
    input: String,
}

impl TuiApp {
    /// Moves the board cursor with an arrow key.
    pub fn move_cursor(&mut self, key: KeyCode) {
        if let Some(board) = &self.board {
            self.cursor = move_cursor(self.cursor, key, *board.rows(), *board.columns());
        }
    }

    /// Marks the cursor cell, or completes a marked pair.
    ///
    /// Returns the move text once a source and target have both been chosen,
    /// the same text a click-and-release on the board would produce.
    pub fn press_space(&mut self) -> Option<String> {
        if !self.input.is_empty() {
            self.input.push(' ');
            return None;
        }
        let rows = *self.board.as_ref()?.rows();
        match self.mark.take() {
            None => {
                self.mark = Some(self.cursor);
                None
            }
            Some((row, column)) => {
                let text = format!(
                    "{}{}",
                    square_name(row, column, rows),
                    square_name(self.cursor.0, self.cursor.1, rows)
                );
                debug!(%text, "Board gesture completed");
                Some(text)
            }
        }
    }

    /// Appends a typed character.
    pub fn type_char(&mut self, c: char) {
        self.input.push(c);
    }

    /// Removes the last typed character, or drops a pending mark.
    pub fn backspace(&mut self) {
        if self.input.pop().is_none() {
            self.mark = None;
        }
    }

    /// Takes the input line, leaving it empty.
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    /// Empties the log pane.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }
}

impl Presentation for TuiApp {
    fn log_line(&mut self, text: &str) {
        self.log.push(text.to_string());
        if self.log.len() > LOG_CAPACITY {
            let excess = self.log.len() - LOG_CAPACITY;
            self.log.drain(..excess);
        }
    }

    fn render_board(&mut self, view: &BoardView) {
        let (rows, columns) = (*view.rows(), *view.columns());
        let reshaped = self
            .board
            .as_ref()
            .is_none_or(|old| (*old.rows(), *old.columns()) != (rows, columns));
        if reshaped {
            self.cursor = (rows.saturating_sub(1), 0);
            self.mark = None;
        }
        self.board = Some(view.clone());
    }

    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }
}
