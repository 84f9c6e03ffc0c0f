//! Display capability driven by the controller.

use crate::BoardView;

/// Front-end surface. Every call is made on the interactive context.
pub trait Presentation {
    /// Appends a line to the game log.
    fn log_line(&mut self, text: &str);

    /// Redraws the board.
    fn render_board(&mut self, view: &BoardView);

    /// Replaces the status line.
    fn set_status_text(&mut self, text: &str);

    /// Replaces the window or screen title.
    fn set_title(&mut self, text: &str);
}

impl<P: Presentation + ?Sized> Presentation for &mut P {
    fn log_line(&mut self, text: &str) {
        (**self).log_line(text);
    }

    fn render_board(&mut self, view: &BoardView) {
        (**self).render_board(view);
    }

    fn set_status_text(&mut self, text: &str) {
        (**self).set_status_text(text);
    }

    fn set_title(&mut self, text: &str) {
        (**self).set_title(text);
    }
}
