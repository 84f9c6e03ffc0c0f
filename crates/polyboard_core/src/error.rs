//! Session error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong, independent of where it was raised.
///
/// The display form of the user-facing kinds is the exact line shown to the
/// player, so front ends can log `kind.to_string()` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionErrorKind {
    /// An index fell outside a grid, catalog, or vocabulary.
    #[display("{} {} is out of range (0..{})", what, index, len)]
    OutOfRange {
        /// Name of the indexed quantity.
        what: &'static str,
        /// Offending index.
        index: usize,
        /// Number of valid entries.
        len: usize,
    },
    /// The text does not parse under the variant's move grammar.
    #[display("Malformed move '{}'.", text)]
    MalformedMove {
        /// Trimmed input text.
        text: String,
    },
    /// The decoded value does not denote a move in the current grammar.
    #[display("Invalid move '{}'.", text)]
    InvalidMove {
        /// Canonical move text.
        text: String,
    },
    /// The engine refused the move in the current position.
    #[display("Illegal move '{}'.", text)]
    IllegalMove {
        /// Canonical move text.
        text: String,
    },
    /// An analysis is outstanding on the session.
    #[display("Computer is still thinking.")]
    Busy,
    /// The session is already terminal.
    #[display("This game is over.")]
    GameOver,
    /// The background search produced no usable move.
    #[display("Computer failed to find a move.")]
    SearchFailed,
    /// A search bound was not a positive integer.
    #[display("Search {} must be positive, got {}.", setting, value)]
    InvalidSetting {
        /// Name of the setting.
        setting: &'static str,
        /// Rejected value.
        value: u32,
    },
    /// The background worker could not be started.
    #[display("Analysis worker unavailable: {}", reason)]
    WorkerUnavailable {
        /// Operating system error text.
        reason: String,
    },
    /// The controller has been shut down.
    #[display("Session controller has shut down.")]
    ShutDown,
}

impl SessionErrorKind {
    /// Returns true for kinds reported to the player as a log line.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::MalformedMove { .. }
                | Self::InvalidMove { .. }
                | Self::IllegalMove { .. }
                | Self::Busy
                | Self::GameOver
                | Self::SearchFailed
                | Self::InvalidSetting { .. }
        )
    }

    /// Returns true for internal inconsistencies that should abort the front end.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::OutOfRange { .. } | Self::WorkerUnavailable { .. })
    }
}

/// Session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", kind, file, line)]
pub struct SessionError {
    /// Error kind.
    pub kind: SessionErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    #[instrument(skip(kind))]
    pub fn new(kind: SessionErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &SessionErrorKind {
        &self.kind
    }

    /// Creates an out-of-range error.
    #[track_caller]
    pub fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
        Self::new(SessionErrorKind::OutOfRange { what, index, len })
    }
}

impl From<SessionErrorKind> for SessionError {
    #[track_caller]
    fn from(kind: SessionErrorKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_kinds_render_as_log_lines() {
        let err = SessionError::new(SessionErrorKind::IllegalMove {
            text: "A1A2".to_string(),
        });
        assert_eq!(err.kind().to_string(), "Illegal move 'A1A2'.");
        assert!(err.kind().is_user_facing());
        assert!(!err.kind().is_fatal());
    }

    #[test]
    fn out_of_range_is_fatal() {
        let err = SessionError::out_of_range("row", 9, 3);
        assert!(err.kind().is_fatal());
        assert!(err.to_string().contains("row 9 is out of range (0..3)"));
        assert!(err.file.ends_with("error.rs"));
    }
}
