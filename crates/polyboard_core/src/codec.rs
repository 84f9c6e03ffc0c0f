//! Textual move encoding for the active variant.

use crate::{GamePosition, Move, SessionError, SessionErrorKind};
use tracing::{debug, instrument};

/// Stateless translation between move text and engine moves.
///
/// Decoding checks only the variant's grammar, never board legality. Both
/// directions delegate to the game because grammar is variant-specific.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveCodec;

impl MoveCodec {
    /// Parses move text. Surrounding whitespace is ignored and empty text is malformed.
    #[instrument(skip(game))]
    pub fn decode(game: &dyn GamePosition, text: &str) -> Result<Move, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionErrorKind::MalformedMove {
                text: String::new(),
            }
            .into());
        }

        match game.decode_move(text) {
            Some(mv) => {
                debug!(?mv, "Decoded move text");
                Ok(mv)
            }
            None => Err(SessionErrorKind::MalformedMove {
                text: text.to_string(),
            }
            .into()),
        }
    }

    /// Canonical text for a move.
    pub fn encode(game: &dyn GamePosition, mv: Move) -> String {
        game.encode_move(mv)
    }
}
