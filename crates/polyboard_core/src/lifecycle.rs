//! Human move handling: parse, validate, legality-check, apply.

use crate::{BoardSession, GameEnd, Move, MoveCodec, SessionError, SessionErrorKind};
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, info, instrument, warn};

/// Stages a proposed move passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MoveStage {
    /// Raw text received.
    Proposed,
    /// Text parsed into an engine move.
    Decoded,
    /// Engine confirmed the value denotes a move.
    Validated,
    /// Move played on the board.
    Applied,
}

/// A move that changed the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct AppliedMove {
    /// Side that moved, read before the move was played.
    mover: String,
    /// Canonical move text.
    text: String,
    /// Engine move value.
    mv: Move,
    /// Terminal status after the move.
    game_end: Option<GameEnd>,
}

impl AppliedMove {
    /// Log line reporting the move.
    pub fn announcement(&self) -> String {
        format!("{} move: {}", self.mover, self.text)
    }
}

/// Result of proposing a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was played.
    Applied(AppliedMove),
    /// The text did not parse; carries the trimmed input.
    MalformedMove(String),
    /// The decoded value is not a move; carries the canonical text.
    InvalidMove(String),
    /// The engine refused the move; carries the canonical text.
    IllegalMove(String),
}

impl MoveOutcome {
    /// Converts rejections into their error kinds.
    #[track_caller]
    pub fn into_result(self) -> Result<AppliedMove, SessionError> {
        match self {
            Self::Applied(applied) => Ok(applied),
            Self::MalformedMove(text) => Err(SessionError::new(SessionErrorKind::MalformedMove { text })),
            Self::InvalidMove(text) => Err(SessionError::new(SessionErrorKind::InvalidMove { text })),
            Self::IllegalMove(text) => Err(SessionError::new(SessionErrorKind::IllegalMove { text })),
        }
    }
}

/// Applies human moves to a session.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveLifecycle;

impl MoveLifecycle {
    /// Runs `text` through the move state machine.
    ///
    /// Fails with `Busy` while an analysis is outstanding and with `GameOver`
    /// once the session is terminal. Rejections by the grammar or the rules
    /// are ordinary outcomes and leave the session unchanged.
    #[instrument(skip(session), fields(session_id = %session.id()))]
    pub fn propose(session: &BoardSession, text: &str) -> Result<MoveOutcome, SessionError> {
        let slot = session.lock_slot();
        if slot.phase.is_pending() {
            warn!(phase = %slot.phase, "Human move refused while computer is thinking");
            return Err(SessionErrorKind::Busy.into());
        }

        let outcome = session.with_game(|game| {
            if game.is_game_over() {
                return Err(SessionError::new(SessionErrorKind::GameOver));
            }

            let text = text.trim();
            debug!(stage = %MoveStage::Proposed, text, "Move proposed");
            let mv = match MoveCodec::decode(game, text) {
                Ok(mv) => mv,
                Err(_) => return Ok(MoveOutcome::MalformedMove(text.to_string())),
            };
            let canonical = MoveCodec::encode(game, mv);
            debug!(stage = %MoveStage::Decoded, %canonical, "Move decoded");

            if !game.is_legal(mv) {
                return Ok(MoveOutcome::InvalidMove(canonical));
            }
            debug!(stage = %MoveStage::Validated, %canonical, "Move validated");

            let mover = game.side_to_move();
            if !game.apply_move(mv) {
                return Ok(MoveOutcome::IllegalMove(canonical));
            }

            let game_end = GameEnd::of(game);
            info!(stage = %MoveStage::Applied, %mover, %canonical, over = game_end.is_some(), "Move applied");
            Ok(MoveOutcome::Applied(AppliedMove::new(mover, canonical, mv, game_end)))
        });
        drop(slot);

        match &outcome {
            Ok(MoveOutcome::Applied(_)) | Err(_) => {}
            Ok(rejected) => warn!(?rejected, "Move rejected"),
        }
        outcome
    }
}
