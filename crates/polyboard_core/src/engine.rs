//! Capabilities the session layer consumes from a rules and search provider.
//!
//! An [`Engine`] is a catalog of variants. Each game it creates is a
//! [`GamePosition`] that owns the live position and knows the variant's move
//! grammar, legality rules, and bounded search. The session layer never
//! interprets a [`Move`]; it only carries values between these calls.

use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;

/// Opaque engine-defined move value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("move#{}", _0)]
pub struct Move(u64);

impl Move {
    /// Wraps an engine's internal move encoding.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the engine's internal move encoding.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Depth and time bounds for one search, read when the request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct SearchLimits {
    /// Maximum search depth in plies.
    depth: u32,
    /// Wall-clock budget in seconds.
    time_secs: u32,
}

/// Result of a bounded search.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct SearchReport {
    /// Recommended move for the side to move.
    best: Move,
    /// Estimated value from the perspective of the side to move.
    value: i32,
    /// Progress text produced while searching.
    info: Vec<String>,
}

/// Catalog of playable variants.
pub trait Engine: Send + Sync {
    /// Number of registered variants.
    fn variant_count(&self) -> usize;

    /// Display name of the variant at `index`.
    fn variant_name(&self, index: usize) -> Option<String>;

    /// Creates a game of the variant at `index` in its starting position.
    fn new_game(&self, index: usize) -> Option<Box<dyn GamePosition>>;
}

/// One live game owned by the engine.
///
/// Rows are numbered from the top of the grid. Cell states are indices into
/// the vocabulary described by [`cell_state_count`](Self::cell_state_count)
/// and [`cell_state_asset_name`](Self::cell_state_asset_name).
pub trait GamePosition: Send {
    /// Number of grid rows.
    fn rows(&self) -> usize;

    /// Number of grid columns.
    fn columns(&self) -> usize;

    /// Size of the cell-state vocabulary.
    fn cell_state_count(&self) -> usize;

    /// Asset name used by front ends to draw `state`.
    fn cell_state_asset_name(&self, state: usize) -> String;

    /// Current state of the cell at `row`, `column`.
    fn cell_state(&self, row: usize, column: usize) -> usize;

    /// Whether rank and file labels make sense for this board.
    fn coordinate_labels(&self) -> bool {
        true
    }

    /// Label of the side to move.
    fn side_to_move(&self) -> String;

    /// Whether the position is terminal.
    fn is_game_over(&self) -> bool;

    /// Winner of a terminal position, `None` for a draw or a live game.
    fn winning_side(&self) -> Option<String>;

    /// Parses move text, `None` when it does not fit the grammar.
    fn decode_move(&self, text: &str) -> Option<Move>;

    /// Canonical text for a move.
    fn encode_move(&self, mv: Move) -> String;

    /// Whether the decoded value denotes a move at all.
    fn is_legal(&self, mv: Move) -> bool;

    /// Plays a move, returning false and leaving the position untouched on refusal.
    fn apply_move(&mut self, mv: Move) -> bool;

    /// Restores the starting position.
    fn reset(&mut self);

    /// Runs a bounded search from the current position.
    fn search(&mut self, limits: SearchLimits) -> Option<SearchReport>;

    /// Independent copy of this position.
    fn boxed_clone(&self) -> Box<dyn GamePosition>;
}
