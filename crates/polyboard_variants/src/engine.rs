//! The catalog of bundled variants.

use crate::ataxx::Ataxx;
use crate::connect4::ConnectFour;
use crate::kalah::Kalah;
use crate::othello::Othello;
use crate::rules::Game;
use crate::tictactoe::TicTacToe;
use polyboard_core::{Engine, GamePosition};
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, instrument};

/// Bundled variants, in catalog order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
)]
pub enum VariantKind {
    /// 7x7 cloning and jumping.
    Ataxx,
    /// Gravity four-in-a-row.
    #[strum(to_string = "Connect 4")]
    ConnectFour,
    /// Reversi on an 8x8 board.
    Othello,
    /// Three in a row on a 3x3 grid.
    #[strum(to_string = "Tic-tac-toe")]
    TicTacToe,
    /// Six-pit sowing game.
    Kalah,
}

/// Variant a new session starts with.
pub const DEFAULT_VARIANT: VariantKind = VariantKind::Kalah;

impl VariantKind {
    /// Variant at a catalog index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Catalog index of this variant.
    pub fn index(self) -> usize {
        Self::iter().position(|kind| kind == self).unwrap_or_default()
    }

    /// Starting position of this variant.
    pub fn new_game(self) -> Box<dyn GamePosition> {
        match self {
            Self::Ataxx => Box::new(Game::<Ataxx>::new()),
            Self::ConnectFour => Box::new(Game::<ConnectFour>::new()),
            Self::Othello => Box::new(Game::<Othello>::new()),
            Self::TicTacToe => Box::new(Game::<TicTacToe>::new()),
            Self::Kalah => Box::new(Game::<Kalah>::new()),
        }
    }
}

/// Rules and search for every [`VariantKind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEngine;

impl Engine for ReferenceEngine {
    fn variant_count(&self) -> usize {
        VariantKind::COUNT
    }

    fn variant_name(&self, index: usize) -> Option<String> {
        VariantKind::from_index(index).map(|kind| kind.to_string())
    }

    #[instrument(skip(self))]
    fn new_game(&self, index: usize) -> Option<Box<dyn GamePosition>> {
        let kind = VariantKind::from_index(index)?;
        debug!(%kind, "Creating game");
        Some(kind.new_game())
    }
}
