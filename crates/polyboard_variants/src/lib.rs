//! Polyboard variants - reference rules and search
//!
//! Five two-player variants behind the [`polyboard_core::Engine`] boundary:
//! Ataxx, Connect 4, Othello, Tic-tac-toe and Kalah. Every variant is
//! searched by the same iterative-deepening alpha-beta, bounded by depth
//! and wall-clock time.
//!
//! Squares are written as a column letter followed by a rank counted from
//! the bottom of the board (`A1` is the bottom-left cell). Ataxx moves name
//! a source and a target (`A7B6`); Connect 4 and Kalah moves are a single
//! letter; Othello and Ataxx accept `pass` when no other move exists.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod ataxx;
mod connect4;
mod engine;
mod grid;
mod kalah;
mod othello;
mod rules;
mod search;
mod tictactoe;

// Crate-level exports - Catalog
pub use engine::{DEFAULT_VARIANT, ReferenceEngine, VariantKind};
