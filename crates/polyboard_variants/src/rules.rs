//! Shared shape of every variant's rules, and the adapter that exposes
//! them through the engine boundary.

use crate::search;
use polyboard_core::{GamePosition, Move, SearchLimits, SearchReport};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Side {
    First,
    Second,
}

impl Side {
    pub(crate) fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Win(Side),
    Draw,
}

impl Outcome {
    /// Decides a game by comparing final scores.
    pub(crate) fn by_score(first: i32, second: i32) -> Self {
        match first.cmp(&second) {
            std::cmp::Ordering::Greater => Self::Win(Side::First),
            std::cmp::Ordering::Less => Self::Win(Side::Second),
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }
}

/// Rules of one variant. Positions are cheap to clone; the search copies
/// them instead of undoing moves.
pub(crate) trait Rules: Clone + Send + 'static {
    const ROWS: usize;
    const COLUMNS: usize;
    const SIDES: [&'static str; 2];

    fn cell_state_count() -> usize;
    fn cell_state_name(state: usize) -> String;

    fn coordinate_labels() -> bool {
        true
    }

    fn start() -> Self;
    fn side(&self) -> Side;
    fn cell(&self, row: usize, column: usize) -> usize;

    fn parse(&self, text: &str) -> Option<Move>;
    fn format(&self, mv: Move) -> String;

    /// Geometry and grammar only; occupancy and ownership are checked by [`play`](Self::play).
    fn well_formed(&self, mv: Move) -> bool;

    /// Plays a move, or returns false and leaves the position untouched.
    fn play(&mut self, mv: Move) -> bool;

    /// Every playable move, including a forced pass.
    fn moves(&self) -> Vec<Move>;

    fn outcome(&self) -> Option<Outcome>;

    /// Static score from the side to move's point of view.
    fn evaluate(&self) -> i32;
}

/// Live game of one variant.
#[derive(Debug, Clone)]
pub(crate) struct Game<R: Rules> {
    state: R,
}

impl<R: Rules> Game<R> {
    pub(crate) fn new() -> Self {
        Self { state: R::start() }
    }
}

impl<R: Rules> GamePosition for Game<R> {
    fn rows(&self) -> usize {
        R::ROWS
    }

    fn columns(&self) -> usize {
        R::COLUMNS
    }

    fn cell_state_count(&self) -> usize {
        R::cell_state_count()
    }

    fn cell_state_asset_name(&self, state: usize) -> String {
        R::cell_state_name(state)
    }

    fn cell_state(&self, row: usize, column: usize) -> usize {
        self.state.cell(row, column)
    }

    fn coordinate_labels(&self) -> bool {
        R::coordinate_labels()
    }

    fn side_to_move(&self) -> String {
        R::SIDES[self.state.side().index()].to_string()
    }

    fn is_game_over(&self) -> bool {
        self.state.outcome().is_some()
    }

    fn winning_side(&self) -> Option<String> {
        match self.state.outcome()? {
            Outcome::Win(side) => Some(R::SIDES[side.index()].to_string()),
            Outcome::Draw => None,
        }
    }

    fn decode_move(&self, text: &str) -> Option<Move> {
        self.state.parse(text)
    }

    fn encode_move(&self, mv: Move) -> String {
        self.state.format(mv)
    }

    fn is_legal(&self, mv: Move) -> bool {
        self.state.well_formed(mv)
    }

    fn apply_move(&mut self, mv: Move) -> bool {
        self.state.outcome().is_none() && self.state.well_formed(mv) && self.state.play(mv)
    }

    fn reset(&mut self) {
        self.state = R::start();
    }

    fn search(&mut self, limits: SearchLimits) -> Option<SearchReport> {
        search::best_move(&self.state, limits)
    }

    fn boxed_clone(&self) -> Box<dyn GamePosition> {
        Box::new(self.clone())
    }
}
