//! Othello on an 8x8 board. Black moves first; a side without a flipping
//! placement must pass.

use crate::grid::{DIRECTIONS, PASS, Square, is_pass, parse_target, step};
use crate::rules::{Outcome, Rules, Side};
use polyboard_core::Move;

const SIZE: usize = 8;
const EMPTY: u8 = 0;
const ASSETS: [&str; 3] = ["OthelloEmpty", "OthelloBlack", "OthelloWhite"];
const CORNER_WEIGHT: i32 = 25;
const MOBILITY_WEIGHT: i32 = 2;

fn disc(side: Side) -> u8 {
    side.index() as u8 + 1
}

#[derive(Debug, Clone)]
pub(crate) struct Othello {
    cells: [[u8; SIZE]; SIZE],
    to_move: Side,
}

impl Othello {
    fn flips(&self, row: usize, column: usize, side: Side) -> Vec<(usize, usize)> {
        if self.cells[row][column] != EMPTY {
            return Vec::new();
        }
        let (own, other) = (disc(side), disc(side.other()));
        let mut flipped = Vec::new();
        for &direction in &DIRECTIONS {
            let mut run = Vec::new();
            let mut cursor = step(row, column, direction, SIZE, SIZE);
            while let Some((r, c)) = cursor {
                match self.cells[r][c] {
                    cell if cell == other => run.push((r, c)),
                    cell if cell == own => {
                        flipped.append(&mut run);
                        break;
                    }
                    _ => break,
                }
                cursor = step(r, c, direction, SIZE, SIZE);
            }
        }
        flipped
    }

    fn placements(&self, side: Side) -> Vec<(usize, usize)> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |column| (row, column)))
            .filter(|&(row, column)| !self.flips(row, column, side).is_empty())
            .collect()
    }

    fn count(&self, side: Side) -> i32 {
        let own = disc(side);
        self.cells.iter().flatten().filter(|&&cell| cell == own).count() as i32
    }

    fn corners(&self, side: Side) -> i32 {
        let own = disc(side);
        [(0, 0), (0, SIZE - 1), (SIZE - 1, 0), (SIZE - 1, SIZE - 1)]
            .iter()
            .filter(|&&(r, c)| self.cells[r][c] == own)
            .count() as i32
    }
}

impl Rules for Othello {
    const ROWS: usize = SIZE;
    const COLUMNS: usize = SIZE;
    const SIDES: [&'static str; 2] = ["Black", "White"];

    fn cell_state_count() -> usize {
        ASSETS.len()
    }

    fn cell_state_name(state: usize) -> String {
        ASSETS.get(state).copied().unwrap_or(ASSETS[0]).to_string()
    }

    fn start() -> Self {
        let mut cells = [[EMPTY; SIZE]; SIZE];
        let (black, white) = (disc(Side::First), disc(Side::Second));
        for (name, value) in [("D4", white), ("E5", white), ("D5", black), ("E4", black)] {
            if let Some((row, column)) = parse_target(name).and_then(|sq| sq.to_grid(SIZE, SIZE)) {
                cells[row][column] = value;
            }
        }
        Self {
            cells,
            to_move: Side::First,
        }
    }

    fn side(&self) -> Side {
        self.to_move
    }

    fn cell(&self, row: usize, column: usize) -> usize {
        usize::from(self.cells[row][column])
    }

    fn parse(&self, text: &str) -> Option<Move> {
        if is_pass(text) {
            return Some(PASS);
        }
        parse_target(text).map(|square| Move::from_raw(square.code()))
    }

    fn format(&self, mv: Move) -> String {
        if mv == PASS {
            "Pass".to_string()
        } else {
            Square::from_code(mv.raw()).name()
        }
    }

    fn well_formed(&self, mv: Move) -> bool {
        mv == PASS || Square::from_code(mv.raw()).to_grid(SIZE, SIZE).is_some()
    }

    fn play(&mut self, mv: Move) -> bool {
        if mv == PASS {
            if !self.placements(self.to_move).is_empty() {
                return false;
            }
            self.to_move = self.to_move.other();
            return true;
        }

        let Some((row, column)) = Square::from_code(mv.raw()).to_grid(SIZE, SIZE) else {
            return false;
        };
        let flipped = self.flips(row, column, self.to_move);
        if flipped.is_empty() {
            return false;
        }
        let own = disc(self.to_move);
        self.cells[row][column] = own;
        for (r, c) in flipped {
            self.cells[r][c] = own;
        }
        self.to_move = self.to_move.other();
        true
    }

    fn moves(&self) -> Vec<Move> {
        let moves: Vec<Move> = self
            .placements(self.to_move)
            .into_iter()
            .map(|(row, column)| Move::from_raw(Square::from_grid(row, column, SIZE).code()))
            .collect();
        if moves.is_empty() { vec![PASS] } else { moves }
    }

    fn outcome(&self) -> Option<Outcome> {
        if !self.placements(Side::First).is_empty() || !self.placements(Side::Second).is_empty() {
            return None;
        }
        Some(Outcome::by_score(self.count(Side::First), self.count(Side::Second)))
    }

    fn evaluate(&self) -> i32 {
        let (me, them) = (self.to_move, self.to_move.other());
        let discs = self.count(me) - self.count(them);
        let corners = self.corners(me) - self.corners(them);
        let mobility = self.placements(me).len() as i32 - self.placements(them).len() as i32;
        discs + CORNER_WEIGHT * corners + MOBILITY_WEIGHT * mobility
    }
}
