//! Connect 4: discs drop into one of seven columns of a six-row rack.

use crate::rules::{Outcome, Rules, Side};
use polyboard_core::Move;

const ROWS: usize = 6;
const COLUMNS: usize = 7;
const EMPTY: u8 = 0;
const ASSETS: [&str; 3] = ["Connect4Empty", "Connect4Blue", "Connect4Red"];

/// Search order, centre columns first.
const COLUMN_ORDER: [usize; COLUMNS] = [3, 2, 4, 1, 5, 0, 6];

const LINE_STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

fn disc(side: Side) -> u8 {
    side.index() as u8 + 1
}

#[derive(Debug, Clone)]
pub(crate) struct ConnectFour {
    cells: [[u8; COLUMNS]; ROWS],
    to_move: Side,
    winner: Option<Side>,
}

impl ConnectFour {
    fn at(&self, row: isize, column: isize) -> Option<u8> {
        let row = usize::try_from(row).ok()?;
        let column = usize::try_from(column).ok()?;
        self.cells.get(row)?.get(column).copied()
    }

    fn makes_four(&self, row: usize, column: usize) -> bool {
        let own = self.cells[row][column];
        let (row, column) = (row as isize, column as isize);
        LINE_STEPS.iter().any(|&(dr, dc)| {
            let run = |sign: isize| {
                (1..4)
                    .take_while(|&n| self.at(row + sign * n * dr, column + sign * n * dc) == Some(own))
                    .count()
            };
            1 + run(1) + run(-1) >= 4
        })
    }

    /// Sum over every four-cell window that only one side occupies.
    fn window_score(&self, side: Side) -> i32 {
        let (own, other) = (disc(side), disc(side.other()));
        let mut score = 0;
        for row in 0..ROWS as isize {
            for column in 0..COLUMNS as isize {
                for &(dr, dc) in &LINE_STEPS {
                    let window: Option<Vec<u8>> = (0..4)
                        .map(|n| self.at(row + n * dr, column + n * dc))
                        .collect();
                    let Some(window) = window else { continue };
                    let mine = window.iter().filter(|&&c| c == own).count();
                    let theirs = window.iter().filter(|&&c| c == other).count();
                    score += match (mine, theirs) {
                        (m, 0) => (m * m) as i32,
                        (0, t) => -((t * t) as i32),
                        _ => 0,
                    };
                }
            }
        }
        score
    }
}

impl Rules for ConnectFour {
    const ROWS: usize = ROWS;
    const COLUMNS: usize = COLUMNS;
    const SIDES: [&'static str; 2] = ["Blue", "Red"];

    fn cell_state_count() -> usize {
        ASSETS.len()
    }

    fn cell_state_name(state: usize) -> String {
        ASSETS.get(state).copied().unwrap_or(ASSETS[0]).to_string()
    }

    fn start() -> Self {
        Self {
            cells: [[EMPTY; COLUMNS]; ROWS],
            to_move: Side::First,
            winner: None,
        }
    }

    fn side(&self) -> Side {
        self.to_move
    }

    fn cell(&self, row: usize, column: usize) -> usize {
        usize::from(self.cells[row][column])
    }

    /// The first column letter or column number found anywhere in the text.
    fn parse(&self, text: &str) -> Option<Move> {
        text.bytes().find_map(|b| {
            let b = b.to_ascii_uppercase();
            let column = match b {
                b'A'..=b'Z' => usize::from(b - b'A'),
                b'1'..=b'9' => usize::from(b - b'1'),
                _ => return None,
            };
            (column < COLUMNS).then(|| Move::from_raw(column as u64))
        })
    }

    fn format(&self, mv: Move) -> String {
        char::from(b'A' + (mv.raw() as u8)).to_string()
    }

    fn well_formed(&self, mv: Move) -> bool {
        (mv.raw() as usize) < COLUMNS
    }

    fn play(&mut self, mv: Move) -> bool {
        let column = mv.raw() as usize;
        if column >= COLUMNS {
            return false;
        }
        let Some(row) = (0..ROWS).rev().find(|&row| self.cells[row][column] == EMPTY) else {
            return false;
        };
        self.cells[row][column] = disc(self.to_move);
        if self.makes_four(row, column) {
            self.winner = Some(self.to_move);
        }
        self.to_move = self.to_move.other();
        true
    }

    fn moves(&self) -> Vec<Move> {
        COLUMN_ORDER
            .iter()
            .filter(|&&column| self.cells[0][column] == EMPTY)
            .map(|&column| Move::from_raw(column as u64))
            .collect()
    }

    fn outcome(&self) -> Option<Outcome> {
        if let Some(side) = self.winner {
            return Some(Outcome::Win(side));
        }
        self.cells[0]
            .iter()
            .all(|&cell| cell != EMPTY)
            .then_some(Outcome::Draw)
    }

    fn evaluate(&self) -> i32 {
        self.window_score(self.to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_letter_or_digit_names_the_column() {
        let game = ConnectFour::start();
        assert_eq!(game.parse("C3C3").map(Move::raw), Some(2));
        assert_eq!(game.parse("4").map(Move::raw), Some(3));
        assert_eq!(game.parse("  g"), Some(Move::from_raw(6)));
        assert_eq!(game.parse("ZZ99"), None);
        assert_eq!(game.format(Move::from_raw(2)), "C");
    }

    #[test]
    fn discs_stack_from_the_bottom() {
        let mut game = ConnectFour::start();
        assert!(game.play(Move::from_raw(3)));
        assert!(game.play(Move::from_raw(3)));
        assert_eq!(game.cell(5, 3), 1);
        assert_eq!(game.cell(4, 3), 2);
    }

    #[test]
    fn full_column_is_refused() {
        let mut game = ConnectFour::start();
        for _ in 0..ROWS {
            assert!(game.play(Move::from_raw(0)));
        }
        assert!(game.well_formed(Move::from_raw(0)));
        assert!(!game.play(Move::from_raw(0)));
        assert!(!game.moves().contains(&Move::from_raw(0)));
    }

    #[test]
    fn four_across_wins() {
        let mut game = ConnectFour::start();
        for column in [0, 0, 1, 1, 2, 2, 3] {
            assert!(game.play(Move::from_raw(column)));
        }
        assert_eq!(game.outcome(), Some(Outcome::Win(Side::First)));
    }
}
