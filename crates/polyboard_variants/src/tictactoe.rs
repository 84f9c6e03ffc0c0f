//! Tic-tac-toe on a 3x3 grid. Crosses move first.

use crate::grid::{Square, parse_target};
use crate::rules::{Outcome, Rules, Side};
use polyboard_core::Move;

const SIZE: usize = 3;
const EMPTY: u8 = 0;
const ASSETS: [&str; 3] = ["TicTacToeEmpty", "TicTacToeCross", "TicTacToeNought"];

const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

fn mark(side: Side) -> u8 {
    side.index() as u8 + 1
}

#[derive(Debug, Clone)]
pub(crate) struct TicTacToe {
    cells: [[u8; SIZE]; SIZE],
    to_move: Side,
}

impl TicTacToe {
    fn line_owner(&self, line: &[(usize, usize); 3]) -> Option<u8> {
        let [a, b, c] = line.map(|(r, c)| self.cells[r][c]);
        (a != EMPTY && a == b && b == c).then_some(a)
    }

    fn open_lines(&self, side: Side) -> i32 {
        let opponent = mark(side.other());
        LINES
            .iter()
            .filter(|line| line.iter().all(|&(r, c)| self.cells[r][c] != opponent))
            .count() as i32
    }
}

impl Rules for TicTacToe {
    const ROWS: usize = SIZE;
    const COLUMNS: usize = SIZE;
    const SIDES: [&'static str; 2] = ["Crosses", "Noughts"];

    fn cell_state_count() -> usize {
        ASSETS.len()
    }

    fn cell_state_name(state: usize) -> String {
        ASSETS.get(state).copied().unwrap_or(ASSETS[0]).to_string()
    }

    fn start() -> Self {
        Self {
            cells: [[EMPTY; SIZE]; SIZE],
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
        parse_target(text).map(|square| Move::from_raw(square.code()))
    }

    fn format(&self, mv: Move) -> String {
        Square::from_code(mv.raw()).name()
    }

    fn well_formed(&self, mv: Move) -> bool {
        Square::from_code(mv.raw()).to_grid(SIZE, SIZE).is_some()
    }

    fn play(&mut self, mv: Move) -> bool {
        let Some((row, column)) = Square::from_code(mv.raw()).to_grid(SIZE, SIZE) else {
            return false;
        };
        if self.cells[row][column] != EMPTY {
            return false;
        }
        self.cells[row][column] = mark(self.to_move);
        self.to_move = self.to_move.other();
        true
    }

    fn moves(&self) -> Vec<Move> {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |column| (row, column)))
            .filter(|&(row, column)| self.cells[row][column] == EMPTY)
            .map(|(row, column)| Move::from_raw(Square::from_grid(row, column, SIZE).code()))
            .collect()
    }

    fn outcome(&self) -> Option<Outcome> {
        if let Some(owner) = LINES.iter().find_map(|line| self.line_owner(line)) {
            let winner = if owner == mark(Side::First) { Side::First } else { Side::Second };
            return Some(Outcome::Win(winner));
        }
        self.cells
            .iter()
            .flatten()
            .all(|&cell| cell != EMPTY)
            .then_some(Outcome::Draw)
    }

    fn evaluate(&self) -> i32 {
        self.open_lines(self.to_move) - self.open_lines(self.to_move.other())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_all(game: &mut TicTacToe, moves: &[&str]) {
        for text in moves {
            let mv = game.parse(text).unwrap();
            assert!(game.play(mv), "{text} should be playable");
        }
    }

    #[test]
    fn row_one_is_the_bottom_row() {
        let mut game = TicTacToe::start();
        play_all(&mut game, &["A1"]);
        assert_eq!(game.cell(2, 0), 1);
        assert_eq!(game.side(), Side::Second);
    }

    #[test]
    fn occupied_square_is_refused() {
        let mut game = TicTacToe::start();
        play_all(&mut game, &["B2"]);
        let again = game.parse("B2").unwrap();
        assert!(game.well_formed(again));
        assert!(!game.play(again));
        assert_eq!(game.side(), Side::Second);
    }

    #[test]
    fn three_in_a_row_wins() {
        let mut game = TicTacToe::start();
        play_all(&mut game, &["A1", "A2", "B1", "B2", "C1"]);
        assert_eq!(game.outcome(), Some(Outcome::Win(Side::First)));
    }

    #[test]
    fn full_board_without_line_is_drawn() {
        let mut game = TicTacToe::start();
        play_all(
            &mut game,
            &["A1", "B1", "C1", "B2", "A2", "A3", "B3", "C2", "C3"],
        );
        assert_eq!(game.outcome(), Some(Outcome::Draw));
    }
}
