//! Ataxx on a 7x7 board. A piece either clones into an adjacent empty cell
//! or jumps two cells away, then converts every adjacent enemy piece.

use crate::grid::{PASS, Square, is_pass, parse_pair};
use crate::rules::{Outcome, Rules, Side};
use polyboard_core::Move;

const SIZE: usize = 7;
const EMPTY: u8 = 0;
const ASSETS: [&str; 4] = ["AtaxxEmpty", "AtaxxBlue", "AtaxxRed", "AtaxxBlocked"];

fn piece(side: Side) -> u8 {
    side.index() as u8 + 1
}

fn distance((r1, c1): (usize, usize), (r2, c2): (usize, usize)) -> usize {
    r1.abs_diff(r2).max(c1.abs_diff(c2))
}

fn encode(from: Square, to: Square) -> Move {
    Move::from_raw((from.code() << 16) | to.code())
}

fn decode(mv: Move) -> (Square, Square) {
    (
        Square::from_code(mv.raw() >> 16),
        Square::from_code(mv.raw() & 0xffff),
    )
}

#[derive(Debug, Clone)]
pub(crate) struct Ataxx {
    cells: [[u8; SIZE]; SIZE],
    to_move: Side,
}

impl Ataxx {
    fn cells_of(&self, value: u8) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |column| (row, column)))
            .filter(move |&(row, column)| self.cells[row][column] == value)
    }

    fn count(&self, value: u8) -> i32 {
        self.cells_of(value).count() as i32
    }

    fn endpoints(mv: Move) -> Option<((usize, usize), (usize, usize))> {
        let (from, to) = decode(mv);
        Some((from.to_grid(SIZE, SIZE)?, to.to_grid(SIZE, SIZE)?))
    }

    fn has_moves(&self, side: Side) -> bool {
        let own = piece(side);
        self.cells_of(EMPTY)
            .any(|target| self.cells_of(own).any(|source| distance(source, target) <= 2))
    }

    /// Placements for the side to move, one clone per target cell.
    fn placements(&self) -> Vec<Move> {
        let own = piece(self.to_move);
        let mut moves = Vec::new();
        for target in self.cells_of(EMPTY) {
            let to = Square::from_grid(target.0, target.1, SIZE);
            let sources: Vec<(usize, usize)> = self
                .cells_of(own)
                .filter(|&source| distance(source, target) <= 2)
                .collect();
            if let Some(&clone) = sources.iter().find(|&&s| distance(s, target) == 1) {
                moves.push(encode(Square::from_grid(clone.0, clone.1, SIZE), to));
            }
            moves.extend(
                sources
                    .iter()
                    .filter(|&&s| distance(s, target) == 2)
                    .map(|&(r, c)| encode(Square::from_grid(r, c, SIZE), to)),
            );
        }
        moves
    }
}

impl Rules for Ataxx {
    const ROWS: usize = SIZE;
    const COLUMNS: usize = SIZE;
    const SIDES: [&'static str; 2] = ["Blue", "Red"];

    fn cell_state_count() -> usize {
        ASSETS.len()
    }

    fn cell_state_name(state: usize) -> String {
        ASSETS.get(state).copied().unwrap_or(ASSETS[0]).to_string()
    }

    fn start() -> Self {
        let mut cells = [[EMPTY; SIZE]; SIZE];
        let (blue, red) = (piece(Side::First), piece(Side::Second));
        cells[SIZE - 1][0] = red;
        cells[0][SIZE - 1] = red;
        cells[SIZE - 1][SIZE - 1] = blue;
        cells[0][0] = blue;
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
        parse_pair(text).map(|(from, to)| encode(from, to))
    }

    fn format(&self, mv: Move) -> String {
        if mv == PASS {
            return "Pass".to_string();
        }
        let (from, to) = decode(mv);
        format!("{}{}", from.name(), to.name())
    }

    fn well_formed(&self, mv: Move) -> bool {
        mv == PASS
            || Self::endpoints(mv).is_some_and(|(from, to)| (1..=2).contains(&distance(from, to)))
    }

    fn play(&mut self, mv: Move) -> bool {
        if mv == PASS {
            if self.has_moves(self.to_move) {
                return false;
            }
            self.to_move = self.to_move.other();
            return true;
        }

        let Some((from, to)) = Self::endpoints(mv) else {
            return false;
        };
        let own = piece(self.to_move);
        let reach = distance(from, to);
        if self.cells[from.0][from.1] != own
            || self.cells[to.0][to.1] != EMPTY
            || !(1..=2).contains(&reach)
        {
            return false;
        }

        if reach == 2 {
            self.cells[from.0][from.1] = EMPTY;
        }
        self.cells[to.0][to.1] = own;
        let enemy = piece(self.to_move.other());
        for row in to.0.saturating_sub(1)..=(to.0 + 1).min(SIZE - 1) {
            for column in to.1.saturating_sub(1)..=(to.1 + 1).min(SIZE - 1) {
                if self.cells[row][column] == enemy {
                    self.cells[row][column] = own;
                }
            }
        }
        self.to_move = self.to_move.other();
        true
    }

    fn moves(&self) -> Vec<Move> {
        let moves = self.placements();
        if moves.is_empty() { vec![PASS] } else { moves }
    }

    fn outcome(&self) -> Option<Outcome> {
        let blue = self.count(piece(Side::First));
        let red = self.count(piece(Side::Second));
        let finished = blue == 0
            || red == 0
            || self.count(EMPTY) == 0
            || (!self.has_moves(Side::First) && !self.has_moves(Side::Second));
        finished.then(|| Outcome::by_score(blue, red))
    }

    fn evaluate(&self) -> i32 {
        self.count(piece(self.to_move)) - self.count(piece(self.to_move.other()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(game: &Ataxx, text: &str) -> Move {
        game.parse(text).unwrap()
    }

    #[test]
    fn opening_position() {
        let game = Ataxx::start();
        assert_eq!(ASSETS[game.cell(6, 0)], "AtaxxRed");
        assert_eq!(ASSETS[game.cell(0, 0)], "AtaxxBlue");
        assert_eq!(ASSETS[game.cell(6, 6)], "AtaxxBlue");
        assert_eq!(ASSETS[game.cell(0, 6)], "AtaxxRed");
        assert_eq!(game.side(), Side::First);
    }

    #[test]
    fn moving_an_enemy_piece_is_refused() {
        let mut game = Ataxx::start();
        let a1a2 = mv(&game, "A1A2");
        assert!(game.well_formed(a1a2));
        assert!(!game.play(a1a2));
        assert_eq!(game.side(), Side::First);
    }

    #[test]
    fn out_of_reach_is_not_well_formed() {
        let game = Ataxx::start();
        assert!(!game.well_formed(mv(&game, "A7A4")));
        assert!(!game.well_formed(mv(&game, "A7A7")));
        assert!(!game.well_formed(mv(&game, "A7H8")));
        assert_eq!(game.format(mv(&game, "a7b6")), "A7B6");
    }

    #[test]
    fn clone_keeps_source_and_jump_vacates_it() {
        let mut game = Ataxx::start();
        assert!(game.play(mv(&game, "A7B6")));
        assert_eq!(game.count(piece(Side::First)), 3);
        assert!(game.play(mv(&game, "A1C3")));
        assert_eq!(game.cell(6, 0), usize::from(EMPTY));
        assert_eq!(game.count(piece(Side::Second)), 2);
    }

    #[test]
    fn landing_converts_neighbours() {
        let mut game = Ataxx::start();
        assert!(game.play(mv(&game, "A7B6")));
        assert!(game.play(mv(&game, "A1A3")));
        assert!(game.play(mv(&game, "B6B4")));
        assert_eq!(game.count(piece(Side::First)), 4);
        assert_eq!(game.count(piece(Side::Second)), 1);
    }

    #[test]
    fn pass_only_when_stuck() {
        let mut game = Ataxx::start();
        assert!(!game.play(PASS));
        assert!(game.moves().len() > 1);
    }
}
