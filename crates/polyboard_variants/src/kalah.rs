//! Kalah with six pits a side and four seeds a pit.
//!
//! Pits are indexed counter-clockwise: South's pits `0..6`, South's store
//! at 6, North's pits `7..13` and North's store at 13. Moves name a pit
//! from the mover's own point of view, `A` being the pit furthest from
//! their store. On the board South sits along the bottom row and North
//! along the top, each store at the end of its owner's sowing direction.

use crate::rules::{Outcome, Rules, Side};
use polyboard_core::Move;

const PITS: usize = 6;
const SEEDS: u8 = 4;
const HOLES: usize = 2 * PITS + 2;
const TOTAL_SEEDS: u8 = 2 * PITS as u8 * SEEDS;
const SOUTH_STORE: usize = PITS;
const NORTH_STORE: usize = HOLES - 1;

const BLANK: usize = 0;
const MAX_COUNTED_SEEDS: u8 = 20;
const MANY_SEEDS: usize = MAX_COUNTED_SEEDS as usize + 2;

/// Sentinel for a move naming something other than a pit.
const STORE: u64 = PITS as u64;

fn base(side: Side) -> usize {
    side.index() * (PITS + 1)
}

fn store(side: Side) -> usize {
    base(side) + PITS
}

fn seed_state(seeds: u8) -> usize {
    if seeds <= MAX_COUNTED_SEEDS {
        usize::from(seeds) + 1
    } else {
        MANY_SEEDS
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Kalah {
    pits: [u8; HOLES],
    to_move: Side,
}

impl Kalah {
    fn side_seeds(&self, side: Side) -> u8 {
        self.pits[base(side)..store(side)].iter().sum()
    }

    /// Reads a drag on the board, which names a pit by the column it
    /// starts from.
    fn parse_drag(&self, text: &[u8]) -> Option<Move> {
        let &[from_file, from_rank, to_file, to_rank] = text else {
            return None;
        };
        let file = |b: u8| (b'A'..=b'H').contains(&b.to_ascii_uppercase());
        let rank = |b: u8| (b'1'..=b'3').contains(&b);
        if !file(from_file) || !rank(from_rank) || !file(to_file) || !rank(to_rank) {
            return None;
        }
        let column = u64::from(from_file.to_ascii_uppercase() - b'A');
        let pit = match self.to_move {
            Side::First => column.checked_sub(1),
            Side::Second => STORE.checked_sub(column),
        };
        Some(Move::from_raw(pit.filter(|&p| p < STORE).unwrap_or(STORE)))
    }

    fn sweep(&mut self) {
        if self.side_seeds(Side::First) > 0 && self.side_seeds(Side::Second) > 0 {
            return;
        }
        for side in [Side::First, Side::Second] {
            let remaining = self.side_seeds(side);
            self.pits[base(side)..store(side)].fill(0);
            self.pits[store(side)] += remaining;
        }
    }
}

impl Rules for Kalah {
    const ROWS: usize = 3;
    const COLUMNS: usize = PITS + 2;
    const SIDES: [&'static str; 2] = ["South", "North"];

    fn cell_state_count() -> usize {
        MANY_SEEDS + 1
    }

    fn cell_state_name(state: usize) -> String {
        match state {
            1 => "KalahPitEmpty".to_string(),
            2..=21 => format!("KalahPit{}Seeds", state - 1),
            MANY_SEEDS => "KalahPitManySeeds".to_string(),
            _ => "KalahBlank".to_string(),
        }
    }

    fn coordinate_labels() -> bool {
        false
    }

    fn start() -> Self {
        let mut pits = [SEEDS; HOLES];
        pits[SOUTH_STORE] = 0;
        pits[NORTH_STORE] = 0;
        Self {
            pits,
            to_move: Side::First,
        }
    }

    fn side(&self) -> Side {
        self.to_move
    }

    fn cell(&self, row: usize, column: usize) -> usize {
        let last = Self::COLUMNS - 1;
        match (row, column) {
            (1, 0) => seed_state(self.pits[NORTH_STORE]),
            (1, c) if c == last => seed_state(self.pits[SOUTH_STORE]),
            (0, c) if (1..last).contains(&c) => seed_state(self.pits[NORTH_STORE - c]),
            (2, c) if (1..last).contains(&c) => seed_state(self.pits[c - 1]),
            _ => BLANK,
        }
    }

    fn parse(&self, text: &str) -> Option<Move> {
        if let Some(mv) = self.parse_drag(text.as_bytes()) {
            return Some(mv);
        }
        let letter = text.chars().find(char::is_ascii_alphabetic)?.to_ascii_uppercase();
        ('A'..='F')
            .contains(&letter)
            .then(|| Move::from_raw(u64::from(letter as u8 - b'A')))
    }

    fn format(&self, mv: Move) -> String {
        if mv.raw() < STORE {
            char::from(b'A' + mv.raw() as u8).to_string()
        } else {
            "Store".to_string()
        }
    }

    fn well_formed(&self, mv: Move) -> bool {
        mv.raw() < STORE
    }

    fn play(&mut self, mv: Move) -> bool {
        if mv.raw() >= STORE {
            return false;
        }
        let mover = self.to_move;
        let start = base(mover) + mv.raw() as usize;
        let mut seeds = self.pits[start];
        if seeds == 0 {
            return false;
        }

        self.pits[start] = 0;
        let skip = store(mover.other());
        let mut hole = start;
        while seeds > 0 {
            hole = (hole + 1) % HOLES;
            if hole == skip {
                continue;
            }
            self.pits[hole] += 1;
            seeds -= 1;
        }

        let own_pits = base(mover)..store(mover);
        let opposite = (2 * PITS).wrapping_sub(hole);
        if own_pits.contains(&hole) && self.pits[hole] == 1 && self.pits[opposite] > 0 {
            self.pits[store(mover)] += self.pits[opposite] + 1;
            self.pits[hole] = 0;
            self.pits[opposite] = 0;
        }

        self.sweep();
        let extra_turn = hole == store(mover) && self.outcome().is_none();
        if !extra_turn {
            self.to_move = mover.other();
        }
        true
    }

    /// Pits nearest the store first, as those sow into it most often.
    fn moves(&self) -> Vec<Move> {
        let first = base(self.to_move);
        (0..PITS as u64)
            .rev()
            .filter(|&pit| self.pits[first + pit as usize] > 0)
            .map(Move::from_raw)
            .collect()
    }

    fn outcome(&self) -> Option<Outcome> {
        let (south, north) = (self.pits[SOUTH_STORE], self.pits[NORTH_STORE]);
        (south + north == TOTAL_SEEDS).then(|| Outcome::by_score(i32::from(south), i32::from(north)))
    }

    fn evaluate(&self) -> i32 {
        let (me, them) = (self.to_move, self.to_move.other());
        let stores = i32::from(self.pits[store(me)]) - i32::from(self.pits[store(them)]);
        let seeds = i32::from(self.side_seeds(me)) - i32::from(self.side_seeds(them));
        stores * 4 + seeds
    }
}
