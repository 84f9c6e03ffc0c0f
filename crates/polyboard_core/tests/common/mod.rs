//! Shared fixtures: a scripted engine and a recording presentation.

#![allow(dead_code)]

use polyboard_core::{BoardView, Engine, GamePosition, Move, Presentation, SearchLimits, SearchReport};
use std::sync::{Arc, Condvar, Mutex};

/// Blocks scripted searches until released.
#[derive(Clone, Default)]
pub struct Gate {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Gate {
    pub fn release(&self) {
        let (open, signal) = &*self.inner;
        *open.lock().unwrap() = true;
        signal.notify_all();
    }

    fn wait(&self) {
        let (open, signal) = &*self.inner;
        let mut guard = open.lock().unwrap();
        while !*guard {
            guard = signal.wait(guard).unwrap();
        }
    }
}

/// Variants: 0 "Strip" (1x3), 1 "Wide strip" (2x4, no labels), 2 "Corrupt"
/// (reports a cell state outside its vocabulary).
///
/// Moves are column digits starting at 1. A column may be marked once; the
/// game ends when the first row is full and whoever marked last wins.
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    pub gate: Option<Gate>,
    pub fail_search: bool,
    pub panic_search: bool,
}

impl ScriptedEngine {
    pub fn gated(gate: Gate) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_search: true,
            ..Self::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panic_search: true,
            ..Self::default()
        }
    }
}

const NAMES: [&str; 3] = ["Strip", "Wide strip", "Corrupt"];

impl Engine for ScriptedEngine {
    fn variant_count(&self) -> usize {
        NAMES.len()
    }

    fn variant_name(&self, index: usize) -> Option<String> {
        NAMES.get(index).map(|name| name.to_string())
    }

    fn new_game(&self, index: usize) -> Option<Box<dyn GamePosition>> {
        let (rows, columns) = match index {
            0 | 2 => (1, 3),
            1 => (2, 4),
            _ => return None,
        };
        Some(Box::new(StripGame {
            rows,
            columns,
            labels: index != 1,
            corrupt: index == 2,
            cells: vec![false; columns],
            first_to_move: true,
            last_mover: None,
            gate: self.gate.clone(),
            fail_search: self.fail_search,
            panic_search: self.panic_search,
        }))
    }
}

#[derive(Clone)]
struct StripGame {
    rows: usize,
    columns: usize,
    labels: bool,
    corrupt: bool,
    cells: Vec<bool>,
    first_to_move: bool,
    last_mover: Option<bool>,
    gate: Option<Gate>,
    fail_search: bool,
    panic_search: bool,
}

fn side_name(first: bool) -> String {
    if first { "First" } else { "Second" }.to_string()
}

impl GamePosition for StripGame {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn cell_state_count(&self) -> usize {
        2
    }

    fn cell_state_asset_name(&self, state: usize) -> String {
        if state == 0 { "StripEmpty" } else { "StripMark" }.to_string()
    }

    fn cell_state(&self, row: usize, column: usize) -> usize {
        if self.corrupt {
            return 99;
        }
        if row == 0 && self.cells[column] { 1 } else { 0 }
    }

    fn coordinate_labels(&self) -> bool {
        self.labels
    }

    fn side_to_move(&self) -> String {
        side_name(self.first_to_move)
    }

    fn is_game_over(&self) -> bool {
        self.cells.iter().all(|&marked| marked)
    }

    fn winning_side(&self) -> Option<String> {
        if self.is_game_over() {
            self.last_mover.map(side_name)
        } else {
            None
        }
    }

    fn decode_move(&self, text: &str) -> Option<Move> {
        let mut chars = text.chars();
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() || digit == 0 {
            return None;
        }
        Some(Move::from_raw(u64::from(digit)))
    }

    fn encode_move(&self, mv: Move) -> String {
        mv.raw().to_string()
    }

    fn is_legal(&self, mv: Move) -> bool {
        (1..=self.columns as u64).contains(&mv.raw())
    }

    fn apply_move(&mut self, mv: Move) -> bool {
        if !self.is_legal(mv) {
            return false;
        }
        let column = mv.raw() as usize - 1;
        if self.cells[column] {
            return false;
        }
        self.cells[column] = true;
        self.last_mover = Some(self.first_to_move);
        self.first_to_move = !self.first_to_move;
        true
    }

    fn reset(&mut self) {
        self.cells = vec![false; self.columns];
        self.first_to_move = true;
        self.last_mover = None;
    }

    fn search(&mut self, _limits: SearchLimits) -> Option<SearchReport> {
        if let Some(gate) = &self.gate {
            gate.wait();
        }
        if self.fail_search {
            return None;
        }
        if self.panic_search {
            panic!("scripted engine blew up");
        }
        let column = self.cells.iter().position(|&marked| !marked)?;
        Some(SearchReport::new(
            Move::from_raw(column as u64 + 1),
            7,
            vec!["scripted search".to_string()],
        ))
    }

    fn boxed_clone(&self) -> Box<dyn GamePosition> {
        Box::new(self.clone())
    }
}

/// Presentation that records every call.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub logs: Vec<String>,
    pub boards: Vec<BoardView>,
    pub status: String,
    pub title: String,
}

impl RecordingPresentation {
    pub fn contains(&self, line: &str) -> bool {
        self.logs.iter().any(|logged| logged == line)
    }
}

impl Presentation for RecordingPresentation {
    fn log_line(&mut self, text: &str) {
        self.logs.push(text.to_string());
    }

    fn render_board(&mut self, view: &BoardView) {
        self.boards.push(view.clone());
    }

    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }
}

/// Polls `done` until it holds or five seconds pass.
pub fn wait_until(mut done: impl FnMut() -> bool) -> bool {
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while std::time::Instant::now() < deadline {
        if done() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    done()
}
