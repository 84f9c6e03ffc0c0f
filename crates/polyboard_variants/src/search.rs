//! Iterative-deepening negamax with alpha-beta pruning.
//!
//! Each completed depth yields a best move and a progress line. Depth 1 is
//! always completed; deeper iterations are abandoned when the time bound
//! elapses and the previous iteration's move stands. Moves that keep the
//! same side to move (an extra turn) are searched without negation.

use crate::rules::{Outcome, Rules};
use polyboard_core::{Move, SearchLimits, SearchReport};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Score of a won position, less the distance to the win.
pub(crate) const WIN: i32 = 100_000;

const CLOCK_CHECK_INTERVAL: u64 = 256;

/// Searches `root` within `limits`, `None` when there is no move to make.
#[instrument(skip(root))]
pub(crate) fn best_move<R: Rules>(root: &R, limits: SearchLimits) -> Option<SearchReport> {
    if root.outcome().is_some() {
        return None;
    }
    let mut order = root.moves();
    if order.is_empty() {
        return None;
    }

    let deadline = Instant::now() + Duration::from_secs(u64::from(*limits.time_secs()));
    let max_depth = (*limits.depth()).max(1);
    let mut best: Option<(Move, i32)> = None;
    let mut info = Vec::new();
    let mut total_nodes = 0;

    for depth in 1..=max_depth {
        let mut searcher = Searcher {
            deadline,
            enforce_deadline: depth > 1,
            nodes: 0,
            aborted: false,
        };
        let result = searcher.root(root, &order, depth);
        total_nodes += searcher.nodes;
        if searcher.aborted {
            debug!(depth, "Iteration abandoned at time bound");
            break;
        }
        let Some((mv, value)) = result else {
            break;
        };

        info.push(format!(
            "depth {}: {} value {} ({} nodes)",
            depth,
            root.format(mv),
            value,
            searcher.nodes
        ));
        best = Some((mv, value));

        if let Some(position) = order.iter().position(|&m| m == mv) {
            order[..=position].rotate_right(1);
        }
        if value.abs() >= WIN - 1_000 {
            break;
        }
    }

    let (mv, value) = best?;
    debug!(total_nodes, value, "Search complete");
    Some(SearchReport::new(mv, value, info))
}

struct Searcher {
    deadline: Instant,
    enforce_deadline: bool,
    nodes: u64,
    aborted: bool,
}

impl Searcher {
    fn root<R: Rules>(&mut self, state: &R, order: &[Move], depth: u32) -> Option<(Move, i32)> {
        let mut alpha = -WIN - 1;
        let beta = WIN + 1;
        let mut best = None;

        for &mv in order {
            let mut child = state.clone();
            if !child.play(mv) {
                continue;
            }
            let score = self.child_score(state, &child, depth - 1, alpha, beta, 1);
            if self.aborted {
                return None;
            }
            if best.is_none() || score > alpha {
                alpha = alpha.max(score);
                best = Some((mv, score));
            }
        }
        best
    }

    fn child_score<R: Rules>(
        &mut self,
        parent: &R,
        child: &R,
        depth: u32,
        alpha: i32,
        beta: i32,
        ply: i32,
    ) -> i32 {
        if child.side() == parent.side() {
            self.negamax(child, depth, alpha, beta, ply)
        } else {
            -self.negamax(child, depth, -beta, -alpha, ply)
        }
    }

    fn negamax<R: Rules>(&mut self, state: &R, depth: u32, mut alpha: i32, beta: i32, ply: i32) -> i32 {
        self.nodes += 1;
        if self.enforce_deadline
            && self.nodes % CLOCK_CHECK_INTERVAL == 0
            && Instant::now() >= self.deadline
        {
            self.aborted = true;
        }
        if self.aborted {
            return 0;
        }

        if let Some(outcome) = state.outcome() {
            return match outcome {
                Outcome::Draw => 0,
                Outcome::Win(side) if side == state.side() => WIN - ply,
                Outcome::Win(_) => -(WIN - ply),
            };
        }
        if depth == 0 {
            return state.evaluate();
        }

        let mut best = -WIN - 1;
        for mv in state.moves() {
            let mut child = state.clone();
            if !child.play(mv) {
                continue;
            }
            let score = self.child_score(state, &child, depth - 1, alpha, beta, ply + 1);
            if self.aborted {
                return 0;
            }
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if best == -WIN - 1 {
            state.evaluate()
        } else {
            best
        }
    }
}
