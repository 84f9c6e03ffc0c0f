//! Live game sessions.

use crate::{
    AnalysisKind, Engine, GamePosition, Move, MoveCodec, SearchLimits, SessionError,
    SessionErrorKind, VariantDescriptor, VariantRegistry,
};
use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, instrument, warn};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("session-{}", _0)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Progress of the session's single analysis slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum AnalysisPhase {
    /// No request outstanding.
    #[default]
    Idle,
    /// Accepted, waiting for the worker to wake.
    Requested,
    /// The worker is searching.
    Running,
    /// Killed while a search runs; the search finishes before the worker
    /// exits.
    Cancelling,
    /// The worker has exited; no further requests are accepted.
    Terminated,
}

impl AnalysisPhase {
    /// Whether human moves and resets must be refused.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Requested | Self::Running | Self::Cancelling)
    }
}

/// Parameters captured when an analysis request is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct AnalysisRequest {
    /// Search bounds current at request time.
    limits: SearchLimits,
    /// Whether the result is applied or only reported.
    kind: AnalysisKind,
}

#[derive(Debug, Default)]
pub(crate) struct AnalysisSlot {
    pub(crate) phase: AnalysisPhase,
    pub(crate) request: Option<AnalysisRequest>,
}

/// How a terminal position ended.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameEnd {
    /// Winning side, `None` for a draw.
    winner: Option<String>,
}

impl GameEnd {
    /// Reads the terminal status of a position.
    pub(crate) fn of(game: &dyn GamePosition) -> Option<Self> {
        game.is_game_over().then(|| Self::new(game.winning_side()))
    }

    /// Log line announcing the result.
    pub fn announcement(&self) -> String {
        match &self.winner {
            Some(side) => format!("Game over. {} is victorious.", side),
            None => "Game over. The game is drawn.".to_string(),
        }
    }
}

/// Snapshot of the board for a front end.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct BoardView {
    /// Grid rows.
    rows: usize,
    /// Grid columns.
    columns: usize,
    /// Cell states in row-major order, top row first.
    cells: Vec<usize>,
    /// Asset name for each cell state.
    asset_names: Vec<String>,
    /// Whether rank and file labels are drawn.
    coordinate_labels: bool,
}

impl BoardView {
    /// State of one cell.
    pub fn cell(&self, row: usize, column: usize) -> Option<usize> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Asset name of one cell.
    pub fn asset_at(&self, row: usize, column: usize) -> Option<&str> {
        self.cell(row, column)
            .and_then(|state| self.asset_names.get(state))
            .map(String::as_str)
    }
}

struct SessionCore {
    id: SessionId,
    descriptor: Arc<VariantDescriptor>,
    game: Mutex<Box<dyn GamePosition>>,
    slot: Mutex<AnalysisSlot>,
}

/// One in-progress game of a chosen variant.
///
/// Cloning yields another handle to the same session. The interactive
/// context and the analysis worker each hold one; which of them may mutate
/// the position is decided by the analysis slot. The slot lock is always
/// taken before the position lock.
#[derive(Clone)]
pub struct BoardSession {
    core: Arc<SessionCore>,
}

impl std::fmt::Debug for BoardSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardSession")
            .field("id", &self.core.id)
            .field("variant", self.core.descriptor.name())
            .field("phase", &self.analysis_phase())
            .finish()
    }
}

impl BoardSession {
    /// Starts a fresh game of the variant at `index`.
    #[instrument(skip(engine, registry))]
    pub fn create(
        engine: &dyn Engine,
        registry: &VariantRegistry,
        index: usize,
    ) -> Result<Self, SessionError> {
        let descriptor = registry.describe(index)?;
        let mut game = engine
            .new_game(index)
            .ok_or_else(|| SessionError::out_of_range("variant", index, engine.variant_count()))?;
        game.reset();

        if game.rows() != *descriptor.rows() || game.columns() != *descriptor.columns() {
            error!(
                variant = %descriptor.name(),
                rows = game.rows(),
                columns = game.columns(),
                "Engine board shape disagrees with registry"
            );
            return Err(SessionError::out_of_range("board rows", game.rows(), *descriptor.rows()));
        }

        let id = SessionId::next();
        info!(session_id = %id, variant = %descriptor.name(), "Created board session");
        Ok(Self {
            core: Arc::new(SessionCore {
                id,
                descriptor,
                game: Mutex::new(game),
                slot: Mutex::new(AnalysisSlot::default()),
            }),
        })
    }

    /// Session identity.
    pub fn id(&self) -> SessionId {
        self.core.id
    }

    /// Variant this session plays.
    pub fn descriptor(&self) -> &VariantDescriptor {
        &self.core.descriptor
    }

    /// State of the cell at `row`, `column`.
    pub fn cell_state(&self, row: usize, column: usize) -> Result<usize, SessionError> {
        let descriptor = self.descriptor();
        if row >= *descriptor.rows() {
            return Err(SessionError::out_of_range("row", row, *descriptor.rows()));
        }
        if column >= *descriptor.columns() {
            return Err(SessionError::out_of_range("column", column, *descriptor.columns()));
        }

        let state = self.with_game(|game| game.cell_state(row, column));
        self.check_state(state)
    }

    /// Label of the side to move.
    pub fn side_to_move(&self) -> String {
        self.with_game(|game| game.side_to_move())
    }

    /// Whether the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.with_game(|game| game.is_game_over())
    }

    /// Winner of a finished game; `None` while playing or after a draw.
    pub fn winner(&self) -> Option<String> {
        self.game_end().and_then(|end| end.winner().clone())
    }

    /// Terminal status, if the game has ended.
    pub fn game_end(&self) -> Option<GameEnd> {
        self.with_game(|game| GameEnd::of(game))
    }

    /// Parses move text under this session's grammar.
    pub fn decode(&self, text: &str) -> Result<Move, SessionError> {
        self.with_game(|game| MoveCodec::decode(game, text))
    }

    /// Canonical text for a move under this session's grammar.
    pub fn encode(&self, mv: Move) -> String {
        self.with_game(|game| MoveCodec::encode(game, mv))
    }

    /// Returns to the starting position of the same variant.
    #[instrument(skip(self), fields(session_id = %self.id()))]
    pub fn reset(&self) -> Result<(), SessionError> {
        let slot = self.lock_slot();
        if slot.phase.is_pending() {
            warn!(phase = %slot.phase, "Reset refused while analysis is outstanding");
            return Err(SessionErrorKind::Busy.into());
        }

        self.with_game(|game| game.reset());
        drop(slot);
        info!("Session reset to starting position");
        Ok(())
    }

    /// Current phase of the analysis slot.
    pub fn analysis_phase(&self) -> AnalysisPhase {
        self.lock_slot().phase
    }

    /// Whether an analysis is outstanding.
    pub fn is_analysis_pending(&self) -> bool {
        self.analysis_phase().is_pending()
    }

    /// Snapshot of the whole board.
    pub fn board_view(&self) -> Result<BoardView, SessionError> {
        let descriptor = self.descriptor();
        let (rows, columns) = (*descriptor.rows(), *descriptor.columns());
        let raw: Vec<usize> = self.with_game(|game| {
            (0..rows)
                .flat_map(|row| (0..columns).map(move |column| (row, column)))
                .map(|(row, column)| game.cell_state(row, column))
                .collect()
        });

        let cells = raw
            .into_iter()
            .map(|state| self.check_state(state))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(session_id = %self.id(), rows, columns, "Captured board view");
        Ok(BoardView::new(
            rows,
            columns,
            cells,
            descriptor.cell_states().clone(),
            *descriptor.coordinate_labels(),
        ))
    }

    pub(crate) fn with_game<R>(&self, f: impl FnOnce(&mut dyn GamePosition) -> R) -> R {
        let mut game = self
            .core
            .game
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(game.as_mut())
    }

    pub(crate) fn lock_slot(&self) -> MutexGuard<'_, AnalysisSlot> {
        self.core.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_state(&self, state: usize) -> Result<usize, SessionError> {
        let count = self.descriptor().cell_state_count();
        if state < count {
            Ok(state)
        } else {
            error!(session_id = %self.id(), state, count, "Engine reported a cell state outside its vocabulary");
            Err(SessionError::out_of_range("cell state", state, count))
        }
    }
}
