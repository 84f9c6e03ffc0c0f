//! Background search worker bound to one session.
//!
//! Each coordinator owns a single long-lived thread that sleeps on a signal
//! channel between requests. Requests go through the session's one-slot
//! analysis state; results travel back on an unbounded channel that the
//! interactive context drains at its own pace.

use crate::{
    AnalysisPhase, AnalysisRequest, BoardSession, GameEnd, Move, MoveCodec, SearchLimits,
    SessionError, SessionErrorKind, SessionId,
};
use derive_getters::Getters;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, instrument, warn};

/// What to do with the searched move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum AnalysisKind {
    /// Play the move for the side to move.
    Move,
    /// Report the move without playing it.
    Hint,
}

/// Completed search result.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct AnalysisReport {
    /// Session the search ran on.
    session: SessionId,
    /// Requested kind.
    kind: AnalysisKind,
    /// Side the move was found for.
    mover: String,
    /// Canonical move text.
    text: String,
    /// Engine move value.
    mv: Move,
    /// Estimated value for the mover.
    value: i32,
    /// Whether the move was played.
    applied: bool,
    /// Terminal status after the move, when it was played.
    game_end: Option<GameEnd>,
}

impl AnalysisReport {
    /// Log line reporting the result.
    pub fn announcement(&self) -> String {
        match self.kind {
            AnalysisKind::Move => format!(
                "{} move: {} (estimated value {})",
                self.mover, self.text, self.value
            ),
            AnalysisKind::Hint => format!(
                "Suggestion for {}: {} (estimated value {})",
                self.mover, self.text, self.value
            ),
        }
    }
}

/// Messages from the worker to the interactive context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// Engine progress text.
    Info {
        /// Originating session.
        session: SessionId,
        /// One line of output.
        line: String,
    },
    /// Search finished with a move.
    Finished(AnalysisReport),
    /// Search produced no usable move; the session is unchanged.
    Failed {
        /// Originating session.
        session: SessionId,
        /// Requested kind.
        kind: AnalysisKind,
    },
}

impl AnalysisEvent {
    /// Session the event belongs to.
    pub fn session(&self) -> SessionId {
        match self {
            Self::Info { session, .. } | Self::Failed { session, .. } => *session,
            Self::Finished(report) => report.session,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerSignal {
    Wake,
    Kill,
}

/// Owner of a session's background search worker.
pub struct AnalysisCoordinator {
    session: BoardSession,
    signals: Sender<WorkerSignal>,
    killed: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for AnalysisCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCoordinator")
            .field("session", &self.session.id())
            .field("killed", &self.is_killed())
            .field("joined", &self.handle.is_none())
            .finish()
    }
}

impl AnalysisCoordinator {
    /// Starts the worker thread for `session`.
    #[instrument(skip_all, fields(session_id = %session.id()))]
    pub fn spawn(
        session: BoardSession,
        events: UnboundedSender<AnalysisEvent>,
    ) -> Result<Self, SessionError> {
        let (signals, inbox) = mpsc::channel();
        let killed = Arc::new(AtomicBool::new(false));

        let worker = Worker {
            session: session.clone(),
            inbox,
            killed: Arc::clone(&killed),
            events,
        };
        let handle = std::thread::Builder::new()
            .name(format!("analysis-{}", session.id()))
            .spawn(move || worker.run())
            .map_err(|e| {
                error!(error = %e, "Failed to start analysis worker");
                SessionError::new(SessionErrorKind::WorkerUnavailable {
                    reason: e.to_string(),
                })
            })?;

        Ok(Self {
            session,
            signals,
            killed,
            handle: Some(handle),
        })
    }

    /// Session this coordinator serves.
    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    /// Hands a search to the worker.
    ///
    /// Returns false without changing anything when a request is already
    /// outstanding, the session is terminal, or the worker has been killed.
    #[instrument(skip(self), fields(session_id = %self.session.id()))]
    pub fn request_analysis(&self, limits: SearchLimits, kind: AnalysisKind) -> bool {
        if self.is_killed() {
            debug!("Request refused after kill");
            return false;
        }

        let mut slot = self.session.lock_slot();
        if slot.phase != AnalysisPhase::Idle {
            debug!(phase = %slot.phase, "Request refused, slot occupied");
            return false;
        }
        if self.session.is_terminal() {
            debug!("Request refused, game is over");
            return false;
        }

        if self.signals.send(WorkerSignal::Wake).is_err() {
            warn!("Analysis worker has exited");
            slot.phase = AnalysisPhase::Terminated;
            return false;
        }
        slot.phase = AnalysisPhase::Requested;
        slot.request = Some(AnalysisRequest::new(limits, kind));
        info!(depth = *limits.depth(), time_secs = *limits.time_secs(), %kind, "Analysis requested");
        true
    }

    /// Signals the worker to exit at its next wait point. A request already
    /// handed over still runs first. Never blocks, and only the first call
    /// has any effect.
    #[instrument(skip(self), fields(session_id = %self.session.id()))]
    pub fn kill(&self) {
        if self.killed.swap(true, Ordering::SeqCst) {
            return;
        }

        {
            let mut slot = self.session.lock_slot();
            if slot.phase == AnalysisPhase::Running {
                slot.phase = AnalysisPhase::Cancelling;
            }
        }
        if self.signals.send(WorkerSignal::Kill).is_err() {
            debug!("Worker already gone");
        }
        info!("Analysis worker killed");
    }

    /// Whether [`kill`](Self::kill) has been called.
    pub fn is_killed(&self) -> bool {
        self.killed.load(Ordering::SeqCst)
    }

    /// Whether the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Kills the worker and waits for it to exit. A search in flight runs
    /// to its own bound first.
    #[instrument(skip(self), fields(session_id = %self.session.id()))]
    pub fn shutdown(&mut self) {
        self.kill();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Analysis worker panicked");
            }
            debug!("Analysis worker joined");
        }
    }
}

impl Drop for AnalysisCoordinator {
    fn drop(&mut self) {
        self.kill();
    }
}

struct Worker {
    session: BoardSession,
    inbox: Receiver<WorkerSignal>,
    killed: Arc<AtomicBool>,
    events: UnboundedSender<AnalysisEvent>,
}

impl Worker {
    fn run(self) {
        let session_id = self.session.id();
        info!(%session_id, "Analysis worker started");

        while let Ok(signal) = self.inbox.recv() {
            // Signals are handled in order, so a wake sent before the kill
            // still runs its search.
            if signal == WorkerSignal::Kill {
                break;
            }

            let request = {
                let mut slot = self.session.lock_slot();
                match slot.request.take() {
                    Some(request) if slot.phase == AnalysisPhase::Requested => {
                        slot.phase = if self.killed.load(Ordering::SeqCst) {
                            AnalysisPhase::Cancelling
                        } else {
                            AnalysisPhase::Running
                        };
                        Some(request)
                    }
                    _ => None,
                }
            };
            let Some(request) = request else {
                debug!(%session_id, "Spurious wake ignored");
                continue;
            };

            let kind = *request.kind();
            let event = panic::catch_unwind(AssertUnwindSafe(|| self.analyse(request)))
                .unwrap_or_else(|_| {
                    error!(%session_id, "Engine panicked during analysis");
                    AnalysisEvent::Failed {
                        session: session_id,
                        kind,
                    }
                });

            // Delivery and the return to Idle happen under the slot lock so
            // the interactive side never sees a delivered result with the
            // slot still occupied.
            let mut slot = self.session.lock_slot();
            self.deliver(event);
            if slot.phase == AnalysisPhase::Running {
                slot.phase = AnalysisPhase::Idle;
            }
        }

        let mut slot = self.session.lock_slot();
        slot.phase = AnalysisPhase::Terminated;
        slot.request = None;
        info!(%session_id, "Analysis worker exited");
    }

    #[instrument(skip(self), fields(session_id = %self.session.id()))]
    fn analyse(&self, request: AnalysisRequest) -> AnalysisEvent {
        let session = self.session.id();
        let kind = *request.kind();
        let (mover, mut snapshot) = self
            .session
            .with_game(|game| (game.side_to_move(), game.boxed_clone()));

        let report = snapshot.search(*request.limits());
        drop(snapshot);

        let Some(report) = report else {
            warn!("Search returned no move");
            return AnalysisEvent::Failed { session, kind };
        };
        for line in report.info() {
            self.deliver(AnalysisEvent::Info {
                session,
                line: line.clone(),
            });
        }

        let best = *report.best();
        let outcome = self.session.with_game(|game| {
            let text = MoveCodec::encode(game, best);
            match kind {
                AnalysisKind::Hint => Some((text, false, None)),
                AnalysisKind::Move => game
                    .apply_move(best)
                    .then(|| (text, true, GameEnd::of(game))),
            }
        });

        match outcome {
            Some((text, applied, game_end)) => {
                info!(%mover, %text, value = *report.value(), %kind, "Analysis finished");
                AnalysisEvent::Finished(AnalysisReport {
                    session,
                    kind,
                    mover,
                    text,
                    mv: best,
                    value: *report.value(),
                    applied,
                    game_end,
                })
            }
            None => {
                error!(?best, "Engine refused its own search result");
                AnalysisEvent::Failed { session, kind }
            }
        }
    }

    fn deliver(&self, event: AnalysisEvent) {
        if self.events.send(event).is_err() {
            debug!("Result receiver dropped");
        }
    }
}
