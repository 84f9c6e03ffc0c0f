//! Facade tying sessions, analysis, and presentation together.

use crate::{
    AnalysisCoordinator, AnalysisEvent, AnalysisKind, AppliedMove, BoardSession, Engine,
    MoveLifecycle, Presentation, SearchLimits, SessionError, SessionErrorKind, SessionId,
    VariantRegistry,
};
use derive_getters::Getters;
use derive_new::new;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, instrument, warn};

/// Default search depth in plies.
pub const DEFAULT_SEARCH_DEPTH: u32 = 5;

/// Default search time in seconds.
pub const DEFAULT_SEARCH_TIME_SECS: u32 = 3;

/// Search bounds used for the next request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct SearchSettings {
    /// Depth bound in plies.
    depth: u32,
    /// Time bound in seconds.
    time_secs: u32,
}

impl SearchSettings {
    /// Bounds handed to the engine.
    pub fn limits(&self) -> SearchLimits {
        SearchLimits::new(self.depth, self.time_secs)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEPTH, DEFAULT_SEARCH_TIME_SECS)
    }
}

/// What a controller call did, for the front end to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlOutcome {
    /// A fresh game is on the board.
    NewGame {
        /// Variant name.
        variant: String,
    },
    /// A human move was played.
    MoveApplied(AppliedMove),
    /// A search was handed to the worker.
    AnalysisStarted(AnalysisKind),
    /// Search bounds changed.
    SettingsChanged(SearchSettings),
    /// The controller stopped.
    ShutDown,
}

/// Owns the current session and its worker, and reports everything that
/// happens to a [`Presentation`].
pub struct SessionController<P: Presentation> {
    engine: Arc<dyn Engine>,
    registry: VariantRegistry,
    presentation: P,
    settings: SearchSettings,
    auto_reply: bool,
    session: BoardSession,
    coordinator: AnalysisCoordinator,
    retired: Vec<AnalysisCoordinator>,
    events_tx: UnboundedSender<AnalysisEvent>,
    events_rx: UnboundedReceiver<AnalysisEvent>,
    shut_down: bool,
}

impl<P: Presentation> SessionController<P> {
    /// Builds the registry and starts a game of the variant at `variant`.
    #[instrument(skip(engine, presentation))]
    pub fn new(
        engine: Arc<dyn Engine>,
        presentation: P,
        variant: usize,
        settings: SearchSettings,
    ) -> Result<Self, SessionError> {
        let registry = VariantRegistry::from_engine(engine.as_ref())?;
        let session = BoardSession::create(engine.as_ref(), &registry, variant)?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let coordinator = AnalysisCoordinator::spawn(session.clone(), events_tx.clone())?;

        let mut controller = Self {
            engine,
            registry,
            presentation,
            settings,
            auto_reply: true,
            session,
            coordinator,
            retired: Vec::new(),
            events_tx,
            events_rx,
            shut_down: false,
        };
        controller.announce_new_game()?;
        info!(variant, "Session controller ready");
        Ok(controller)
    }

    /// Sets whether the computer answers each human move.
    pub fn with_auto_reply(mut self, enabled: bool) -> Self {
        self.auto_reply = enabled;
        self
    }

    /// Replaces the current game with a fresh one of another variant.
    ///
    /// A search still running on the old session finishes on its own and
    /// its result is discarded.
    #[instrument(skip(self))]
    pub fn switch_variant(&mut self, index: usize) -> Result<ControlOutcome, SessionError> {
        self.ensure_live()?;
        let session = BoardSession::create(self.engine.as_ref(), &self.registry, index)
            .map_err(|e| self.surface(e))?;
        let coordinator = AnalysisCoordinator::spawn(session.clone(), self.events_tx.clone())?;

        let old = std::mem::replace(&mut self.coordinator, coordinator);
        old.kill();
        self.retired.push(old);
        self.session = session;
        info!(session_id = %self.session.id(), "Switched variant");

        self.announce_new_game()
    }

    /// Plays a human move given as text.
    #[instrument(skip(self))]
    pub fn submit_human_move(&mut self, text: &str) -> Result<ControlOutcome, SessionError> {
        self.ensure_live()?;
        let applied = MoveLifecycle::propose(&self.session, text)
            .and_then(|outcome| outcome.into_result())
            .map_err(|e| self.surface(e))?;

        self.presentation.log_line(&applied.announcement());
        self.render()?;
        if let Some(end) = applied.game_end() {
            self.presentation.log_line(&end.announcement());
        } else if self.auto_reply
            && !self
                .coordinator
                .request_analysis(self.settings.limits(), AnalysisKind::Move)
        {
            warn!("Automatic reply could not be requested");
        }
        self.refresh_status();

        Ok(ControlOutcome::MoveApplied(applied))
    }

    /// Asks the engine for a suggestion without playing it.
    #[instrument(skip(self))]
    pub fn request_hint(&mut self) -> Result<ControlOutcome, SessionError> {
        self.start_analysis(AnalysisKind::Hint)
    }

    /// Asks the engine to move for the side to move.
    #[instrument(skip(self))]
    pub fn request_computer_move(&mut self) -> Result<ControlOutcome, SessionError> {
        self.start_analysis(AnalysisKind::Move)
    }

    /// Restarts the current variant.
    #[instrument(skip(self))]
    pub fn reset_game(&mut self) -> Result<ControlOutcome, SessionError> {
        self.ensure_live()?;
        self.session.reset().map_err(|e| self.surface(e))?;
        self.announce_new_game()
    }

    /// Changes the depth bound for later requests.
    #[instrument(skip(self))]
    pub fn set_search_depth(&mut self, depth: u32) -> Result<ControlOutcome, SessionError> {
        self.ensure_live()?;
        if depth == 0 {
            return Err(self.surface(SessionErrorKind::InvalidSetting {
                setting: "depth",
                value: depth,
            }
            .into()));
        }
        self.settings.depth = depth;
        self.presentation
            .log_line(&format!("Search depth set to {}.", depth));
        Ok(ControlOutcome::SettingsChanged(self.settings))
    }

    /// Changes the time bound for later requests.
    #[instrument(skip(self))]
    pub fn set_search_time(&mut self, time_secs: u32) -> Result<ControlOutcome, SessionError> {
        self.ensure_live()?;
        if time_secs == 0 {
            return Err(self.surface(SessionErrorKind::InvalidSetting {
                setting: "time",
                value: time_secs,
            }
            .into()));
        }
        self.settings.time_secs = time_secs;
        self.presentation
            .log_line(&format!("Search time set to {} seconds.", time_secs));
        Ok(ControlOutcome::SettingsChanged(self.settings))
    }

    /// Handles every analysis event already delivered, without blocking.
    pub fn pump(&mut self) -> Result<usize, SessionError> {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event)?;
            handled += 1;
        }
        self.reap_retired();
        Ok(handled)
    }

    /// Waits until the current session has no analysis outstanding,
    /// handling events as they arrive.
    pub async fn settle(&mut self) -> Result<usize, SessionError> {
        let mut handled = self.pump()?;
        while !self.shut_down && self.session.is_analysis_pending() {
            match self.events_rx.recv().await {
                Some(event) => {
                    self.handle_event(event)?;
                    handled += 1;
                }
                None => break,
            }
        }
        Ok(handled + self.pump()?)
    }

    /// Stops every worker and waits for them to exit. Later calls to any
    /// operation fail with `ShutDown`.
    #[instrument(skip(self))]
    pub fn shutdown(&mut self) -> Result<ControlOutcome, SessionError> {
        if self.shut_down {
            return Ok(ControlOutcome::ShutDown);
        }
        self.shut_down = true;

        self.coordinator.shutdown();
        for mut retired in self.retired.drain(..) {
            retired.shutdown();
        }
        while self.events_rx.try_recv().is_ok() {}

        info!("Session controller shut down");
        Ok(ControlOutcome::ShutDown)
    }

    /// Current session.
    pub fn session(&self) -> &BoardSession {
        &self.session
    }

    /// Identity of the current session.
    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    /// Catalog index of the current variant.
    pub fn variant_index(&self) -> usize {
        *self.session.descriptor().index()
    }

    /// Variant catalog.
    pub fn registry(&self) -> &VariantRegistry {
        &self.registry
    }

    /// Bounds for the next request.
    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// Whether the computer answers human moves.
    pub fn auto_reply(&self) -> bool {
        self.auto_reply
    }

    /// Whether an analysis is outstanding on the current session.
    pub fn is_thinking(&self) -> bool {
        self.session.is_analysis_pending()
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Front end.
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    /// Front end, mutably.
    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }

    fn start_analysis(&mut self, kind: AnalysisKind) -> Result<ControlOutcome, SessionError> {
        self.ensure_live()?;
        if self.session.is_terminal() {
            return Err(self.surface(SessionErrorKind::GameOver.into()));
        }

        let side = self.session.side_to_move();
        if !self
            .coordinator
            .request_analysis(self.settings.limits(), kind)
        {
            return Err(self.surface(SessionErrorKind::Busy.into()));
        }

        if kind == AnalysisKind::Hint {
            self.presentation
                .log_line(&format!("Getting a computer suggestion for {}...", side));
        }
        self.refresh_status();
        Ok(ControlOutcome::AnalysisStarted(kind))
    }

    fn handle_event(&mut self, event: AnalysisEvent) -> Result<(), SessionError> {
        if self.shut_down {
            return Ok(());
        }
        if event.session() != self.session.id() {
            debug!(stale = %event.session(), current = %self.session.id(), "Discarding stale analysis event");
            return Ok(());
        }

        match event {
            AnalysisEvent::Info { line, .. } => self.presentation.log_line(&line),
            AnalysisEvent::Finished(report) => {
                self.presentation.log_line(&report.announcement());
                if *report.applied() {
                    self.render()?;
                    if let Some(end) = report.game_end() {
                        self.presentation.log_line(&end.announcement());
                    }
                }
                self.refresh_status();
            }
            AnalysisEvent::Failed { kind, .. } => {
                warn!(%kind, "Analysis failed");
                self.presentation
                    .log_line(&SessionErrorKind::SearchFailed.to_string());
                self.refresh_status();
            }
        }
        Ok(())
    }

    fn announce_new_game(&mut self) -> Result<ControlOutcome, SessionError> {
        let variant = self.session.descriptor().name().clone();
        self.presentation.set_title(&format!("Polyboard: {}", variant));
        self.presentation.log_line(&format!("New {} game.", variant));
        self.render()?;
        self.refresh_status();
        Ok(ControlOutcome::NewGame { variant })
    }

    fn render(&mut self) -> Result<(), SessionError> {
        let view = self.session.board_view().map_err(|e| self.surface(e))?;
        self.presentation.render_board(&view);
        Ok(())
    }

    fn refresh_status(&mut self) {
        let status = if self.session.is_terminal() {
            "Game over.".to_string()
        } else if self.session.is_analysis_pending() {
            "Thinking...".to_string()
        } else {
            format!("{} move?", self.session.side_to_move())
        };
        self.presentation.set_status_text(&status);
    }

    fn ensure_live(&self) -> Result<(), SessionError> {
        if self.shut_down {
            Err(SessionErrorKind::ShutDown.into())
        } else {
            Ok(())
        }
    }

    fn surface(&mut self, err: SessionError) -> SessionError {
        if err.kind().is_user_facing() {
            self.presentation.log_line(&err.kind().to_string());
        } else {
            error!(error = %err, "Session invariant violated");
        }
        err
    }

    fn reap_retired(&mut self) {
        self.retired.retain_mut(|coordinator| {
            if coordinator.is_finished() {
                coordinator.shutdown();
                false
            } else {
                true
            }
        });
    }
}
