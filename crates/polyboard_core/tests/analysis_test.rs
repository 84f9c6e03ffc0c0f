//! Tests for the background analysis worker.

mod common;

use common::{Gate, ScriptedEngine, wait_until};
use polyboard_core::{
    AnalysisCoordinator, AnalysisEvent, AnalysisKind, AnalysisPhase, BoardSession, MoveLifecycle,
    SearchLimits, SessionErrorKind, VariantRegistry,
};
use tokio::sync::mpsc;

fn session_for(engine: &ScriptedEngine) -> BoardSession {
    let registry = VariantRegistry::from_engine(engine).unwrap();
    BoardSession::create(engine, &registry, 0).unwrap()
}

fn limits() -> SearchLimits {
    SearchLimits::new(3, 1)
}

#[test]
fn test_human_moves_are_busy_until_result_is_delivered() {
    let gate = Gate::default();
    let session = session_for(&ScriptedEngine::gated(gate.clone()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    assert!(coordinator.request_analysis(limits(), AnalysisKind::Move));
    assert!(session.is_analysis_pending());

    let err = MoveLifecycle::propose(&session, "2").unwrap_err();
    assert_eq!(err.kind(), &SessionErrorKind::Busy);
    assert_eq!(session.reset().unwrap_err().kind(), &SessionErrorKind::Busy);
    assert!(!coordinator.request_analysis(limits(), AnalysisKind::Hint));

    gate.release();
    let info = rx.blocking_recv().unwrap();
    assert!(matches!(info, AnalysisEvent::Info { ref line, .. } if line == "scripted search"));
    let AnalysisEvent::Finished(report) = rx.blocking_recv().unwrap() else {
        panic!("expected a finished report");
    };

    assert_eq!(*report.session(), session.id());
    assert_eq!(report.mover(), "First");
    assert_eq!(report.text(), "1");
    assert_eq!(*report.value(), 7);
    assert!(*report.applied());
    assert_eq!(report.announcement(), "First move: 1 (estimated value 7)");

    assert!(!session.is_analysis_pending());
    assert_eq!(session.side_to_move(), "Second");
    assert!(MoveLifecycle::propose(&session, "2").is_ok());

    coordinator.shutdown();
}

#[test]
fn test_hint_does_not_mutate_session() {
    let session = session_for(&ScriptedEngine::default());
    let before = session.board_view().unwrap();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    assert!(coordinator.request_analysis(limits(), AnalysisKind::Hint));
    let report = loop {
        if let AnalysisEvent::Finished(report) = rx.blocking_recv().unwrap() {
            break report;
        }
    };

    assert_eq!(*report.kind(), AnalysisKind::Hint);
    assert!(!*report.applied());
    assert!(report.game_end().is_none());
    assert_eq!(report.announcement(), "Suggestion for First: 1 (estimated value 7)");
    assert_eq!(session.board_view().unwrap(), before);
    assert_eq!(session.side_to_move(), "First");

    coordinator.shutdown();
}

#[test]
fn test_failed_search_leaves_session_unchanged() {
    let session = session_for(&ScriptedEngine::failing());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    assert!(coordinator.request_analysis(limits(), AnalysisKind::Move));
    let event = rx.blocking_recv().unwrap();

    assert_eq!(
        event,
        AnalysisEvent::Failed {
            session: session.id(),
            kind: AnalysisKind::Move
        }
    );
    assert_eq!(session.side_to_move(), "First");
    assert_eq!(session.analysis_phase(), AnalysisPhase::Idle);

    coordinator.shutdown();
}

#[test]
fn test_terminal_session_refuses_requests() {
    let session = session_for(&ScriptedEngine::default());
    for text in ["1", "2", "3"] {
        MoveLifecycle::propose(&session, text).unwrap();
    }
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    assert!(!coordinator.request_analysis(limits(), AnalysisKind::Move));
    assert_eq!(session.analysis_phase(), AnalysisPhase::Idle);

    coordinator.shutdown();
}

#[test]
fn test_kill_is_idempotent_and_final() {
    let session = session_for(&ScriptedEngine::default());
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    coordinator.kill();
    coordinator.kill();
    assert!(coordinator.is_killed());
    assert!(!coordinator.request_analysis(limits(), AnalysisKind::Move));

    coordinator.shutdown();
    coordinator.shutdown();
    assert!(coordinator.is_finished());
    assert_eq!(session.analysis_phase(), AnalysisPhase::Terminated);
}

#[test]
fn test_kill_during_search_waits_for_bound() {
    let gate = Gate::default();
    let session = session_for(&ScriptedEngine::gated(gate.clone()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    assert!(coordinator.request_analysis(limits(), AnalysisKind::Move));
    assert!(wait_until(|| session.analysis_phase() == AnalysisPhase::Running));

    coordinator.kill();
    assert_eq!(session.analysis_phase(), AnalysisPhase::Cancelling);
    assert!(!coordinator.is_finished());

    gate.release();
    coordinator.shutdown();

    assert_eq!(session.analysis_phase(), AnalysisPhase::Terminated);
    let mut finished = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, AnalysisEvent::Finished(_)) {
            finished += 1;
        }
    }
    assert_eq!(finished, 1);
}

#[test]
fn test_dropping_coordinator_stops_worker() {
    let session = session_for(&ScriptedEngine::default());
    let (tx, _rx) = mpsc::unbounded_channel();
    let coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    drop(coordinator);

    assert!(wait_until(|| session.analysis_phase() == AnalysisPhase::Terminated));
}

#[test]
fn test_panicking_search_reports_failure_and_frees_slot() {
    let session = session_for(&ScriptedEngine::panicking());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    assert!(coordinator.request_analysis(limits(), AnalysisKind::Move));
    let event = rx.blocking_recv().unwrap();

    assert_eq!(
        event,
        AnalysisEvent::Failed {
            session: session.id(),
            kind: AnalysisKind::Move
        }
    );
    assert!(wait_until(|| session.analysis_phase() == AnalysisPhase::Idle));
    assert!(!coordinator.is_finished());
    assert!(MoveLifecycle::propose(&session, "2").is_ok());
    assert!(coordinator.request_analysis(limits(), AnalysisKind::Hint));

    coordinator.shutdown();
    assert_eq!(session.analysis_phase(), AnalysisPhase::Terminated);
}

#[test]
fn test_request_accepted_before_kill_still_runs() {
    let session = session_for(&ScriptedEngine::default());
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    assert!(coordinator.request_analysis(limits(), AnalysisKind::Move));
    coordinator.kill();
    coordinator.shutdown();

    let mut finished = 0;
    while let Ok(event) = rx.try_recv() {
        if matches!(event, AnalysisEvent::Finished(_)) {
            finished += 1;
        }
    }
    assert_eq!(finished, 1);
    assert_eq!(session.side_to_move(), "Second");
    assert_eq!(session.analysis_phase(), AnalysisPhase::Terminated);
}

#[test]
fn test_kill_while_idle_is_not_a_cancellation() {
    let session = session_for(&ScriptedEngine::default());
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut coordinator = AnalysisCoordinator::spawn(session.clone(), tx).unwrap();

    coordinator.kill();
    assert_ne!(session.analysis_phase(), AnalysisPhase::Cancelling);

    coordinator.shutdown();
    assert_eq!(session.analysis_phase(), AnalysisPhase::Terminated);
}
