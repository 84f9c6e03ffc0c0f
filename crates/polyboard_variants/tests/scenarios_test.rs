//! Sessions over the bundled variants, end to end.

use polyboard_core::{
    BoardSession, BoardView, Engine, MoveLifecycle, Presentation, SearchLimits, SearchSettings,
    SessionController, SessionErrorKind, VariantRegistry,
};
use polyboard_variants::{DEFAULT_VARIANT, ReferenceEngine, VariantKind};
use std::sync::Arc;
use std::time::Duration;
use strum::IntoEnumIterator;

#[derive(Default)]
struct Transcript {
    logs: Vec<String>,
    status: String,
}

impl Presentation for Transcript {
    fn log_line(&mut self, text: &str) {
        self.logs.push(text.to_string());
    }

    fn render_board(&mut self, _view: &BoardView) {}

    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_title(&mut self, _text: &str) {}
}

fn session(kind: VariantKind) -> BoardSession {
    let engine = ReferenceEngine;
    let registry = VariantRegistry::from_engine(&engine).unwrap();
    BoardSession::create(&engine, &registry, kind.index()).unwrap()
}

fn play(session: &BoardSession, text: &str) -> Result<String, SessionErrorKind> {
    MoveLifecycle::propose(session, text)
        .and_then(|outcome| outcome.into_result())
        .map(|applied| applied.text().clone())
        .map_err(|e| e.kind().clone())
}

#[test]
fn test_every_variant_has_a_consistent_board() {
    let registry = VariantRegistry::from_engine(&ReferenceEngine).unwrap();
    assert_eq!(registry.count(), 5);

    for kind in VariantKind::iter() {
        let session = session(kind);
        let view = session.board_view().unwrap();
        assert_eq!(view.cells().len(), view.rows() * view.columns());
        assert!(!session.is_terminal(), "{kind} should start live");
        assert_eq!(session.descriptor().name(), &kind.to_string());
    }

    let kalah = registry.describe(DEFAULT_VARIANT.index()).unwrap();
    assert_eq!((*kalah.rows(), *kalah.columns()), (3, 8));
    assert!(!kalah.coordinate_labels());
    assert_eq!(kalah.cell_state_count(), 23);
}

#[test]
fn test_search_results_replay_through_the_grammar() {
    let engine = ReferenceEngine;
    for index in 0..engine.variant_count() {
        let mut game = engine.new_game(index).unwrap();
        let report = game.search(SearchLimits::new(2, 5)).unwrap();
        let best = *report.best();

        let text = game.encode_move(best);
        assert_eq!(game.decode_move(&text), Some(best), "variant {index}");
        assert!(game.is_legal(best));
        assert!(game.apply_move(best));
        assert!(!report.info().is_empty());
    }
}

#[test]
fn test_ataxx_rejections() {
    let ataxx = session(VariantKind::Ataxx);

    assert!(matches!(play(&ataxx, "ZZ99"), Err(SessionErrorKind::MalformedMove { .. })));
    assert_eq!(
        play(&ataxx, "A7A4"),
        Err(SessionErrorKind::InvalidMove {
            text: "A7A4".to_string()
        })
    );
    assert_eq!(
        play(&ataxx, "A1A2"),
        Err(SessionErrorKind::IllegalMove {
            text: "A1A2".to_string()
        })
    );
    assert_eq!(ataxx.side_to_move(), "Blue");
    assert_eq!(play(&ataxx, "a7b6"), Ok("A7B6".to_string()));
    assert_eq!(ataxx.side_to_move(), "Red");
}

#[test]
fn test_othello_pass_is_illegal_while_moves_exist() {
    let othello = session(VariantKind::Othello);
    assert_eq!(
        play(&othello, "pass"),
        Err(SessionErrorKind::IllegalMove {
            text: "Pass".to_string()
        })
    );
    assert_eq!(play(&othello, "D3"), Ok("D3".to_string()));
    assert_eq!(othello.side_to_move(), "White");
}

#[test]
fn test_connect_four_column_letters() {
    let connect4 = session(VariantKind::ConnectFour);
    assert!(matches!(play(&connect4, "ZZ99"), Err(SessionErrorKind::MalformedMove { .. })));
    assert_eq!(play(&connect4, "d"), Ok("D".to_string()));
    assert_eq!(connect4.cell_state(5, 3).unwrap(), 1);
}

#[test]
fn test_kalah_drag_and_extra_turn() {
    let kalah = session(VariantKind::Kalah);
    assert_eq!(kalah.side_to_move(), "South");

    assert_eq!(play(&kalah, "B3B3"), Ok("A".to_string()));
    assert_eq!(kalah.side_to_move(), "North");

    assert_eq!(play(&kalah, "C"), Ok("C".to_string()));
    assert_eq!(kalah.side_to_move(), "North");
    assert!(matches!(play(&kalah, "H2H2"), Err(SessionErrorKind::InvalidMove { .. })));
}

#[test]
fn test_tic_tac_toe_plays_to_a_finish() {
    let game = session(VariantKind::TicTacToe);
    for text in ["A1", "A2", "B1", "B2", "C1"] {
        play(&game, text).unwrap();
    }
    assert!(game.is_terminal());
    assert_eq!(game.winner(), Some("Crosses".to_string()));
    assert_eq!(play(&game, "C3"), Err(SessionErrorKind::GameOver));
}

#[tokio::test]
async fn test_controller_answers_a_human_move() {
    let mut controller = SessionController::new(
        Arc::new(ReferenceEngine),
        Transcript::default(),
        VariantKind::TicTacToe.index(),
        SearchSettings::new(3, 5),
    )
    .unwrap();

    controller.submit_human_move("B2").unwrap();
    tokio::time::timeout(Duration::from_secs(30), controller.settle())
        .await
        .unwrap()
        .unwrap();

    let logs = &controller.presentation().logs;
    assert!(logs.contains(&"Crosses move: B2".to_string()));
    assert!(logs.iter().any(|line| line.starts_with("Noughts move: ")));
    assert!(logs.iter().any(|line| line.starts_with("depth 1: ")));
    assert_eq!(controller.presentation().status, "Crosses move?");
    controller.shutdown().unwrap();
}
