//! Terminal UI for polyboard.

mod app;
mod input;
mod ui;

pub use app::TuiApp;

use crate::command::{Input, UserCommand, VariantChoice};
use crate::driver::{self, Flow};
use crate::{AppConfig, logging};
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::KeyAction;
use polyboard_core::{SessionController, SessionError};
use polyboard_variants::ReferenceEngine;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Interval between input polls; analysis events are pumped on each tick.
const TICK: Duration = Duration::from_millis(50);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Runs the terminal UI until the player quits.
pub async fn run_tui(config: AppConfig) -> Result<()> {
    // Log to a file so tracing output does not corrupt the screen
    logging::init_file(&config)?;
    info!("Starting polyboard TUI");

    let mut controller =
        driver::start_controller(Arc::new(ReferenceEngine), &config, TuiApp::default())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut controller);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    controller.shutdown()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    info!("Polyboard TUI finished");
    res
}

#[instrument(skip_all)]
fn run_loop(terminal: &mut Tui, controller: &mut SessionController<TuiApp>) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, controller.presentation()))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && let Some(action) = input::action_for(key)
        {
            debug!(?action, "Key action");
            if handle_action(controller, action)? == Flow::Quit {
                return Ok(());
            }
        }

        controller.pump()?;
    }
}

fn handle_action(
    controller: &mut SessionController<TuiApp>,
    action: KeyAction,
) -> Result<Flow, SessionError> {
    let app = controller.presentation_mut();
    match action {
        KeyAction::Quit => Ok(Flow::Quit),
        KeyAction::Cursor(code) => {
            app.move_cursor(code);
            Ok(Flow::Continue)
        }
        KeyAction::Type(c) => {
            app.type_char(c);
            Ok(Flow::Continue)
        }
        KeyAction::Backspace => {
            app.backspace();
            Ok(Flow::Continue)
        }
        KeyAction::Space => match app.press_space() {
            Some(text) => driver::dispatch(controller, Input::Move(text)),
            None => Ok(Flow::Continue),
        },
        KeyAction::Submit => {
            let line = app.take_input();
            let flow = driver::handle_line(controller, &line)?;
            if flow == Flow::ClearLog {
                controller.presentation_mut().clear_log();
            }
            Ok(flow)
        }
        KeyAction::NextVariant => {
            let next = driver::next_variant(controller);
            let switch = UserCommand::Variant(VariantChoice::Index(next));
            driver::dispatch(controller, Input::Command(switch))
        }
    }
}
