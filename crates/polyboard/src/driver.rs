//! Routes user input to the session controller.

use crate::command::{HELP_LINES, Input, UserCommand};
use crate::AppConfig;
use anyhow::Context;
use polyboard_core::{Engine, Presentation, SessionController, SessionError, VariantRegistry};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What the front end should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading input.
    Continue,
    /// Empty the log pane, then keep reading.
    ClearLog,
    /// Leave the input loop.
    Quit,
}

/// Builds a controller for `config`, starting with its configured variant.
#[instrument(skip_all, fields(variant = %config.default_variant()))]
pub fn start_controller<P: Presentation>(
    engine: Arc<dyn Engine>,
    config: &AppConfig,
    presentation: P,
) -> anyhow::Result<SessionController<P>> {
    config.validate()?;
    let registry = VariantRegistry::from_engine(engine.as_ref())
        .context("Failed to read the variant catalog")?;
    let variant = config.variant_index(&registry)?;

    let controller = SessionController::new(engine, presentation, variant, config.search_settings())
        .context("Failed to start a session")?
        .with_auto_reply(*config.auto_reply());
    info!(variant, auto_reply = controller.auto_reply(), "Controller started");
    Ok(controller)
}

/// Parses and runs one line of input.
///
/// Problems the player can fix are reported through the presentation and
/// yield [`Flow::Continue`]; only internal failures are returned as errors.
#[instrument(skip(controller))]
pub fn handle_line<P: Presentation>(
    controller: &mut SessionController<P>,
    line: &str,
) -> Result<Flow, SessionError> {
    match Input::parse(line) {
        Ok(Some(input)) => dispatch(controller, input),
        Ok(None) => Ok(Flow::Continue),
        Err(e) => {
            debug!(error = %e, "Unparseable command");
            controller.presentation_mut().log_line(&e.to_string());
            Ok(Flow::Continue)
        }
    }
}

/// Runs one parsed input.
pub fn dispatch<P: Presentation>(
    controller: &mut SessionController<P>,
    input: Input,
) -> Result<Flow, SessionError> {
    let result = match input {
        Input::Move(text) => controller.submit_human_move(&text).map(|_| Flow::Continue),
        Input::Command(command) => run_command(controller, command),
    };

    match result {
        Err(e) if e.kind().is_user_facing() => Ok(Flow::Continue),
        other => other,
    }
}

fn run_command<P: Presentation>(
    controller: &mut SessionController<P>,
    command: UserCommand,
) -> Result<Flow, SessionError> {
    match command {
        UserCommand::NewGame => controller.reset_game().map(|_| Flow::Continue),
        UserCommand::Hint => controller.request_hint().map(|_| Flow::Continue),
        UserCommand::Go => controller.request_computer_move().map(|_| Flow::Continue),
        UserCommand::Depth(depth) => controller.set_search_depth(depth).map(|_| Flow::Continue),
        UserCommand::Time(secs) => controller.set_search_time(secs).map(|_| Flow::Continue),
        UserCommand::Variant(choice) => match choice.resolve(controller.registry()) {
            Some(index) => controller.switch_variant(index).map(|_| Flow::Continue),
            None => {
                controller
                    .presentation_mut()
                    .log_line(&format!("Unknown variant '{}'.", choice));
                Ok(Flow::Continue)
            }
        },
        UserCommand::ListVariants => {
            let lines = variant_lines(controller.registry());
            for line in lines {
                controller.presentation_mut().log_line(&line);
            }
            Ok(Flow::Continue)
        }
        UserCommand::Help => {
            for line in HELP_LINES {
                controller.presentation_mut().log_line(line);
            }
            Ok(Flow::Continue)
        }
        UserCommand::Clear => Ok(Flow::ClearLog),
        UserCommand::Quit => Ok(Flow::Quit),
    }
}

/// One line per variant: index, name and board size.
pub fn variant_lines(registry: &VariantRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|variant| {
            format!(
                "{}: {} ({}x{})",
                variant.index(),
                variant.name(),
                variant.rows(),
                variant.columns()
            )
        })
        .collect()
}

/// Catalog index after the current one, wrapping around.
pub fn next_variant<P: Presentation>(controller: &SessionController<P>) -> usize {
    (controller.variant_index() + 1) % controller.registry().count().max(1)
}
