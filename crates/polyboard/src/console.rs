//! Line-oriented front end on stdin and stdout.

use crate::driver::{self, Flow};
use crate::glyphs;
use crate::{AppConfig, logging};
use anyhow::Result;
use polyboard_core::{BoardView, Presentation};
use polyboard_variants::ReferenceEngine;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};

/// Presentation that writes everything as plain text.
#[derive(Debug)]
pub struct ConsolePresentation<W: Write> {
    out: W,
    status: String,
}

impl<W: Write> ConsolePresentation<W> {
    /// Writes to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            status: String::new(),
        }
    }

    /// Latest status text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Prints the status as an input prompt.
    pub fn prompt(&mut self) {
        let prompt = format!("{} > ", self.status);
        self.write(&prompt);
    }

    fn line(&mut self, text: &str) {
        self.write(&format!("{}\n", text));
    }

    fn write(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Console write failed");
        }
    }
}

impl<W: Write> Presentation for ConsolePresentation<W> {
    fn log_line(&mut self, text: &str) {
        self.line(text);
    }

    fn render_board(&mut self, view: &BoardView) {
        self.line("");
        for row in glyphs::board_lines(view) {
            self.line(&format!("    {}", row));
        }
        self.line("");
    }

    fn set_status_text(&mut self, text: &str) {
        self.status = text.to_string();
    }

    fn set_title(&mut self, text: &str) {
        self.line(&format!("== {} ==", text));
    }
}

/// Runs the console front end until `:quit` or end of input.
#[instrument(skip_all)]
pub async fn run_console(config: AppConfig) -> Result<()> {
    logging::init_stderr(&config);
    info!("Starting console front end");
    let presentation = ConsolePresentation::new(std::io::stdout());
    let mut controller = driver::start_controller(Arc::new(ReferenceEngine), &config, presentation)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    controller.presentation_mut().prompt();
    while let Some(line) = lines.next_line().await? {
        let flow = driver::handle_line(&mut controller, &line)?;
        if flow == Flow::Quit {
            break;
        }
        controller.settle().await?;
        controller.presentation_mut().prompt();
    }

    controller.shutdown()?;
    info!("Console front end finished");
    Ok(())
}
