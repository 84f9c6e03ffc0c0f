//! Polyboard - play board games against a computer opponent
//!
//! Front ends for the session controller in `polyboard_core`, backed by the
//! reference engine in `polyboard_variants`.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Command**: the `:` command language shared by both front ends
//! - **Driver**: routes parsed input to the controller
//! - **Console**: line-oriented play on stdin and stdout
//! - **TUI**: ratatui board, log, status and input line

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod command;
mod config;
mod console;
mod driver;
mod glyphs;
mod logging;
mod tui;

// Crate-level exports - Command line and configuration
pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError, DEFAULT_CONFIG_PATH};
pub use logging::{DEFAULT_LOG_FILTER, env_filter};

// Crate-level exports - Input language
pub use command::{CommandError, HELP_LINES, Input, UserCommand, VariantChoice};
pub use driver::{Flow, dispatch, handle_line, next_variant, start_controller, variant_lines};

// Crate-level exports - Front ends
pub use console::{ConsolePresentation, run_console};
pub use glyphs::{Tint, board_lines, glyph, square_name, tint};
pub use tui::{TuiApp, run_tui};
