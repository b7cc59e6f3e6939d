//! Interactive shell for walking a booking end to end and inspecting orders.

pub mod commands;
pub mod context;
pub mod output;
pub mod shell;

use thiserror::Error;

use crate::errors::BookingError;

pub use context::{CliMode, CommandError, LoopControl, ShellContext};
pub use shell::run_cli;

/// Errors that end the shell, as opposed to command failures it reports and survives.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BookingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}
