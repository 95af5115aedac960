use financia_config::ConfigError;
use financia_core::CoreError;
use rustyline::error::ReadlineError;
use thiserror::Error;

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Line editor error: {0}")]
    Readline(#[from] ReadlineError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Storage error: {0}")]
    Core(#[from] CoreError),
}
