pub mod commands;
pub mod context;
pub mod format;
pub mod help;
pub mod io;
pub mod jobs;
pub mod output;
pub mod registry;
mod shell;
pub mod ui;

pub use context::{CliMode, CommandError, CommandResult, ShellContext};
pub use shell::run_cli;
