pub mod commands;
pub mod context;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub mod render;
mod shell;

pub use context::{CliMode, CommandError, CommandResult, ShellContext};
pub use shell::run_cli;

/// Set this variable to read commands from stdin without prompts.
pub const SCRIPT_ENV: &str = "OUTLAY_CLI_SCRIPT";
