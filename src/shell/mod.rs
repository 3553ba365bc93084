//! External tool execution and environment refresh.

pub mod command;
pub mod refresh;

pub use command::{
    display_command, run, run_check, run_quiet, run_required, CommandOptions, CommandResult,
};
pub use refresh::refresh_path;
