//! Command-line interface.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, InstallArgs, UninstallArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
