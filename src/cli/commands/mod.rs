//! CLI subcommand implementations.

pub mod dispatcher;
pub mod install;
pub mod uninstall;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
