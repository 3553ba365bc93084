//! Terminal interaction.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for headless or piped invocations
//! - [`MockUI`] for scripted answers in tests

pub mod mock;
pub mod non_interactive;
pub mod spinner;
pub mod terminal;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use spinner::{ProgressSpinner, SilentSpinner};
pub use terminal::TerminalUI;

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Result<bool>;

    /// Start a spinner for a long-running operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// Create the appropriate UI for the current terminal.
///
/// `assume_yes` answers every consent prompt affirmatively; without it a
/// non-attended terminal declines, which is the safe default for gates
/// protecting destructive or system-mutating steps.
pub fn create_ui(assume_yes: bool) -> Box<dyn UserInterface> {
    if console::user_attended() {
        Box::new(TerminalUI::new(assume_yes))
    } else {
        Box::new(NonInteractiveUI::new(assume_yes))
    }
}
