//! Interactive terminal UI.

use console::{style, Term};
use dialoguer::Confirm;

use crate::error::{Result, SetupError};

use super::{ProgressSpinner, SpinnerHandle, UserInterface};

/// Convert dialoguer errors to SetupError.
fn map_dialoguer_err(e: dialoguer::Error) -> SetupError {
    SetupError::Io(e.into())
}

/// UI for an attended terminal.
pub struct TerminalUI {
    term: Term,
    assume_yes: bool,
}

impl TerminalUI {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            term: Term::stderr(),
            assume_yes,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    fn success(&mut self, msg: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {}", style("✓").green(), msg));
    }

    fn warning(&mut self, msg: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {}", style("!").yellow(), msg));
    }

    fn error(&mut self, msg: &str) {
        let _ = self
            .term
            .write_line(&format!("{} {}", style("✗").red(), msg));
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact_on(&self.term)
            .map_err(map_dialoguer_err)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::start(message))
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
