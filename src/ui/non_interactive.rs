//! Headless UI for piped or unattended invocations.

use crate::error::Result;

use super::{SilentSpinner, SpinnerHandle, UserInterface};

/// UI that never blocks on input.
///
/// Confirmation prompts resolve to `assume_yes`; without an explicit
/// assume-yes flag every gate is declined, which keeps unattended runs
/// from mutating the system or deleting anything.
pub struct NonInteractiveUI {
    assume_yes: bool,
}

impl NonInteractiveUI {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn success(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {msg}");
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {msg}");
    }

    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        let answer = if self.assume_yes { "yes" } else { "no" };
        println!("{question} [{answer}]");
        Ok(self.assume_yes)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("{message}...");
        Box::new(SilentSpinner)
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declines_without_assume_yes() {
        let mut ui = NonInteractiveUI::new(false);
        assert!(!ui.confirm("proceed?", true).unwrap());
    }

    #[test]
    fn accepts_with_assume_yes() {
        let mut ui = NonInteractiveUI::new(true);
        assert!(ui.confirm("proceed?", false).unwrap());
    }

    #[test]
    fn is_not_interactive() {
        let ui = NonInteractiveUI::new(false);
        assert!(!ui.is_interactive());
    }
}
