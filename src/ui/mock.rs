//! Mock UI for tests.

use std::collections::VecDeque;

use crate::error::Result;

use super::{SpinnerHandle, UserInterface};

/// Scripted UI that records output and replays canned confirm answers.
#[derive(Default)]
pub struct MockUI {
    /// Queued answers for `confirm`, consumed front to back.
    pub answers: VecDeque<bool>,
    /// Messages shown via `message` and `success`.
    pub messages: Vec<String>,
    /// Messages shown via `warning`.
    pub warnings: Vec<String>,
    /// Messages shown via `error`.
    pub errors: Vec<String>,
    /// Questions asked via `confirm`.
    pub questions: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next confirmation prompt.
    pub fn push_answer(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    /// Whether any recorded output contains the given text.
    pub fn saw(&self, text: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.warnings)
            .chain(&self.errors)
            .any(|m| m.contains(text))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.questions.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or(default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.messages.push(message.to_string());
        Box::new(MockSpinner)
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// No-op spinner handle for tests.
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_replays_queued_answers() {
        let mut ui = MockUI::new();
        ui.push_answer(false);
        ui.push_answer(true);

        assert!(!ui.confirm("first?", true).unwrap());
        assert!(ui.confirm("second?", false).unwrap());
        // Exhausted queue falls back to the default.
        assert!(ui.confirm("third?", true).unwrap());
    }

    #[test]
    fn output_is_recorded() {
        let mut ui = MockUI::new();
        ui.message("installing");
        ui.warning("shortcut failed");

        assert!(ui.saw("installing"));
        assert!(ui.saw("shortcut failed"));
        assert!(!ui.saw("absent"));
    }
}
