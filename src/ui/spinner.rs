//! Progress spinners for long-running actions.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::SpinnerHandle;

/// Spinner shown while a blocking action (clone, download, pip install)
/// runs.
pub struct ProgressSpinner {
    bar: ProgressBar,
}

impl ProgressSpinner {
    /// Start a new spinner with the given message.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn set_message(&mut self, msg: &str) {
        self.bar.set_message(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.bar
            .finish_with_message(format!("{} {}", console::style("✓").green(), msg));
    }

    fn finish_error(&mut self, msg: &str) {
        self.bar
            .finish_with_message(format!("{} {}", console::style("✗").red(), msg));
    }
}

/// No-op spinner for non-interactive output.
pub struct SilentSpinner;

impl SpinnerHandle for SilentSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, _msg: &str) {}

    fn finish_error(&mut self, msg: &str) {
        eprintln!("error: {msg}");
    }
}
