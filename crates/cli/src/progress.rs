use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a model call is in flight
pub struct FlowSpinner {
    bar: ProgressBar,
}

impl FlowSpinner {
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(template.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    pub fn finish_success(&self, message: &str) {
        self.bar
            .finish_with_message(style(format!("✓ {message}")).green().to_string());
    }

    pub fn finish_error(&self, message: &str) {
        self.bar
            .finish_with_message(style(format!("✗ {message}")).red().to_string());
    }

    /// Remove the spinner line (before printing a chat reply)
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}
