//! Spinners for long-running network operations.
//!
//! Clones and index downloads can take a while; a spinner on stderr shows
//! that something is happening. Spinners are hidden when `--no-progress` is
//! given, and indicatif hides them on its own when stderr is not a terminal.
//!
//! ```rust,no_run
//! use cmakehub_cli::utils::progress::Spinner;
//!
//! let spinner = Spinner::new(true, "Cloning sanitizers...");
//! // ... clone ...
//! spinner.finish_and_clear();
//! ```

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// A steady-ticking spinner that can be disabled.
#[derive(Clone)]
pub struct Spinner {
    inner: IndicatifBar,
}

impl Spinner {
    /// Creates a spinner showing `message`, or a hidden one when `enabled` is false.
    pub fn new(enabled: bool, message: impl Into<String>) -> Self {
        let bar = if enabled {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            IndicatifBar::hidden()
        };
        bar.set_message(message.into());
        Self {
            inner: bar,
        }
    }

    /// Replaces the spinner message.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Stops the spinner and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
}
