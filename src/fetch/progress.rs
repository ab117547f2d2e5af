//! Download progress display.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Byte-level progress for a single download.
///
/// Draws to stderr and stays hidden when stderr is not a terminal.
pub struct DownloadProgress {
    bar: ProgressBar,
}

impl DownloadProgress {
    /// Start a progress display; `total` is the advertised length, if any.
    pub fn new(label: &str, total: Option<u64>) -> Self {
        let bar = match total {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.magenta} {msg} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{spinner:.magenta} {msg} {bytes} ({bytes_per_sec})")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(label.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// A display that never draws.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Record `bytes` more received.
    pub fn advance(&self, bytes: u64) {
        self.bar.inc(bytes);
    }

    /// Clear the display after a completed download.
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }

    /// Leave the display as-is after a failed download.
    pub fn abandon(self) {
        self.bar.abandon();
    }
}
