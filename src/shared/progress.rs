//! indicatif helpers. Bars are hidden when stderr is not a terminal.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub fn spinner(message: &'static str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let s = ProgressBar::new_spinner();
    #[expect(clippy::expect_used, reason = "static template string")]
    s.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
            .template("{spinner} {msg}")
            .expect("valid template"),
    );
    s.set_message(message);
    s.enable_steady_tick(Duration::from_millis(80));
    s
}

/// Counting bar for `len` items. Print per-item lines inside `ProgressBar::suspend`;
/// `println` is a no-op on hidden bars.
pub fn bar(len: u64, message: &'static str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let b = ProgressBar::new(len);
    #[expect(clippy::expect_used, reason = "static template string")]
    b.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:30}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("=> "),
    );
    b.set_message(message);
    b
}
