//! tracing subscriber setup.
//!
//! Filter comes from `JT_LOG`, then `RUST_LOG`, defaulting to "info".
//! The interactive viewer owns the terminal, so it logs to a daily file
//! instead of stderr.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use super::dirs;

const LOG_ENV: &str = "JT_LOG";
const LOG_FILE_PREFIX: &str = "jt.log";

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until exit.
pub fn init(target: LogTarget) -> Option<WorkerGuard> {
    let filter = env_filter();

    match (target, dirs::log_dir()) {
        (LogTarget::File, Some(dir)) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .with(filter)
                .init();
            Some(guard)
        }
        // No cache dir: stay silent rather than draw over the UI.
        (LogTarget::File, None) => None,
        (LogTarget::Stderr, _) => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
            None
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
