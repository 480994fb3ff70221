use std::path::Path;
use std::str::FromStr;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

/// Sends all tracing output to a daily rolling file so it never interleaves
/// with what the client prints. Keep the guard alive until exit.
pub fn init(log_dir: &Path, level: &str) -> WorkerGuard {
    let file_appender = rolling::daily(log_dir, "bizman.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(Level::from_str(level).unwrap_or(Level::DEBUG))
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    guard
}
