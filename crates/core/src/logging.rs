//! Process-wide `tracing` setup for catscope binaries.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global subscriber and returns the guard that flushes the
/// file writer on drop. Keep it alive for the whole run.
///
/// Catalog loads and accessor lookups are written to
/// `<log_dir>/<component>.log.<date>`, one file per day. `RUST_LOG`
/// overrides the default `info` filter. With `to_stderr` the same events are
/// mirrored to the terminal.
pub fn init_logging(component: &str, log_dir: &Path, to_stderr: bool) -> WorkerGuard {
    if let Err(err) = std::fs::create_dir_all(log_dir) {
        eprintln!("catscope: cannot create log dir {}: {err}", log_dir.display());
    }

    let (catalog_log, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, component));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(catalog_log)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    guard
}
