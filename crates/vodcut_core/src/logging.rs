//! Logging bootstrap built on the tracing ecosystem.
//!
//! Respects RUST_LOG, falling back to the configured default filter.
//! Call once at application startup.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize global tracing output to stderr.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(env_filter(default_filter))
        .init();
}

/// Initialize tracing to stderr plus a daily-rolled file under `log_dir`.
///
/// The returned guard flushes the file writer on drop; hold it for the
/// lifetime of the program.
pub fn init_tracing_with_file(
    default_filter: &str,
    log_dir: &Path,
) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "vodcut.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(env_filter(default_filter))
        .init();

    Ok(guard)
}
