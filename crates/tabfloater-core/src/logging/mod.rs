use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable overriding the configured log filter.
pub const LOG_ENV_VAR: &str = "TABFLOATER_LOG";

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Initialize JSON logging into an append-only file.
///
/// The native host must keep stdout for frames, so its events go to a file.
/// Fails only if the file cannot be opened; the caller falls back to
/// [`init_stderr_logging`].
pub fn init_file_logging(log_path: &Path, default_directive: &str) -> std::io::Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_target(false)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(env_filter(default_directive))
        .init();

    Ok(())
}

/// Initialize JSON logging on stderr.
pub fn init_stderr_logging(default_directive: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(env_filter(default_directive))
        .init();
}

/// Initialize CLI logging with optional quiet mode.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `quiet` is false, info-level and above events are emitted.
pub fn init_logging(quiet: bool) {
    init_stderr_logging(if quiet { "error" } else { "info" });
}
