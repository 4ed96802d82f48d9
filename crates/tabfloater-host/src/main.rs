//! Native messaging host.
//!
//! The browser starts this process and talks to it over stdin/stdout. Stdout
//! carries frames only, so every diagnostic goes to the log file.

use std::io;
use std::path::PathBuf;

use tabfloater_core::config::{executable_dir, load_host_config};
use tabfloater_core::{
    DispatchOptions, HostConfig, TabfloaterError, create_backend, init_file_logging,
    init_stderr_logging, run_host,
};
use tabfloater_protocol::MessageChannel;
use tracing::{error, info, warn};

fn main() {
    let exe_dir = executable_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Logging is not up yet; a bad config is reported once it is.
    let (config, config_error) = match load_host_config(&exe_dir) {
        Ok(config) => (config, None),
        Err(e) => (HostConfig::default(), Some(e)),
    };

    let log_path = config.log_path(&exe_dir);
    if let Err(e) = init_file_logging(&log_path, &config.log_level) {
        init_stderr_logging(&config.log_level);
        warn!(
            event = "host.logging.file_unavailable",
            path = %log_path.display(),
            error = %e
        );
    }

    if let Some(e) = config_error {
        warn!(
            event = "host.config.load_failed",
            error = %e,
            error_code = e.error_code(),
            "Falling back to default configuration"
        );
    }

    // The browser passes the caller origin (and a window handle on Windows).
    let args: Vec<String> = std::env::args().skip(1).collect();
    info!(
        event = "host.startup_completed",
        version = env!("CARGO_PKG_VERSION"),
        args = ?args,
        max_message_bytes = config.max_message_bytes
    );

    std::process::exit(run(&config));
}

fn run(config: &HostConfig) -> i32 {
    let backend = create_backend();
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let mut channel = MessageChannel::new(stdin, stdout)
        .with_max_incoming_bytes(config.max_incoming_bytes());

    match run_host(&mut channel, backend.as_ref(), DispatchOptions::from(config)) {
        Ok(stats) => {
            info!(
                event = "host.shutdown_completed",
                frames_read = stats.frames_read,
                responses_written = stats.responses_written,
                errors_reported = stats.errors_reported,
                requests_ignored = stats.requests_ignored
            );
            0
        }
        Err(e) => {
            error!(
                event = "host.run_failed",
                severity = "critical",
                error = %e,
                error_code = e.error_code()
            );
            1
        }
    }
}
