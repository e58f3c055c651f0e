//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so they never mix with command output on stdout.
//! `PUBDESK_LOG` takes an `EnvFilter` directive and wins over `-v`.

use tracing_subscriber::{EnvFilter, fmt};

/// Filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env("PUBDESK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("pubdesk={}", level_for(verbosity))));

    let _ = fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
