//! Tracing setup for the `listflow` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is up
//! to the embedding application.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file base path.
pub const LOG_PATH_ENV: &str = "LISTFLOW_LOG";

/// Log to a file when `LISTFLOW_LOG` is set, otherwise stay silent.
///
/// `RUST_LOG` picks the filter (default `info`). Each process writes its
/// own file, `{base}.{unix_secs}.{pid}`, so concurrent demos don't
/// interleave.
pub fn init_tracing() {
    let Ok(base) = std::env::var(LOG_PATH_ENV) else {
        return;
    };
    let path = unique_log_path(&base, std::process::id());

    let file = match std::fs::File::create(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot create log file {path}: {err}");
            return;
        }
    };

    let layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true);

    let _ = tracing_subscriber::registry()
        .with(env_filter("info"))
        .with(layer)
        .try_init();
}

/// Log to stderr, `debug` unless `RUST_LOG` says otherwise.
pub fn init_stderr_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("debug"))
        .with_writer(std::io::stderr)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .try_init();
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

fn unique_log_path(base: &str, pid: u32) -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{base}.{secs}.{pid}")
}
