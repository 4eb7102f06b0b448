//! Structured logging setup.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once, right after config load
//! - Route events to console and JSON file sinks by severity
//! - Capture panics as ERROR events with a dedicated file sink

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::AppConfig;

/// Event target for the panic hook; routes into `logs/exceptions.log`.
const PANIC_TARGET: &str = "panic";

/// Keeps the non-blocking file writers alive.
///
/// Dropping the guards flushes and closes the sinks; hold them for the
/// lifetime of `main`.
pub struct LogGuards {
    _error: WorkerGuard,
    _combined: WorkerGuard,
    _exceptions: WorkerGuard,
}

/// Initialize the global subscriber.
///
/// The minimum level comes from `RUST_LOG` when set, otherwise from the
/// configured `LOG_LEVEL`. Must be called at most once per process.
pub fn init(config: &AppConfig) -> LogGuards {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let log_dir = Path::new("logs");
    let _ = fs::create_dir_all(log_dir);

    let (error_writer, error_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, "error.log"));
    let (combined_writer, combined_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, "combined.log"));
    let (exceptions_writer, exceptions_guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, "exceptions.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(error_writer)
                .with_filter(LevelFilter::ERROR),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(combined_writer),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(exceptions_writer)
                .with_filter(filter_fn(|metadata| metadata.target() == PANIC_TARGET)),
        )
        .init();

    LogGuards {
        _error: error_guard,
        _combined: combined_guard,
        _exceptions: exceptions_guard,
    }
}

/// Log panics through the subscriber before the default hook runs.
///
/// Panics are log-only; they do not start the shutdown sequencer.
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(target: PANIC_TARGET, panic = %info, "Uncaught panic");
        previous(info);
    }));
}
