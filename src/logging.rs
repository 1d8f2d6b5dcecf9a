//! Structured logging initialization
//!
//! The RUST_LOG environment variable takes precedence over the configured
//! level. Logs go to stderr so text output on stdout stays clean.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(config.level.as_str())
    };

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let result = match (config.format, config.timestamps) {
        (LogFormat::Pretty, true) => registry.with(layer.with_ansi(true)).try_init(),
        (LogFormat::Pretty, false) => registry
            .with(layer.with_ansi(true).without_time())
            .try_init(),
        (LogFormat::Compact, true) => registry.with(layer.compact()).try_init(),
        (LogFormat::Compact, false) => registry
            .with(layer.compact().without_time())
            .try_init(),
        (LogFormat::Json, true) => registry.with(layer.json()).try_init(),
        (LogFormat::Json, false) => registry.with(layer.json().without_time()).try_init(),
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
