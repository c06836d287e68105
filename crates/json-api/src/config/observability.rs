//! Logging and metrics settings

use std::time::Duration;

use clap::{ArgAction, Args, ValueEnum};

/// How log lines are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals.
    Compact,

    /// Multi-line events with span context, for local debugging.
    Pretty,

    /// One JSON object per event, for log shippers.
    Json,
}

#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` holds no valid filter
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Requests slower than this many milliseconds are logged at warn level
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,

    /// Serve Prometheus metrics at /metrics
    #[arg(
        long,
        env = "METRICS_ENABLED",
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub metrics_enabled: bool,
}

impl ObservabilityConfig {
    #[must_use]
    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_threshold_ms)
    }
}
