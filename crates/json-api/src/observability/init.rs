//! Tracing subscriber setup.

use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::format::FmtSpan,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Crates whose debug output drowns out ours.
const QUIET_TARGETS: &str = "h2=warn,hyper=warn,hyper_util=warn,sqlx=warn";

/// Marker returned once the global subscriber is installed.
#[derive(Debug)]
pub(crate) struct Observability;

impl Observability {
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        let filter = env_filter(&config.logging.log_level);

        match config.logging.log_format {
            LogFormat::Compact => install(
                filter,
                tracing_subscriber::fmt::layer().compact().with_target(true),
            )?,
            LogFormat::Pretty => install(
                filter,
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE),
            )?,
            LogFormat::Json => install(
                filter,
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_current_span(true)
                    .with_span_list(false),
            )?,
        }

        Ok(Self)
    }
}

/// `RUST_LOG` wins when set; otherwise the configured level plus quiet defaults.
fn env_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_unset| EnvFilter::new(format!("{log_level},{QUIET_TARGETS}")))
}

fn install<L>(filter: EnvFilter, layer: L) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()?;

    Ok(())
}
