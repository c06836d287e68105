//! Logging, request tracing and Prometheus metrics.

use thiserror::Error;

mod init;
mod metrics;
mod request;

pub(crate) use init::Observability;
pub(crate) use metrics::{CartMutation, metrics_handler, record_cart_mutation};
pub(crate) use request::RequestLogging;

/// Raised when the global subscriber cannot be installed.
#[derive(Debug, Error)]
pub(crate) enum ObservabilityError {
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
