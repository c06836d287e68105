//! Request-level logging, request IDs and route labels.

use std::time::{Duration, Instant};

use salvo::{
    Request,
    http::{StatusCode, header::HeaderValue},
    prelude::{Depot, FlowCtrl, Handler, Response, async_trait},
};
use tracing::{Instrument as _, error, info, warn};
use uuid::Uuid;

use super::metrics;

pub(crate) const REQUEST_ID_HEADER: &str = "x-request-id";
const REQUEST_ID_DEPOT_KEY: &str = "request_id";

/// Hoop that tags each request with an id, wraps it in a span and records
/// its status and latency.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequestLogging {
    slow_request_threshold: Duration,
}

impl RequestLogging {
    pub(crate) const fn new(slow_request_threshold: Duration) -> Self {
        Self {
            slow_request_threshold,
        }
    }

    fn is_slow(&self, elapsed: Duration) -> bool {
        elapsed > self.slow_request_threshold
    }
}

#[async_trait]
impl Handler for RequestLogging {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        // Scrapes would otherwise count themselves.
        if req.uri().path() == "/metrics" {
            ctrl.call_next(req, depot, res).await;
            return;
        }

        let started = Instant::now();
        let request_id = resolve_request_id(req.header::<String>(REQUEST_ID_HEADER));

        depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
        set_request_id_header(res, &request_id);

        let method = req.method().to_string();
        let route = route_label(req.uri().path());
        let _in_flight = metrics::InFlightRequestGuard::track();

        let span = tracing::info_span!(
            parent: None,
            "http.request",
            request_id = %request_id,
            method = %method,
            route = %route,
            remote_addr = %req.remote_addr(),
            user_uuid = tracing::field::Empty,
            status = tracing::field::Empty,
            duration_ms = tracing::field::Empty
        );

        ctrl.call_next(req, depot, res)
            .instrument(span.clone())
            .await;

        let elapsed = started.elapsed();
        let status = res.status_code.unwrap_or(StatusCode::OK).as_u16();
        let duration_ms = elapsed.as_millis();

        metrics::observe_request(&method, &route, status, elapsed.as_secs_f64());

        span.record("status", status);
        span.record("duration_ms", duration_ms);

        span.in_scope(|| {
            match status {
                500.. => error!(status, duration_ms, "request failed"),
                400..500 => warn!(status, duration_ms, "request rejected"),
                _ => info!(status, duration_ms, "request completed"),
            }

            if self.is_slow(elapsed) {
                warn!(
                    duration_ms,
                    threshold_ms = self.slow_request_threshold.as_millis(),
                    "slow request"
                );
            }
        });
    }
}

fn resolve_request_id(header_value: Option<String>) -> String {
    header_value
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

fn set_request_id_header(res: &mut Response, request_id: &str) {
    match HeaderValue::from_str(request_id) {
        Ok(value) => {
            res.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        Err(source) => {
            warn!(
                request_id,
                "could not encode request id for response header: {source}"
            );
        }
    }
}

/// Path with product slugs and UUIDs replaced, so metric labels stay bounded.
fn route_label(path: &str) -> String {
    let mut label = String::new();
    let mut after_products = false;

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        label.push('/');

        if after_products {
            label.push_str("{slug}");
        } else if Uuid::parse_str(segment).is_ok() {
            label.push_str("{uuid}");
        } else {
            label.push_str(segment);
        }

        after_products = segment == "products" && !after_products;
    }

    if label.is_empty() {
        label.push('/');
    }

    label
}
