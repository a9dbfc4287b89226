pub mod middleware;
pub mod registry;

use anyhow::Context;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder};

use crate::errors::Failure;

/// Handler for the /metrics endpoint
/// Returns metrics in Prometheus exposition format
pub async fn metrics_handler() -> Result<Response, Failure> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .context("Failed to encode metrics")?;
    let body = String::from_utf8(buffer).context("Metrics output was not UTF-8")?;

    Ok((
        StatusCode::OK,
        [("Content-Type", encoder.format_type().to_string())],
        body,
    )
        .into_response())
}

pub use registry::{
    DOWNSTREAM_CALLS_TOTAL, ERROR_RESPONSES_TOTAL, HTTP_REQUESTS_TOTAL,
    HTTP_REQUEST_DURATION_SECONDS,
};
