use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Query parameters whose values never reach the logs
const MASKED_PARAMS: &[&str] = &["api_key", "token", "password", "secret"];

/// Middleware to log all HTTP requests and responses with structured data
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = sanitize_query(request.uri().query().unwrap_or(""));

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = %query,
        "Incoming request"
    );

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = start.elapsed().as_millis();
    match outcome(status) {
        Some(outcome) => warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request failed ({})",
            outcome
        ),
        None => info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = %duration_ms,
            "Request completed"
        ),
    }

    response
}

fn outcome(status: StatusCode) -> Option<&'static str> {
    if status.is_client_error() {
        Some("client error")
    } else if status.is_server_error() {
        Some("server error")
    } else {
        None
    }
}

/// Mask the values of sensitive query parameters
fn sanitize_query(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    query
        .split('&')
        .map(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            if MASKED_PARAMS.contains(&key) {
                format!("{}=***", key)
            } else {
                pair.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
