use axum::{
    extract::{Request, State},
    http::{header::HOST, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::api::handlers::AppState;
use crate::errors::{Failure, FrameworkCondition, PendingFailure};
use crate::metrics::ERROR_RESPONSES_TOTAL;

/// Replace any response carrying a pending failure with the dispatched error
/// response for the current request URL.
///
/// A bare 405 produced by the router, with no failure attached, is treated as
/// a method-not-allowed condition.
pub async fn translate_errors(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let url = request_url(&request);
    let method = request.method().clone();

    let mut response = next.run(request).await;

    let dispatched = match response.extensions_mut().remove::<PendingFailure>() {
        Some(pending) => state.dispatcher.dispatch(pending.failure(), &url),
        None if response.status() == StatusCode::METHOD_NOT_ALLOWED => {
            let failure = Failure::from(FrameworkCondition::method_not_allowed(&method));
            state.dispatcher.dispatch(&failure, &url)
        }
        None => return response,
    };

    ERROR_RESPONSES_TOTAL
        .with_label_values(&[dispatched.rule.as_str(), dispatched.status.as_str()])
        .inc();

    dispatched.into_response()
}

/// Full URL of the request as the server saw it, without the query string
pub fn request_url(request: &Request) -> String {
    let uri = request.uri();
    let scheme = uri.scheme_str().unwrap_or("http");
    let host = uri
        .authority()
        .map(|authority| authority.as_str().to_string())
        .or_else(|| {
            request
                .headers()
                .get(HOST)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "localhost".to_string());

    format!("{}://{}{}", scheme, host, uri.path())
}

/// Panic handler for `CatchPanicLayer`: the panic becomes an unclassified
/// failure so it goes through the catch-all rule.
pub fn panic_to_failure(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    Failure::Unclassified(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}
