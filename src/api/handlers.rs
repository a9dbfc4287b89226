use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Json},
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use utoipa::OpenApi;

use super::extract::{parse_query, require_params, AppQuery, ValidatedJson};
use super::openapi::ApiDoc;
use crate::errors::{Dispatcher, Failure};
use crate::models::{ChoiceParams, Data};
use crate::operation::Operation;

lazy_static::lazy_static! {
    static ref START_TIME: Instant = Instant::now();
}

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub operation: Arc<dyn Operation>,
    pub dispatcher: Dispatcher,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = serde_json::Value)
    )
)]
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "http-exceptions",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": START_TIME.elapsed().as_secs(),
    }))
}

/// Run the operation on a validated payload
#[utoipa::path(
    post,
    path = "/test",
    tag = "test",
    request_body = Data,
    responses(
        (status = 200, description = "Operation result", body = Data),
        (status = 400, description = "Unreadable or invalid body, or operation rejected the request", body = ErrorResponse),
        (status = 401, description = "Operation requires authentication", body = ErrorResponse),
        (status = 403, description = "Operation not permitted", body = ErrorResponse),
        (status = 405, description = "Method not supported", body = ErrorResponse),
        (status = 415, description = "Body is not JSON", body = ErrorResponse),
        (status = 500, description = "Operation or downstream failure", body = ErrorResponse)
    )
)]
pub async fn post_test(
    State(state): State<AppState>,
    ValidatedJson(data): ValidatedJson<Data>,
) -> Result<Json<Data>, Failure> {
    info!("Operation request");
    let result = state.operation.action(data).await?;
    Ok(Json(result))
}

/// Echo the required `param` query parameter
#[utoipa::path(
    get,
    path = "/test",
    tag = "test",
    params(
        ("param" = String, Query, description = "Required parameter")
    ),
    responses(
        (status = 200, description = "Echoed parameter", body = Data),
        (status = 400, description = "Parameter conditions not met", body = ErrorResponse)
    )
)]
pub async fn get_test(
    uri: Uri,
    AppQuery(params): AppQuery<HashMap<String, String>>,
) -> Result<Json<Data>, Failure> {
    require_params(&uri, &["param"])?;
    let value = params.get("param").cloned().unwrap_or_default();
    Ok(Json(Data { value }))
}

/// Accept a typed `enum` query parameter
#[utoipa::path(
    get,
    path = "/test/enum",
    tag = "test",
    params(
        ("enum" = String, Query, description = "One of: VALUE")
    ),
    responses(
        (status = 200, description = "Accepted value", body = Data),
        (status = 400, description = "Parameter missing or its value is not valid", body = ErrorResponse)
    )
)]
pub async fn get_test_enum(uri: Uri) -> Result<Json<Data>, Failure> {
    require_params(&uri, &["enum"])?;
    let params: ChoiceParams = parse_query(uri.query().unwrap_or_default())?;
    let value = serde_json::to_value(params.choice)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default();
    Ok(Json(Data { value }))
}

/// OpenAPI document
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
