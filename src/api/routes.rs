use axum::{middleware, routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{
    get_test, get_test_enum, health, openapi_json, post_test, AppState,
};
use super::middleware::{logging_middleware, panic_to_failure, translate_errors};
use crate::metrics;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Endpoints exercising the error translation rules
        .route("/test", get(get_test).post(post_test))
        .route("/test/enum", get(get_test_enum))
        // Metrics endpoint (Prometheus)
        .route("/metrics", get(metrics::metrics_handler))
        // OpenAPI documentation
        .route("/api-docs/openapi.json", get(openapi_json))
        // Middleware, innermost first: panics become failures, failures become
        // error responses, and only then are requests logged and measured
        .layer(CatchPanicLayer::custom(panic_to_failure))
        .layer(middleware::from_fn_with_state(state.clone(), translate_errors))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics::middleware::track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
