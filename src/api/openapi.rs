use utoipa::OpenApi;

use crate::errors::ErrorResponse;
use crate::models::{Choice, Data};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HTTP Exceptions Service",
        version = "0.1.0",
        description = "Demonstration service whose every failure is translated into one consistent JSON error body: the request URL, an optional machine-readable code and a client-safe description.",
    ),
    paths(
        crate::api::handlers::health,
        crate::api::handlers::post_test,
        crate::api::handlers::get_test,
        crate::api::handlers::get_test_enum,
    ),
    components(
        schemas(
            ErrorResponse,
            Data,
            Choice,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "test", description = "Endpoints exercising each error translation rule"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_schema_is_documented() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_value(&doc).unwrap();
        let schema = &json["components"]["schemas"]["ErrorResponse"];
        assert!(schema["properties"]["url"].is_object());
        assert!(schema["properties"]["description"].is_object());
        let required = schema["required"].as_array().unwrap();
        assert!(!required.iter().any(|field| field == "code"));
    }
}
