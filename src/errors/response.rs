use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Description returned whenever the real one must not, or cannot, be disclosed
pub const GENERIC_DESCRIPTION: &str = "Sorry, something failed.";

/// Error body returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Full URL of the failed request
    pub url: String,
    /// Machine-readable error code (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable description, never empty
    pub description: String,
}

impl ErrorResponse {
    /// Assemble a response. Empty codes are dropped and an empty description
    /// falls back to [`GENERIC_DESCRIPTION`].
    pub fn build(
        url: impl Into<String>,
        code: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        let description = description.into();
        Self {
            url: url.into(),
            code: code.filter(|code| !code.is_empty()),
            description: if description.is_empty() {
                GENERIC_DESCRIPTION.to_string()
            } else {
                description
            },
        }
    }

    /// Response carrying only the generic description
    pub fn generic(url: impl Into<String>) -> Self {
        Self::build(url, None, GENERIC_DESCRIPTION)
    }
}
