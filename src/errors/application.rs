use super::codes::ErrorKind;

/// Error raised deliberately by business logic.
///
/// Built at the point of failure and attached to with `with_code` and
/// `with_description`, each of which overwrites any earlier value.
///
/// ```
/// use http_exceptions::errors::ApplicationError;
///
/// let err = ApplicationError::bad_request()
///     .with_code("INVALID_QUERY")
///     .with_description("Query param was invalid");
/// assert_eq!(err.code(), Some("INVALID_QUERY"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {}", .description.as_deref().unwrap_or("no description"))]
pub struct ApplicationError {
    kind: ErrorKind,
    code: Option<String>,
    description: Option<String>,
}

impl ApplicationError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            code: None,
            description: None,
        }
    }

    pub fn bad_request() -> Self {
        Self::new(ErrorKind::BadRequest)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized)
    }

    pub fn forbidden() -> Self {
        Self::new(ErrorKind::Forbidden)
    }

    pub fn internal_server_error() -> Self {
        Self::new(ErrorKind::InternalServerError)
    }

    /// Attach a machine-readable code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach a human-readable description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
