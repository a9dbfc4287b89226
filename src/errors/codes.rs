use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of error that business logic may raise deliberately
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Caller sent something the service cannot act on
    BadRequest,

    /// Caller is not authenticated
    Unauthorized,

    /// Caller is authenticated but not allowed
    Forbidden,

    /// Service failed and says so explicitly
    InternalServerError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::InternalServerError => write!(f, "INTERNAL_SERVER_ERROR"),
        }
    }
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 4] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::InternalServerError,
    ];

    /// Get HTTP status code for this kind
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Server-fault kinds are always recorded in the internal log
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::InternalServerError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorKind::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ErrorKind::Forbidden.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorKind::InternalServerError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_only_internal_server_error_is_server_fault() {
        let server_faults: Vec<_> = ErrorKind::ALL
            .iter()
            .filter(|kind| kind.is_server_fault())
            .collect();
        assert_eq!(server_faults, vec![&ErrorKind::InternalServerError]);
    }

    #[test]
    fn test_display_matches_serde() {
        for kind in ErrorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }
}
