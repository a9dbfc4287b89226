use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode};
use serde::Serialize;
use std::fmt;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Failures detected by the request-handling layer before, or independent of,
/// application logic.
///
/// The `Display` output of each variant is the description disclosed to the
/// caller. `detail` fields keep the framework's own wording and are never
/// disclosed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkCondition {
    #[error("{message}")]
    MethodNotAllowed { message: String },

    #[error("{message}")]
    UnsupportedMediaType { message: String },

    #[error("Http message was not readable")]
    UnreadableBody { detail: String },

    #[error("Request parameters were not readable")]
    UnreadableParameters { detail: String },

    #[error("{}", join_field_errors(.errors))]
    InvalidFields { errors: Vec<FieldError> },

    #[error("Parameter value '{value}' is not valid for request parameter '{name}'")]
    InvalidParameter { name: String, value: String },

    #[error("Parameter conditions not met for request: {}", .conditions.join(","))]
    UnmetParameterConditions { conditions: Vec<String> },
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FrameworkCondition {
    pub fn method_not_allowed(method: &Method) -> Self {
        Self::MethodNotAllowed {
            message: format!("Request method '{}' not supported", method),
        }
    }

    pub fn unsupported_media_type(content_type: &str) -> Self {
        Self::UnsupportedMediaType {
            message: format!("Content type '{}' not supported", content_type),
        }
    }

    /// Classify a JSON body rejection. `content_type` is the request's content
    /// type as the caller declared it.
    pub fn from_json_rejection(rejection: JsonRejection, content_type: &str) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => Self::unsupported_media_type(content_type),
            other => Self::UnreadableBody {
                detail: other.body_text(),
            },
        }
    }

    /// The condition's natural HTTP status
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnreadableBody { .. }
            | Self::UnreadableParameters { .. }
            | Self::InvalidFields { .. }
            | Self::InvalidParameter { .. }
            | Self::UnmetParameterConditions { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Framework wording kept for diagnostics only
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::UnreadableBody { detail } | Self::UnreadableParameters { detail } => {
                Some(detail)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_not_allowed_message() {
        let condition = FrameworkCondition::method_not_allowed(&Method::PUT);
        assert_eq!(condition.to_string(), "Request method 'PUT' not supported");
        assert_eq!(condition.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_unsupported_media_type_message() {
        let condition = FrameworkCondition::unsupported_media_type("application/atom+xml");
        assert_eq!(
            condition.to_string(),
            "Content type 'application/atom+xml' not supported"
        );
        assert_eq!(condition.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_unreadable_body_hides_detail() {
        let condition = FrameworkCondition::UnreadableBody {
            detail: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(condition.to_string(), "Http message was not readable");
        assert_eq!(condition.detail(), Some("expected value at line 1 column 1"));
        assert_eq!(condition.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_fields_keep_evaluation_order() {
        let condition = FrameworkCondition::InvalidFields {
            errors: vec![
                FieldError::new("value", "must not be blank"),
                FieldError::new("count", "must be positive"),
            ],
        };
        assert_eq!(
            condition.to_string(),
            "value must not be blank, count must be positive"
        );
    }

    #[test]
    fn test_invalid_parameter_message() {
        let condition = FrameworkCondition::InvalidParameter {
            name: "enum".to_string(),
            value: "NOT_AN_ENUM".to_string(),
        };
        assert_eq!(
            condition.to_string(),
            "Parameter value 'NOT_AN_ENUM' is not valid for request parameter 'enum'"
        );
    }

    #[test]
    fn test_unmet_conditions_are_comma_joined() {
        let single = FrameworkCondition::UnmetParameterConditions {
            conditions: vec!["param".to_string()],
        };
        assert_eq!(
            single.to_string(),
            "Parameter conditions not met for request: param"
        );

        let several = FrameworkCondition::UnmetParameterConditions {
            conditions: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            several.to_string(),
            "Parameter conditions not met for request: a,b"
        );
    }
}
