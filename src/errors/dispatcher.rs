//! Selects the single handling rule for a failure and turns it into the
//! response sent back to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::fmt;
use std::sync::Arc;

use super::codes::ErrorKind;
use super::disclosure::{Diagnostic, DiagnosticSink, Disclosure, TracingSink};
use super::failure::Failure;
use super::framework::FrameworkCondition;
use super::response::{ErrorResponse, GENERIC_DESCRIPTION};

/// Handling rules, most specific first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    BadRequest,
    Unauthorized,
    Forbidden,
    InternalServerError,
    MethodNotAllowed,
    UnsupportedMediaType,
    UnreadableBody,
    UnreadableParameters,
    InvalidFields,
    InvalidParameter,
    UnmetParameterConditions,
    Downstream,
    CatchAll,
}

impl Rule {
    /// Every rule, in priority order
    pub const ORDER: [Rule; 13] = [
        Self::BadRequest,
        Self::Unauthorized,
        Self::Forbidden,
        Self::InternalServerError,
        Self::MethodNotAllowed,
        Self::UnsupportedMediaType,
        Self::UnreadableBody,
        Self::UnreadableParameters,
        Self::InvalidFields,
        Self::InvalidParameter,
        Self::UnmetParameterConditions,
        Self::Downstream,
        Self::CatchAll,
    ];

    pub fn for_failure(failure: &Failure) -> Self {
        match failure {
            Failure::Application(err) => match err.kind() {
                ErrorKind::BadRequest => Self::BadRequest,
                ErrorKind::Unauthorized => Self::Unauthorized,
                ErrorKind::Forbidden => Self::Forbidden,
                ErrorKind::InternalServerError => Self::InternalServerError,
            },
            Failure::Framework(condition) => match condition {
                FrameworkCondition::MethodNotAllowed { .. } => Self::MethodNotAllowed,
                FrameworkCondition::UnsupportedMediaType { .. } => Self::UnsupportedMediaType,
                FrameworkCondition::UnreadableBody { .. } => Self::UnreadableBody,
                FrameworkCondition::UnreadableParameters { .. } => Self::UnreadableParameters,
                FrameworkCondition::InvalidFields { .. } => Self::InvalidFields,
                FrameworkCondition::InvalidParameter { .. } => Self::InvalidParameter,
                FrameworkCondition::UnmetParameterConditions { .. } => {
                    Self::UnmetParameterConditions
                }
            },
            Failure::Downstream(_) => Self::Downstream,
            Failure::Unclassified(_) => Self::CatchAll,
        }
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => ErrorKind::BadRequest.status_code(),
            Self::Unauthorized => ErrorKind::Unauthorized.status_code(),
            Self::Forbidden => ErrorKind::Forbidden.status_code(),
            Self::InternalServerError => ErrorKind::InternalServerError.status_code(),
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnreadableBody
            | Self::UnreadableParameters
            | Self::InvalidFields
            | Self::InvalidParameter
            | Self::UnmetParameterConditions => StatusCode::BAD_REQUEST,
            Self::Downstream | Self::CatchAll => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::InternalServerError => "internal_server_error",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::UnsupportedMediaType => "unsupported_media_type",
            Self::UnreadableBody => "unreadable_body",
            Self::UnreadableParameters => "unreadable_parameters",
            Self::InvalidFields => "invalid_fields",
            Self::InvalidParameter => "invalid_parameter",
            Self::UnmetParameterConditions => "unmet_parameter_conditions",
            Self::Downstream => "downstream",
            Self::CatchAll => "catch_all",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of dispatching one failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatched {
    pub rule: Rule,
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for Dispatched {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Turns failures into error responses, recording server faults in the
/// injected diagnostic sink.
#[derive(Clone)]
pub struct Dispatcher {
    sink: Arc<dyn DiagnosticSink>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    pub fn dispatch(&self, failure: &Failure, request_url: &str) -> Dispatched {
        let rule = Rule::for_failure(failure);

        if rule.is_logged() {
            self.sink
                .record(&Diagnostic::describe(rule, request_url, failure));
        }

        let (code, description) = match (rule.disclosure(), failure) {
            (Disclosure::Generic, _) => (None, None),
            (Disclosure::Verbatim, Failure::Application(err)) => (
                err.code().map(str::to_string),
                err.description().map(str::to_string),
            ),
            (Disclosure::Verbatim, Failure::Framework(condition)) => {
                (None, Some(condition.to_string()))
            }
            (Disclosure::Verbatim, _) => (None, None),
        };

        Dispatched {
            rule,
            status: rule.status_code(),
            body: ErrorResponse::build(
                request_url,
                code,
                description.unwrap_or_else(|| GENERIC_DESCRIPTION.to_string()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ApplicationError, DownstreamFailure, FieldError, MemorySink};
    use anyhow::anyhow;

    const URL: &str = "http://localhost/test";

    fn dispatcher() -> (Dispatcher, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (Dispatcher::new(sink.clone()), sink)
    }

    #[test]
    fn test_application_kinds_follow_status_table() {
        let (dispatcher, _) = dispatcher();
        for kind in ErrorKind::ALL {
            let failure = Failure::from(
                ApplicationError::new(kind)
                    .with_code("CODE")
                    .with_description("described"),
            );
            let dispatched = dispatcher.dispatch(&failure, URL);
            assert_eq!(dispatched.status, kind.status_code());
            assert_eq!(dispatched.body.code.as_deref(), Some("CODE"));
            assert_eq!(dispatched.body.description, "described");
            assert_eq!(dispatched.body.url, URL);
        }
    }

    #[test]
    fn test_bad_request_with_code() {
        let (dispatcher, sink) = dispatcher();
        let failure = Failure::from(
            ApplicationError::bad_request()
                .with_code("INVALID_QUERY")
                .with_description("Query param was invalid"),
        );
        let dispatched = dispatcher.dispatch(&failure, URL);

        assert_eq!(dispatched.rule, Rule::BadRequest);
        assert_eq!(dispatched.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            dispatched.body,
            ErrorResponse::build(
                URL,
                Some("INVALID_QUERY".to_string()),
                "Query param was invalid"
            )
        );
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_bare_application_error_uses_generic_description() {
        let (dispatcher, _) = dispatcher();
        let dispatched = dispatcher.dispatch(&ApplicationError::forbidden().into(), URL);
        assert_eq!(dispatched.status, StatusCode::FORBIDDEN);
        assert_eq!(dispatched.body.code, None);
        assert_eq!(dispatched.body.description, GENERIC_DESCRIPTION);
    }

    #[test]
    fn test_internal_server_error_is_disclosed_and_logged() {
        let (dispatcher, sink) = dispatcher();
        let failure = Failure::from(
            ApplicationError::internal_server_error()
                .with_description("Chuck Norris instantiates abstract classes"),
        );
        let dispatched = dispatcher.dispatch(&failure, URL);

        assert_eq!(dispatched.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            dispatched.body.description,
            "Chuck Norris instantiates abstract classes"
        );
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rule, Rule::InternalServerError);
        assert!(records[0]
            .detail
            .contains("Chuck Norris instantiates abstract classes"));
    }

    #[test]
    fn test_framework_conditions() {
        let (dispatcher, sink) = dispatcher();
        let cases = vec![
            (
                FrameworkCondition::method_not_allowed(&axum::http::Method::PUT),
                StatusCode::METHOD_NOT_ALLOWED,
                "Request method 'PUT' not supported",
            ),
            (
                FrameworkCondition::unsupported_media_type("application/atom+xml"),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Content type 'application/atom+xml' not supported",
            ),
            (
                FrameworkCondition::UnreadableBody {
                    detail: "trailing characters".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "Http message was not readable",
            ),
            (
                FrameworkCondition::UnreadableParameters {
                    detail: "duplicate field `enum`".to_string(),
                },
                StatusCode::BAD_REQUEST,
                "Request parameters were not readable",
            ),
            (
                FrameworkCondition::InvalidFields {
                    errors: vec![FieldError::new("value", "must not be blank")],
                },
                StatusCode::BAD_REQUEST,
                "value must not be blank",
            ),
            (
                FrameworkCondition::UnmetParameterConditions {
                    conditions: vec!["param".to_string()],
                },
                StatusCode::BAD_REQUEST,
                "Parameter conditions not met for request: param",
            ),
        ];

        for (condition, status, description) in cases {
            let dispatched = dispatcher.dispatch(&condition.into(), URL);
            assert_eq!(dispatched.status, status);
            assert_eq!(dispatched.body.description, description);
            assert_eq!(dispatched.body.code, None);
            let bytes = serde_json::to_vec(&dispatched.body).unwrap();
            assert!(!String::from_utf8(bytes).unwrap().contains("duplicate field"));
        }
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_downstream_failure_never_leaks() {
        let (dispatcher, sink) = dispatcher();
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let failure = Failure::from(DownstreamFailure::new(
                "http://downstream/action",
                status,
                r#"{"error":"wasBad"}"#,
            ));
            let dispatched = dispatcher.dispatch(&failure, URL);
            let bytes = serde_json::to_vec(&dispatched.body).unwrap();

            assert_eq!(dispatched.status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(dispatched.body.description, GENERIC_DESCRIPTION);
            assert!(!String::from_utf8(bytes).unwrap().contains("wasBad"));
        }
        assert_eq!(sink.records().len(), 4);
        assert!(sink.records().iter().all(|d| d.detail.contains("wasBad")));
    }

    #[test]
    fn test_catch_all() {
        let (dispatcher, sink) = dispatcher();
        let failure = Failure::Unclassified(anyhow!("Sensitive information"));
        let dispatched = dispatcher.dispatch(&failure, URL);

        assert_eq!(dispatched.rule, Rule::CatchAll);
        assert_eq!(dispatched.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(dispatched.body, ErrorResponse::generic(URL));
        assert_eq!(sink.records()[0].detail, "Sensitive information");
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let (dispatcher, _) = dispatcher();
        let failure = Failure::from(
            ApplicationError::unauthorized().with_description("I don't know the password"),
        );
        let first = serde_json::to_vec(&dispatcher.dispatch(&failure, URL).body).unwrap();
        let second = serde_json::to_vec(&dispatcher.dispatch(&failure, URL).body).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rule_status_agrees_with_condition_status() {
        let conditions = [
            FrameworkCondition::method_not_allowed(&axum::http::Method::DELETE),
            FrameworkCondition::unsupported_media_type("text/plain"),
            FrameworkCondition::UnreadableParameters {
                detail: String::new(),
            },
            FrameworkCondition::InvalidParameter {
                name: "n".to_string(),
                value: "v".to_string(),
            },
        ];
        for condition in conditions {
            let status = condition.status_code();
            assert_eq!(Rule::for_failure(&condition.into()).status_code(), status);
        }
    }
}
