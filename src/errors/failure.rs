use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use super::application::ApplicationError;
use super::dispatcher::Rule;
use super::downstream::DownstreamFailure;
use super::framework::FrameworkCondition;

/// Every failure that can end a request
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error(transparent)]
    Framework(#[from] FrameworkCondition),

    #[error(transparent)]
    Downstream(#[from] DownstreamFailure),

    /// Anything nobody anticipated
    #[error(transparent)]
    Unclassified(anyhow::Error),
}

impl From<anyhow::Error> for Failure {
    /// Recover a classified failure from an opaque error where one is hiding
    /// inside it; only what is left over is unclassified.
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ApplicationError>() {
            Ok(app) => return Self::Application(app),
            Err(err) => err,
        };
        let err = match err.downcast::<FrameworkCondition>() {
            Ok(condition) => return Self::Framework(condition),
            Err(err) => err,
        };
        let err = match err.downcast::<DownstreamFailure>() {
            Ok(downstream) => return Self::Downstream(downstream),
            Err(err) => err,
        };
        if let Some(downstream) = err
            .downcast_ref::<reqwest::Error>()
            .and_then(downstream_from_reqwest)
        {
            return Self::Downstream(downstream);
        }
        Self::Unclassified(err)
    }
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        match downstream_from_reqwest(&err) {
            Some(downstream) => Self::Downstream(downstream),
            None => Self::Unclassified(err.into()),
        }
    }
}

/// A reqwest error is a downstream failure only when the downstream answered
fn downstream_from_reqwest(err: &reqwest::Error) -> Option<DownstreamFailure> {
    let status = err.status()?;
    let url = err.url().map(|url| url.to_string()).unwrap_or_default();
    Some(DownstreamFailure::new(url, status, String::new()))
}

/// Failure waiting in a response's extensions for the translation middleware
#[derive(Debug, Clone)]
pub struct PendingFailure(Arc<Failure>);

impl PendingFailure {
    pub fn failure(&self) -> &Failure {
        &self.0
    }
}

impl IntoResponse for Failure {
    /// Carries only the rule's status and no body; the translation middleware
    /// replaces it with the full error response.
    fn into_response(self) -> Response {
        let mut response = Rule::for_failure(&self).status_code().into_response();
        response
            .extensions_mut()
            .insert(PendingFailure(Arc::new(self)));
        response
    }
}

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        Failure::from(self).into_response()
    }
}

impl IntoResponse for FrameworkCondition {
    fn into_response(self) -> Response {
        Failure::from(self).into_response()
    }
}
