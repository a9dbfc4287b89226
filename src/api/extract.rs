//! Extractors whose rejections are framework conditions

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header::CONTENT_TYPE, request::Parts, Uri},
    Json,
};
use serde::de::DeserializeOwned;

use crate::errors::{Failure, FieldError, FrameworkCondition};

/// Content type assumed for a body sent without a `Content-Type` header
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Field-level validation run after a body has been decoded.
/// Errors are reported in the order the fields were evaluated.
pub trait Validate {
    fn validate(&self) -> Vec<FieldError>;
}

/// JSON body that has been decoded and validated
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Failure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| FrameworkCondition::from_json_rejection(rejection, &content_type))?;

        let errors = value.validate();
        if !errors.is_empty() {
            return Err(FrameworkCondition::InvalidFields { errors }.into());
        }

        Ok(Self(value))
    }
}

/// Typed query string. Failures are attributed to the offending parameter
/// whenever the decoder can name it.
#[derive(Debug, Clone)]
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Failure;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parse_query(parts.uri.query().unwrap_or_default())
            .map(Self)
            .map_err(Failure::from)
    }
}

/// Decode a raw query string, naming the offending parameter when possible
pub fn parse_query<T: DeserializeOwned>(query: &str) -> Result<T, FrameworkCondition> {
    let deserializer =
        serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));

    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let name = err.path().to_string();
        let value = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.into_owned());

        match value {
            Some(value) => FrameworkCondition::InvalidParameter { name, value },
            None => FrameworkCondition::UnreadableParameters {
                detail: err.inner().to_string(),
            },
        }
    })
}

/// Check that every parameter in `required` is present in the query string.
/// Missing names are reported in declaration order.
pub fn require_params(uri: &Uri, required: &[&str]) -> Result<(), FrameworkCondition> {
    let query = uri.query().unwrap_or_default();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == **name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FrameworkCondition::UnmetParameterConditions {
            conditions: missing,
        })
    }
}
