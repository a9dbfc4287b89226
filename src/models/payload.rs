use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::extract::Validate;
use crate::errors::FieldError;

/// Body accepted by, and returned from, the demo operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Data {
    pub value: String,
}

impl Validate for Data {
    fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.value.trim().is_empty() {
            errors.push(FieldError::new("value", "must not be blank"));
        }
        if self.value.len() > 256 {
            errors.push(FieldError::new("value", "size must be between 0 and 256"));
        }
        errors
    }
}

/// Closed set of values accepted by the `enum` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Choice {
    Value,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceParams {
    #[serde(rename = "enum")]
    pub choice: Choice,
}
