//! `ValidatedJson` extractor: JSON body plus `validator` checks.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::{Validate, ValidationErrors};

use leavedesk_core::error::AppError;

use crate::error::ApiError;

/// A JSON body that passed its `Validate` rules.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        value.validate().map_err(aggregate)?;
        Ok(Self(value))
    }
}

/// Fold every field failure into one validation error.
///
/// `details` lists `{field, message}` sorted by field; the top-level
/// message is the first of them.
pub fn aggregate(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let details: Vec<serde_json::Value> = fields
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"));
                json!({ "field": field.to_string(), "message": message })
            })
        })
        .collect();

    let message = details
        .first()
        .and_then(|d| d["message"].as_str())
        .unwrap_or("Validation failed")
        .to_string();

    AppError::validation(message).with_details(serde_json::Value::Array(details))
}
