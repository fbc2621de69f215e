//! Page and form handlers. GETs return JSON render payloads (templating is
//! a separate concern); POSTs take urlencoded form bodies the way browsers
//! submit them.

pub mod auth;
pub mod dispatch;
pub mod home;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use biblio_core::errors::BiblioError;

use crate::error::AppError;

/// A `302 Found` redirect; axum's `Redirect` helpers only emit
/// 303/307/308.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Map form validation failures to a 422 whose `errors` object holds
/// `field: [messages]` pairs. The forms here are flat structs, so only
/// field-level errors can occur.
pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> AppError {
    let mut details = serde_json::Map::new();
    for (field, kind) in errors.errors() {
        if let validator::ValidationErrorsKind::Field(field_errors) = kind {
            let messages = field_errors
                .iter()
                .map(|e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    Value::String(msg)
                })
                .collect();
            details.insert(field.to_string(), Value::Array(messages));
        }
    }

    BiblioError::unprocessable("Validation failed")
        .with_errors(Value::Object(details))
        .into_anyhow()
        .into()
}
