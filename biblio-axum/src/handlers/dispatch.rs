//! The public email-dispatch page: collect an email, send the browser to
//! the owning tenant's login address.

use axum::extract::State;
use axum::response::Response;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::AppError;
use crate::handlers::{found, validation_failed};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct EmailForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
}

/// GET /login/
pub async fn page() -> Json<Value> {
    Json(json!({
        "page": "login",
        "fields": ["email"],
    }))
}

/// POST /login/ — resolve the email and redirect to the tenant login URL.
/// A miss is a user-visible form error, never a provisioning side effect.
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<EmailForm>,
) -> Result<Response, AppError> {
    form.validate().map_err(validation_failed)?;

    let location = state.dispatcher.dispatch(&form.email).await?;
    tracing::info!(email = %form.email, %location, "dispatching to tenant login");
    Ok(found(&location))
}
