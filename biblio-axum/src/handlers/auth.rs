//! Tenant login, registration, and logout.

use axum::extract::{Query, State};
use axum::response::Response;
use axum::{Form, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;
use validator::Validate;

use biblio_auth::session::{SessionUser, LAST_EMAIL_KEY, SESSION_USER_KEY};
use biblio_core::guard::TENANT_LOGIN_PATH;
use biblio_core::librarian::NewLibrarian;

use crate::error::AppError;
use crate::handlers::{found, validation_failed};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
}

/// GET /login1/ — render data for the tenant credential login form.
///
/// The email box pre-fills from the one-shot `last_email` slot when it
/// holds something, else from the `?email=` parameter the dispatcher
/// appends. Reading the slot consumes it. The field always renders
/// read-only; changing the address means going back through dispatch.
pub async fn login_page(
    session: Session,
    Query(query): Query<LoginPageQuery>,
) -> Result<Json<Value>, AppError> {
    let last = session.remove::<String>(LAST_EMAIL_KEY).await?;
    let email = last
        .filter(|e| !e.is_empty())
        .or(query.email)
        .unwrap_or_default();

    Ok(Json(json!({
        "page": "login1",
        "form": {
            "email": email,
            "email_readonly": true,
        },
    })))
}

/// POST /login1/ — verify credentials and bind the session to the
/// librarian's tenant.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let librarian = state.gate.authenticate(&form.email, &form.password).await?;

    // Fresh id, fresh payload: the session now carries the tenant binding.
    session.clear().await;
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_KEY, SessionUser::for_librarian(&librarian))
        .await?;

    tracing::info!(
        email = %librarian.email,
        tenant = ?librarian.schema_name,
        "login succeeded"
    );
    Ok(found("/"))
}

/// GET /register/
pub async fn register_page() -> Json<Value> {
    Json(json!({
        "page": "register",
        "fields": ["email", "password", "first_name", "last_name"],
    }))
}

/// POST /register/ — create the librarian and provision their tenant in
/// one atomic step.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if let Err(errors) = form.validate() {
        tracing::warn!(%errors, "invalid registration attempt");
        return Err(validation_failed(errors));
    }

    let password_hash = state.hasher.hash_password(&form.password).await?;
    let (librarian, tenant) = state
        .provisioner
        .provision(NewLibrarian {
            email: form.email,
            password_hash,
            first_name: form.first_name,
            last_name: form.last_name,
        })
        .await?;

    tracing::info!(
        email = %librarian.email,
        tenant = %tenant.slug,
        "librarian registered and tenant provisioned"
    );
    Ok(found(TENANT_LOGIN_PATH))
}

/// GET /logout/ — destroy the session; only the one-shot email pre-fill
/// survives, written into the successor session.
pub async fn logout(session: Session) -> Result<Response, AppError> {
    let email = session
        .get::<SessionUser>(SESSION_USER_KEY)
        .await?
        .map(|u| u.email)
        .unwrap_or_default();

    session.clear().await;
    session.cycle_id().await?;
    session.insert(LAST_EMAIL_KEY, email).await?;

    Ok(found(TENANT_LOGIN_PATH))
}
