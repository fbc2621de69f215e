//! Router assembly.
//!
//! Layer order matters: requests pass through the request-id and trace
//! layers first, then the session layer, then the guard, and only then a
//! handler. The guard therefore always sees a live session, and runs for
//! unmatched paths too.

use axum::middleware;
use axum::routing::get;
use axum::Router;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore as SessionMemoryStore, SessionManagerLayer};

use biblio_core::guard::{LOGOUT_PATH, PUBLIC_LOGIN_PATH, REGISTER_PATH, TENANT_LOGIN_PATH};

use crate::handlers;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let sessions = SessionManagerLayer::new(SessionMemoryStore::default()).with_secure(false);

    Router::new()
        .route(
            PUBLIC_LOGIN_PATH,
            get(handlers::dispatch::page).post(handlers::dispatch::submit),
        )
        .route(
            TENANT_LOGIN_PATH,
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route(
            REGISTER_PATH,
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route(LOGOUT_PATH, get(handlers::auth::logout))
        .route("/", get(handlers::home::page))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::guard::domain_restriction,
        ))
        .layer(sessions)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
