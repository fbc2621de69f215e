//! biblio-axum: the HTTP transport for Biblio.
//!
//! Adapts the routing core to axum: the router with its session and guard
//! layers, the form handlers, and the error-to-response seam.

mod app;
mod error;
mod guard;
mod handlers;
mod state;

pub use error::AppError;
pub use state::AppState;

use axum::Router;

/// Assemble the full application router around the given state.
pub fn build(state: AppState) -> Router {
    app::router(state)
}
