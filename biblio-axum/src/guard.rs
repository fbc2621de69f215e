//! Domain-restriction middleware: every request passes here before any
//! handler, matched or not.

use axum::extract::{Request, State};
use axum::http::header::HOST;
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;

use biblio_auth::session::{SessionUser, SESSION_USER_KEY};
use biblio_core::config::HostKind;
use biblio_core::errors::BiblioError;
use biblio_core::guard::{self, GuardDecision, GuardRequest};

use crate::error::AppError;
use crate::handlers::found;
use crate::state::AppState;

/// Host classification attached to every forwarded request, so handlers
/// resolve the tenant context without re-parsing the Host header.
#[derive(Debug, Clone)]
pub struct ResolvedHost(pub HostKind);

pub async fn domain_restriction(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let host = request
        .headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
        .unwrap_or_default();
    let path = request.uri().path().to_string();

    let user = session.get::<SessionUser>(SESSION_USER_KEY).await?;
    let facts = GuardRequest {
        host: &host,
        path: &path,
        authenticated: user.is_some(),
        bound_tenant: user.and_then(|u| u.tenant),
    };

    match guard::evaluate(&state.routing, &facts) {
        GuardDecision::Forward(host_kind) => {
            request.extensions_mut().insert(ResolvedHost(host_kind));
            Ok(next.run(request).await)
        }
        GuardDecision::Redirect(location) => {
            tracing::debug!(%host, %path, %location, "domain restriction redirect");
            Ok(found(&location))
        }
        GuardDecision::Forbidden(message) => {
            tracing::warn!(%host, %path, "domain restriction rejected the request");
            Err(BiblioError::forbidden(message).into_anyhow().into())
        }
    }
}
