//! Tenant landing page.

use axum::extract::State;
use axum::{Extension, Json};
use chrono::{Local, Timelike};
use serde_json::{json, Value};
use tower_sessions::Session;

use biblio_auth::session::{SessionUser, SESSION_USER_KEY};
use biblio_core::config::HostKind;
use biblio_core::errors::BiblioError;

use crate::error::AppError;
use crate::guard::ResolvedHost;
use crate::state::AppState;

/// GET / — the landing page of a tenant site. Host classification alone
/// decides the tenant; a request that reaches here on anything but a
/// known tenant host is a lookup miss, not a routing error.
pub async fn page(
    State(state): State<AppState>,
    Extension(ResolvedHost(host)): Extension<ResolvedHost>,
    session: Session,
) -> Result<Json<Value>, AppError> {
    let HostKind::Tenant(slug) = host else {
        return Err(BiblioError::tenant_not_found("No tenant matches this address.").into());
    };

    let tenant = state
        .directory
        .find_tenant(&slug)
        .await?
        .ok_or_else(|| BiblioError::tenant_not_found(format!("No tenant named '{slug}'.")))?;

    let user = session.get::<SessionUser>(SESSION_USER_KEY).await?;

    Ok(Json(json!({
        "page": "home",
        "greeting": greeting(Local::now().hour()),
        "tenant": {
            "slug": tenant.slug,
            "name": tenant.name,
        },
        "user": user.map(|u| json!({ "email": u.email })),
    })))
}

fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

#[cfg(test)]
mod tests {
    use super::greeting;

    #[test]
    fn greeting_buckets() {
        assert_eq!(greeting(0), "Good morning");
        assert_eq!(greeting(11), "Good morning");
        assert_eq!(greeting(12), "Good afternoon");
        assert_eq!(greeting(17), "Good afternoon");
        assert_eq!(greeting(18), "Good evening");
        assert_eq!(greeting(23), "Good evening");
    }
}
