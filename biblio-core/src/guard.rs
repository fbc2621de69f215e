//! Domain-restriction guard: the per-request decision at the center of the
//! routing core.
//!
//! Runs once for every inbound request before any handler. Keeps a
//! logged-in user of tenant A from operating inside tenant B's address
//! space, keeps anonymous traffic away from tenant-internal pages, and
//! keeps the public dispatch entry point reachable only from the canonical
//! public address.
//!
//! This module is pure: facts in, decision out. The transport adapter turns
//! the decision into a response.

use crate::config::{HostKind, RoutingConfig};
use crate::tenant::TenantSlug;

/// Public email-dispatch page; only served from the public host.
pub const PUBLIC_LOGIN_PATH: &str = "/login/";
/// Tenant-scoped credential login; reachable unauthenticated on any
/// tenant host.
pub const TENANT_LOGIN_PATH: &str = "/login1/";
/// Registration; anonymous by definition.
pub const REGISTER_PATH: &str = "/register/";
pub const LOGOUT_PATH: &str = "/logout/";

/// The facts one request presents to the guard.
#[derive(Debug, Clone)]
pub struct GuardRequest<'a> {
    pub host: &'a str,
    pub path: &'a str,
    pub authenticated: bool,
    /// Tenant identifier the session is bound to, when any.
    pub bound_tenant: Option<TenantSlug>,
}

/// What the transport should do with the request. Redirects and rejections
/// are terminal for the request; there is no partial forwarding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Hand the request to the matched handler, with the host
    /// classification attached.
    Forward(HostKind),
    /// 302 to the given location.
    Redirect(String),
    /// 403 with the given user-visible message.
    Forbidden(String),
}

/// Evaluate the decision table, top to bottom.
pub fn evaluate(config: &RoutingConfig, req: &GuardRequest<'_>) -> GuardDecision {
    let host_kind = config.classify_host(req.host);

    // Tenant hosts never serve the public dispatch page.
    if req.path == PUBLIC_LOGIN_PATH && host_kind != HostKind::Public {
        return GuardDecision::Forbidden("Please return to the original page.".to_string());
    }

    // The public host has no credential login of its own; send it to
    // dispatch instead.
    if req.path == TENANT_LOGIN_PATH && host_kind == HostKind::Public {
        return GuardDecision::Redirect(PUBLIC_LOGIN_PATH.to_string());
    }

    // Tenant login stays reachable for anonymous visitors.
    if req.path == TENANT_LOGIN_PATH {
        return GuardDecision::Forward(host_kind);
    }

    // A session bound to tenant A never operates under another known
    // address. Unknown hosts carry no tenant claim, so there is nothing to
    // mismatch against; they fall through to the authentication check.
    if req.authenticated {
        if let Some(bound) = &req.bound_tenant {
            let mismatched = match &host_kind {
                HostKind::Tenant(current) => current != bound,
                HostKind::Public => true,
                HostKind::Unknown => false,
            };
            if mismatched {
                return GuardDecision::Redirect(config.tenant_login_url_for(bound));
            }
        }
    }

    if !req.authenticated && !is_open_path(req.path) {
        return GuardDecision::Forbidden("You must log in to continue.".to_string());
    }

    GuardDecision::Forward(host_kind)
}

/// Pages reachable without a session.
fn is_open_path(path: &str) -> bool {
    matches!(path, PUBLIC_LOGIN_PATH | TENANT_LOGIN_PATH | REGISTER_PATH)
}
