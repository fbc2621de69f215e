//! Routing configuration: where the public dispatch host and the tenant
//! subdomains live, and how hosts map back to tenants.
//!
//! Values come from `BIBLIO__ROUTING__*` environment variables
//! (double-underscore convention, e.g. `BIBLIO__ROUTING__ROOT_DOMAIN`),
//! falling back to defaults that mirror the development deployment:
//! public host `127.0.0.1:8000`, tenants under `*.localhost:8000`.

use serde::{Deserialize, Serialize};

use crate::tenant::TenantSlug;

/// What a request's Host header resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostKind {
    /// The canonical public dispatch host.
    Public,
    /// A subdomain of the root domain naming a tenant. Syntactic only:
    /// nothing here checks that the tenant exists.
    Tenant(TenantSlug),
    /// Malformed, empty, or foreign; carries no tenant claim.
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// URL scheme for generated absolute redirects.
    pub scheme: String,
    /// The canonical public host exactly as browsers send it, port included
    /// when non-default.
    pub public_host: String,
    /// Domain tenant subdomains hang off of (`localhost` → `alice.localhost`).
    pub root_domain: String,
    /// Port appended to generated tenant URLs; `None` for the scheme default.
    pub port: Option<u16>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            public_host: "127.0.0.1:8000".to_string(),
            root_domain: "localhost".to_string(),
            port: Some(8000),
        }
    }
}

impl RoutingConfig {
    /// Load from the environment, keeping defaults for anything unset.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("BIBLIO__ROUTING__SCHEME") {
            cfg.scheme = v;
        }
        if let Ok(v) = std::env::var("BIBLIO__ROUTING__PUBLIC_HOST") {
            cfg.public_host = v;
        }
        if let Ok(v) = std::env::var("BIBLIO__ROUTING__ROOT_DOMAIN") {
            cfg.root_domain = v;
        }
        if let Ok(v) = std::env::var("BIBLIO__ROUTING__PORT") {
            cfg.port = v.parse().ok();
        }
        cfg
    }

    /// Classify a Host header value.
    ///
    /// The public host is compared whole, port included; tenant hosts are
    /// matched on the hostname with any port stripped.
    pub fn classify_host(&self, host: &str) -> HostKind {
        let host = host.trim().to_ascii_lowercase();
        if host.is_empty() {
            return HostKind::Unknown;
        }
        if host == self.public_host.to_ascii_lowercase() {
            return HostKind::Public;
        }

        let bare = strip_port(&host);
        let suffix = format!(".{}", self.root_domain.to_ascii_lowercase());
        if let Some(label) = bare.strip_suffix(suffix.as_str()) {
            if let Some(slug) = TenantSlug::parse(label) {
                return HostKind::Tenant(slug);
            }
        }
        HostKind::Unknown
    }

    /// `alice` → `alice.localhost`; the address stored on a tenant's route.
    pub fn tenant_address(&self, slug: &TenantSlug) -> String {
        format!("{}.{}", slug, self.root_domain)
    }

    /// Absolute URL of the credential login page at the given route address.
    pub fn tenant_login_url(&self, address: &str) -> String {
        format!(
            "{}://{}{}{}",
            self.scheme,
            address,
            self.port_suffix(),
            crate::guard::TENANT_LOGIN_PATH
        )
    }

    /// Absolute login URL for a tenant known only by slug (no route lookup;
    /// the guard redirects without touching storage).
    pub fn tenant_login_url_for(&self, slug: &TenantSlug) -> String {
        self.tenant_login_url(&self.tenant_address(slug))
    }

    fn port_suffix(&self) -> String {
        match self.port {
            Some(p) => format!(":{p}"),
            None => String::new(),
        }
    }
}

/// Drop a trailing `:port` when the tail is all digits; anything else is
/// left alone.
fn strip_port(host: &str) -> &str {
    match host.rfind(':') {
        Some(idx) if !host[idx + 1..].is_empty() && host[idx + 1..].bytes().all(|b| b.is_ascii_digit()) => {
            &host[..idx]
        }
        _ => host,
    }
}
