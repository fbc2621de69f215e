//! Email-to-tenant dispatch: the public entry point that turns an email
//! into its tenant's login address.

use std::sync::Arc;

use anyhow::Result;

use crate::config::RoutingConfig;
use crate::directory::TenantDirectory;
use crate::errors::BiblioError;
use crate::librarian::normalize_email;
use crate::tenant::TenantSlug;

/// Shown whenever an email resolves to no tenant.
pub const NO_TENANT_MESSAGE: &str = "No tenant found for this email.";

pub struct EmailDispatcher {
    directory: Arc<dyn TenantDirectory>,
    routing: RoutingConfig,
}

impl EmailDispatcher {
    pub fn new(directory: Arc<dyn TenantDirectory>, routing: RoutingConfig) -> Self {
        Self { directory, routing }
    }

    /// Resolve the email's tenant and build the login URL, carrying the
    /// email along as a pre-fill query parameter. The parameter is a
    /// convenience only, never proof of identity. A miss is `NotFound`;
    /// dispatch never provisions anything.
    pub async fn dispatch(&self, email: &str) -> Result<String> {
        let email = normalize_email(email);
        let slug = TenantSlug::from_email(&email)
            .ok_or_else(|| BiblioError::tenant_not_found(NO_TENANT_MESSAGE).into_anyhow())?;

        let route = self
            .directory
            .find_route(&slug)
            .await?
            .ok_or_else(|| BiblioError::tenant_not_found(NO_TENANT_MESSAGE).into_anyhow())?;

        Ok(format!(
            "{}?email={}",
            self.routing.tenant_login_url(&route.address),
            urlencoding::encode(&email)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::ProvisionStore;
    use crate::errors::ErrorKind;
    use crate::librarian::Librarian;
    use crate::store::MemoryStore;
    use crate::tenant::{Tenant, TenantRoute};

    async fn seeded() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        let slug = TenantSlug::from_email("alice@x.com").unwrap();
        let librarian = Librarian::new(
            "alice@x.com".into(),
            "$2b$10$hash".into(),
            "Alice".into(),
            "Pham".into(),
            Some(slug.clone()),
        );
        let tenant = Tenant {
            slug: slug.clone(),
            name: "Alice's Library".into(),
            owner: Some(librarian.id.clone()),
            created_at: chrono::Utc::now(),
        };
        let route = TenantRoute {
            address: "alice.localhost".into(),
            slug,
        };
        store
            .insert_registration(librarian, tenant, route)
            .await
            .unwrap();
        store
    }

    fn dispatcher(store: Arc<MemoryStore>) -> EmailDispatcher {
        EmailDispatcher::new(store, RoutingConfig::default())
    }

    #[tokio::test]
    async fn dispatch_builds_the_tenant_login_url() {
        let url = dispatcher(seeded().await)
            .dispatch("alice@x.com")
            .await
            .unwrap();
        assert_eq!(url, "http://alice.localhost:8000/login1/?email=alice%40x.com");
    }

    #[tokio::test]
    async fn dispatch_normalizes_before_deriving() {
        let url = dispatcher(seeded().await)
            .dispatch("  Alice@X.COM ")
            .await
            .unwrap();
        assert_eq!(url, "http://alice.localhost:8000/login1/?email=alice%40x.com");
    }

    #[tokio::test]
    async fn unknown_email_is_not_found_with_the_form_message() {
        let err = dispatcher(seeded().await)
            .dispatch("bob@x.com")
            .await
            .unwrap_err();
        let err = BiblioError::normalize(err);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, NO_TENANT_MESSAGE);
    }

    #[tokio::test]
    async fn underivable_email_is_not_found_too() {
        let err = dispatcher(seeded().await).dispatch("@x.com").await.unwrap_err();
        assert_eq!(BiblioError::normalize(err).kind, ErrorKind::NotFound);
    }
}
