//! Tenant provisioning: the registration-time side effect that gives every
//! new librarian an isolated tenant and its route.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use crate::config::RoutingConfig;
use crate::directory::ProvisionStore;
use crate::errors::BiblioError;
use crate::librarian::{normalize_email, Librarian, NewLibrarian};
use crate::tenant::{Tenant, TenantRoute, TenantSlug};

/// Creates a librarian together with their tenant and route, atomically.
pub struct TenantProvisioner {
    store: Arc<dyn ProvisionStore>,
    routing: RoutingConfig,
}

impl TenantProvisioner {
    pub fn new(store: Arc<dyn ProvisionStore>, routing: RoutingConfig) -> Self {
        Self { store, routing }
    }

    /// Derive the tenant identifier from the email and commit librarian,
    /// tenant, and route in one step. A taken identifier or email fails
    /// with `Conflict` and leaves nothing behind; an email that yields no
    /// identifier is `Unprocessable`.
    pub async fn provision(&self, new: NewLibrarian) -> Result<(Librarian, Tenant)> {
        let email = normalize_email(&new.email);
        let slug = TenantSlug::from_email(&email).ok_or_else(|| {
            BiblioError::unprocessable(format!(
                "no tenant identifier can be derived from '{email}'"
            ))
            .into_anyhow()
        })?;

        let librarian = Librarian::new(
            email,
            new.password_hash,
            new.first_name,
            new.last_name,
            Some(slug.clone()),
        );
        let tenant = Tenant {
            slug: slug.clone(),
            name: format!("{}'s Library", librarian.first_name),
            owner: Some(librarian.id.clone()),
            created_at: Utc::now(),
        };
        let route = TenantRoute {
            address: self.routing.tenant_address(&slug),
            slug,
        };

        self.store
            .insert_registration(librarian.clone(), tenant.clone(), route)
            .await?;

        Ok((librarian, tenant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::TenantDirectory;
    use crate::errors::ErrorKind;
    use crate::store::MemoryStore;

    fn provisioner(store: &Arc<MemoryStore>) -> TenantProvisioner {
        TenantProvisioner::new(store.clone(), RoutingConfig::default())
    }

    fn registration(email: &str, first: &str) -> NewLibrarian {
        NewLibrarian {
            email: email.to_string(),
            password_hash: "$2b$10$hash".to_string(),
            first_name: first.to_string(),
            last_name: "Pham".to_string(),
        }
    }

    #[tokio::test]
    async fn provision_creates_tenant_route_and_binding() {
        let store = Arc::new(MemoryStore::new());
        let (librarian, tenant) = provisioner(&store)
            .provision(registration("Alice@X.com", "Alice"))
            .await
            .unwrap();

        assert_eq!(librarian.email, "alice@x.com");
        assert_eq!(tenant.slug.as_str(), "alice");
        assert_eq!(tenant.name, "Alice's Library");
        assert_eq!(tenant.owner.as_deref(), Some(librarian.id.as_str()));
        assert_eq!(librarian.schema_name, Some(tenant.slug.clone()));

        let route = store.find_route(&tenant.slug).await.unwrap().unwrap();
        assert_eq!(route.address, "alice.localhost");
    }

    #[tokio::test]
    async fn colliding_identifier_is_a_conflict() {
        let store = Arc::new(MemoryStore::new());
        let p = provisioner(&store);
        p.provision(registration("john.doe@a.com", "John"))
            .await
            .unwrap();

        // Different email, same derived identifier.
        let err = p
            .provision(registration("john-doe@b.org", "Johnny"))
            .await
            .unwrap_err();
        let err = BiblioError::normalize(err);
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn underivable_email_is_unprocessable() {
        let store = Arc::new(MemoryStore::new());
        let err = provisioner(&store)
            .provision(registration("...@x.com", "Dot"))
            .await
            .unwrap_err();
        assert_eq!(BiblioError::normalize(err).kind, ErrorKind::Unprocessable);
    }

    #[tokio::test]
    async fn concurrent_registrations_leave_exactly_one_tenant() {
        let store = Arc::new(MemoryStore::new());
        let p = Arc::new(provisioner(&store));

        let a = {
            let p = p.clone();
            tokio::spawn(async move { p.provision(registration("john.doe@a.com", "John")).await })
        };
        let b = {
            let p = p.clone();
            tokio::spawn(async move { p.provision(registration("john-doe@b.org", "Johnny")).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(
            a.is_ok() != b.is_ok(),
            "exactly one of the two registrations must win"
        );

        let slug = TenantSlug::from_email("john.doe@a.com").unwrap();
        let tenant = store.find_tenant(&slug).await.unwrap().unwrap();
        assert_eq!(tenant.slug, slug);
    }
}
