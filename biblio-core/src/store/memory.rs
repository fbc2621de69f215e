//! In-memory storage backend for development and tests.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;

use crate::directory::{LibrarianRepo, ProvisionStore, TenantDirectory};
use crate::errors::BiblioError;
use crate::librarian::Librarian;
use crate::tenant::{Tenant, TenantRoute, TenantSlug};

#[derive(Default)]
struct Tables {
    /// Librarians keyed by normalized email.
    librarians: HashMap<String, Librarian>,
    /// Tenants keyed by slug.
    tenants: HashMap<String, Tenant>,
    /// Routes keyed by tenant slug.
    routes: HashMap<String, TenantRoute>,
}

/// Every table sits behind one lock so registration can check uniqueness
/// and insert in the same critical section; no lock is held across an
/// await.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TenantDirectory for MemoryStore {
    async fn find_tenant(&self, slug: &TenantSlug) -> Result<Option<Tenant>> {
        Ok(self.tables.read().tenants.get(slug.as_str()).cloned())
    }

    async fn find_route(&self, slug: &TenantSlug) -> Result<Option<TenantRoute>> {
        Ok(self.tables.read().routes.get(slug.as_str()).cloned())
    }
}

#[async_trait]
impl LibrarianRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Librarian>> {
        Ok(self.tables.read().librarians.get(email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Librarian>> {
        Ok(self
            .tables
            .read()
            .librarians
            .values()
            .find(|l| l.id == id)
            .cloned())
    }
}

#[async_trait]
impl ProvisionStore for MemoryStore {
    async fn insert_registration(
        &self,
        librarian: Librarian,
        tenant: Tenant,
        route: TenantRoute,
    ) -> Result<()> {
        let mut tables = self.tables.write();

        if tables.librarians.contains_key(&librarian.email) {
            return Err(BiblioError::conflict(format!(
                "'{}' is already registered",
                librarian.email
            ))
            .into_anyhow());
        }
        if tables.tenants.contains_key(tenant.slug.as_str()) {
            return Err(BiblioError::duplicate_tenant(format!(
                "a tenant with identifier '{}' already exists",
                tenant.slug
            ))
            .into_anyhow());
        }

        tables
            .librarians
            .insert(librarian.email.clone(), librarian);
        tables
            .tenants
            .insert(tenant.slug.as_str().to_string(), tenant);
        tables.routes.insert(route.slug.as_str().to_string(), route);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(email: &str, first: &str) -> (Librarian, Tenant, TenantRoute) {
        let slug = TenantSlug::from_email(email).unwrap();
        let librarian = Librarian::new(
            email.to_string(),
            "$2b$10$hash".to_string(),
            first.to_string(),
            "Pham".to_string(),
            Some(slug.clone()),
        );
        let tenant = Tenant {
            slug: slug.clone(),
            name: format!("{first}'s Library"),
            owner: Some(librarian.id.clone()),
            created_at: chrono::Utc::now(),
        };
        let route = TenantRoute {
            address: format!("{slug}.localhost"),
            slug,
        };
        (librarian, tenant, route)
    }

    #[tokio::test]
    async fn registration_is_visible_through_every_contract() {
        let store = MemoryStore::new();
        let (librarian, tenant, route) = records("alice@x.com", "Alice");
        let id = librarian.id.clone();
        store
            .insert_registration(librarian, tenant.clone(), route)
            .await
            .unwrap();

        assert!(store.find_tenant(&tenant.slug).await.unwrap().is_some());
        assert_eq!(
            store
                .find_route(&tenant.slug)
                .await
                .unwrap()
                .unwrap()
                .address,
            "alice.localhost"
        );
        assert!(store.find_by_email("alice@x.com").await.unwrap().is_some());
        assert_eq!(store.find_by_id(&id).await.unwrap().unwrap().id, id);
    }

    #[tokio::test]
    async fn missing_rows_read_back_as_none() {
        let store = MemoryStore::new();
        let slug = TenantSlug::parse("ghost").unwrap();
        assert!(store.find_tenant(&slug).await.unwrap().is_none());
        assert!(store.find_route(&slug).await.unwrap().is_none());
        assert!(store.find_by_email("ghost@x.com").await.unwrap().is_none());
        assert!(store.find_by_id("librarian:ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_slug_leaves_no_partial_rows() {
        let store = MemoryStore::new();
        let (l1, t1, r1) = records("john.doe@a.com", "John");
        store.insert_registration(l1, t1, r1).await.unwrap();

        // Same slug from a different email.
        let (l2, t2, r2) = records("john-doe@b.org", "Johnny");
        assert!(store.insert_registration(l2, t2.clone(), r2).await.is_err());

        // The loser's librarian row must not have been inserted either.
        assert!(store.find_by_email("john-doe@b.org").await.unwrap().is_none());
        // The winner's tenant is untouched.
        let kept = store.find_tenant(&t2.slug).await.unwrap().unwrap();
        assert_eq!(kept.name, "John's Library");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let (l1, t1, r1) = records("alice@x.com", "Alice");
        store.insert_registration(l1, t1, r1).await.unwrap();

        let (l2, t2, r2) = records("alice@x.com", "Alicia");
        let err = store.insert_registration(l2, t2, r2).await.unwrap_err();
        assert_eq!(
            BiblioError::normalize(err).kind,
            crate::errors::ErrorKind::Conflict
        );
    }
}
