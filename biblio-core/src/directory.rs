//! Storage-facing contracts for tenant resolution.
//!
//! Misses are `Ok(None)`; callers that treat a miss as an error map it to
//! the structured `NotFound`. Storage failures travel as `anyhow::Error`.

use anyhow::Result;
use async_trait::async_trait;

use crate::librarian::Librarian;
use crate::tenant::{Tenant, TenantRoute, TenantSlug};

/// Read side: resolve identifiers to tenants and their routes.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn find_tenant(&self, slug: &TenantSlug) -> Result<Option<Tenant>>;
    async fn find_route(&self, slug: &TenantSlug) -> Result<Option<TenantRoute>>;
}

/// Read side: librarian lookups for authentication.
#[async_trait]
pub trait LibrarianRepo: Send + Sync {
    /// Look up by email; the caller passes it already case-normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<Librarian>>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Librarian>>;
}

/// Write side: registration.
#[async_trait]
pub trait ProvisionStore: Send + Sync {
    /// Insert the librarian, their tenant, and its route in one atomic
    /// step: either all three exist afterwards or none do. Fails with
    /// `Conflict` when the email or the tenant identifier is already
    /// taken.
    async fn insert_registration(
        &self,
        librarian: Librarian,
        tenant: Tenant,
        route: TenantRoute,
    ) -> Result<()>;
}
