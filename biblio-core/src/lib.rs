//! biblio-core: framework-agnostic tenant resolution core for Biblio.
//!
//! Everything here is transport-neutral: the directory and provisioning
//! contracts, the email-to-tenant dispatcher, the domain-restriction
//! decision table, and the in-memory storage backend. The HTTP layer
//! (`biblio-axum`) adapts these to axum.

pub mod config;
pub mod directory;
pub mod dispatch;
pub mod errors;
pub mod guard;
pub mod librarian;
pub mod provision;
pub mod store;
pub mod tenant;

pub use config::{HostKind, RoutingConfig};
pub use directory::{LibrarianRepo, ProvisionStore, TenantDirectory};
pub use dispatch::EmailDispatcher;
pub use errors::{BiblioError, BiblioResult, ErrorKind};
pub use guard::{evaluate, GuardDecision, GuardRequest};
pub use librarian::{normalize_email, Librarian, NewLibrarian};
pub use provision::TenantProvisioner;
pub use store::MemoryStore;
pub use tenant::{Tenant, TenantRoute, TenantSlug};
