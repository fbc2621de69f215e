use std::sync::Arc;

use biblio_auth::gate::IdentityGate;
use biblio_auth::hasher::PasswordHasher;
use biblio_core::config::RoutingConfig;
use biblio_core::directory::{LibrarianRepo, TenantDirectory};
use biblio_core::dispatch::EmailDispatcher;
use biblio_core::provision::TenantProvisioner;
use biblio_core::store::MemoryStore;

/// Shared handles for every handler and the guard middleware.
#[derive(Clone)]
pub struct AppState {
    pub routing: RoutingConfig,
    pub directory: Arc<dyn TenantDirectory>,
    pub librarians: Arc<dyn LibrarianRepo>,
    pub provisioner: Arc<TenantProvisioner>,
    pub gate: Arc<IdentityGate>,
    pub dispatcher: Arc<EmailDispatcher>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl AppState {
    /// Wire every service around one in-memory store.
    pub fn new(routing: RoutingConfig, hasher: Arc<dyn PasswordHasher>) -> Self {
        let store = Arc::new(MemoryStore::new());
        let directory: Arc<dyn TenantDirectory> = store.clone();
        let librarians: Arc<dyn LibrarianRepo> = store.clone();
        let provisioner = Arc::new(TenantProvisioner::new(store, routing.clone()));
        let gate = Arc::new(IdentityGate::new(librarians.clone(), hasher.clone()));
        let dispatcher = Arc::new(EmailDispatcher::new(directory.clone(), routing.clone()));

        Self {
            routing,
            directory,
            librarians,
            provisioner,
            gate,
            dispatcher,
            hasher,
        }
    }
}
