//! The identity gate: credential verification against the librarian store.

use std::sync::Arc;

use anyhow::Result;

use biblio_core::directory::LibrarianRepo;
use biblio_core::errors::BiblioError;
use biblio_core::librarian::{normalize_email, Librarian};

use crate::hasher::PasswordHasher;

/// Gate tunables. One message covers unknown email, wrong password, and
/// blank fields, so a response never reveals which half failed.
#[derive(Clone, Debug)]
pub struct IdentityGateOptions {
    pub error_message: String,
}

impl Default for IdentityGateOptions {
    fn default() -> Self {
        Self {
            error_message: "Invalid email or password".to_string(),
        }
    }
}

pub struct IdentityGate {
    repo: Arc<dyn LibrarianRepo>,
    hasher: Arc<dyn PasswordHasher>,
    options: IdentityGateOptions,
}

impl IdentityGate {
    pub fn new(repo: Arc<dyn LibrarianRepo>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            repo,
            hasher,
            options: IdentityGateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: IdentityGateOptions) -> Self {
        self.options = options;
        self
    }

    fn rejected(&self) -> anyhow::Error {
        BiblioError::invalid_credentials(self.options.error_message.clone()).into_anyhow()
    }

    /// Verify credentials and return the matching librarian. The session
    /// binding (which tenant the login belongs to) rides on the returned
    /// record's `schema_name`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Librarian> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(self.rejected());
        }

        let email = normalize_email(email);
        let librarian = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| self.rejected())?;

        let ok = self
            .hasher
            .verify_password(password, &librarian.password_hash)
            .await?;
        if !ok {
            return Err(self.rejected());
        }

        Ok(librarian)
    }
}
