//! Librarian (user) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tenant::TenantSlug;

/// Normalize an email for storage, lookup, and comparison.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// A registered user. Each librarian owns at most one tenant, recorded in
/// `schema_name`; the binding, once set, is what the guard checks hosts
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Librarian {
    pub id: String,
    /// Unique, case-normalized.
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Bound tenant identifier; nullable.
    pub schema_name: Option<TenantSlug>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Librarian {
    /// Build a fresh record with a prefixed-UUID id and current timestamps.
    /// The email must already be normalized and the password hashed.
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
        schema_name: Option<TenantSlug>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: format!("librarian:{}", Uuid::new_v4()),
            email,
            password_hash,
            first_name,
            last_name,
            schema_name,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration input, after credential hashing and before provisioning.
#[derive(Debug, Clone)]
pub struct NewLibrarian {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_normalize_to_trimmed_lowercase() {
        assert_eq!(normalize_email("  Alice@X.COM "), "alice@x.com");
        assert_eq!(normalize_email("bob@y.org"), "bob@y.org");
    }

    #[test]
    fn new_librarians_get_prefixed_ids() {
        let l = Librarian::new(
            "alice@x.com".into(),
            "$2b$hash".into(),
            "Alice".into(),
            "Pham".into(),
            None,
        );
        assert!(l.id.starts_with("librarian:"));
        assert_eq!(l.full_name(), "Alice Pham");
        assert_eq!(l.created_at, l.updated_at);
    }
}
