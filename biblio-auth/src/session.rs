//! Session payload types and keys.
//!
//! The session is the sole carrier of "current tenant" state between
//! requests: [`SessionUser`] is stored under [`SESSION_USER_KEY`] on login,
//! and [`LAST_EMAIL_KEY`] holds the email preserved across logout — a
//! one-shot pre-fill read exactly once by the next login-page render.

use serde::{Deserialize, Serialize};

use biblio_core::librarian::Librarian;
use biblio_core::tenant::TenantSlug;

/// Key under which the authenticated librarian rides in the session.
pub const SESSION_USER_KEY: &str = "user";

/// Key for the email that survives logout, readable once.
pub const LAST_EMAIL_KEY: &str = "last_email";

/// The slice of a librarian a session carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub librarian_id: String,
    pub email: String,
    /// The tenant this login is bound to; what the guard checks hosts
    /// against.
    pub tenant: Option<TenantSlug>,
}

impl SessionUser {
    pub fn for_librarian(librarian: &Librarian) -> Self {
        Self {
            librarian_id: librarian.id.clone(),
            email: librarian.email.clone(),
            tenant: librarian.schema_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_user_copies_the_tenant_binding() {
        let slug = TenantSlug::parse("alice").unwrap();
        let librarian = Librarian::new(
            "alice@x.com".into(),
            "$2b$10$hash".into(),
            "Alice".into(),
            "Pham".into(),
            Some(slug.clone()),
        );
        let user = SessionUser::for_librarian(&librarian);
        assert_eq!(user.librarian_id, librarian.id);
        assert_eq!(user.email, "alice@x.com");
        assert_eq!(user.tenant, Some(slug));
    }
}
