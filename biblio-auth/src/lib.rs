//! biblio-auth: the identity & session gate for Biblio.
//!
//! Credential verification against the librarian store, the bcrypt hashing
//! seam, and the typed payload a session carries between requests.

pub mod gate;
pub mod hasher;
pub mod session;

pub use gate::{IdentityGate, IdentityGateOptions};
pub use hasher::{BcryptHasher, PasswordHasher};
pub use session::{SessionUser, LAST_EMAIL_KEY, SESSION_USER_KEY};
