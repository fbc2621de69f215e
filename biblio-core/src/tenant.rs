//! Tenant records, routes, and the email-derived identifier.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The unique identifier of a tenant, derived from an email local part.
///
/// Doubles as the tenant's routing token (the subdomain label), so it is
/// restricted to lowercase ASCII alphanumerics and interior `-` separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantSlug(String);

impl TenantSlug {
    /// Derive the slug for an email address: the substring before `@`,
    /// lower-cased, every run of non-alphanumeric characters replaced by a
    /// single `-`, separators trimmed from the ends.
    ///
    /// Returns `None` when nothing alphanumeric is left — such an email
    /// cannot name a tenant. Provisioner and dispatcher both derive through
    /// here, so the two can never disagree.
    pub fn from_email(email: &str) -> Option<Self> {
        let local = email.split('@').next().unwrap_or("");
        let slug = slugify(local);
        if slug.is_empty() {
            None
        } else {
            Some(Self(slug))
        }
    }

    /// Accept an already-slugified label, e.g. one peeled off a hostname.
    /// Returns `None` unless it is exactly what `from_email` could produce.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.starts_with('-') || raw.ends_with('-') {
            return None;
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn slugify(local: &str) -> String {
    let mut slug = String::with_capacity(local.len());
    let mut pending_separator = false;
    for c in local.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

/// An isolated logical partition of the application's data, one per
/// registered library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique across all tenants; stable for the tenant's lifetime.
    pub slug: TenantSlug,
    pub name: String,
    /// Owning librarian id. Nullable: deleting the owner clears this
    /// reference but never deletes the tenant.
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Binds a tenant to the network address it is reached through.
/// One-to-one with its tenant; an address resolves to exactly one tenant
/// or none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRoute {
    /// Hostname without scheme or port, e.g. `alice.localhost`.
    pub address: String,
    pub slug: TenantSlug,
}
