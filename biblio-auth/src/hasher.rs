//! Credential hashing.

use anyhow::Result;
use async_trait::async_trait;
use bcrypt::{hash, verify};

/// Hashing seam so the transport layer and tests can choose the cost.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String>;
    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// bcrypt-backed hasher.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self { cost: 10 }
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, self.cost).map_err(|e| anyhow::anyhow!(e.to_string()))
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        verify(password, password_hash).map_err(|e| anyhow::anyhow!(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hasher = BcryptHasher::new(4);
        let digest = hasher.hash_password("s3cret").await.unwrap();
        assert!(hasher.verify_password("s3cret", &digest).await.unwrap());
        assert!(!hasher.verify_password("wrong", &digest).await.unwrap());
    }
}
