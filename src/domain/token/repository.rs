//! Token repository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;

use super::entity::{AccessToken, NewAccessToken};
use crate::domain::DomainError;

/// Repository trait for access token storage.
///
/// The store's unique constraint on the token column is the single source of
/// truth for token uniqueness; implementations surface a violation as
/// `DomainError::Conflict`.
#[async_trait]
pub trait TokenRepository: Send + Sync + Debug {
    /// Persist a new token record. The store assigns the id; on success the
    /// full record is returned and is immediately visible to list queries.
    async fn insert(&self, token: &NewAccessToken) -> Result<AccessToken, DomainError>;

    /// All records for the user whose expiry is strictly after `now`,
    /// most recently created first.
    async fn list_active(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<AccessToken>, DomainError>;

    /// Delete every record whose expiry is at or before `now`.
    /// Maintenance only - never invoked by the API.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use uuid::Uuid;

    /// Mock token repository for testing
    #[derive(Debug, Default)]
    pub struct MockTokenRepository {
        tokens: Arc<RwLock<Vec<AccessToken>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockTokenRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Seed a record directly, bypassing the service
        pub async fn seed(&self, token: AccessToken) {
            self.tokens.write().await.push(token);
        }

        pub async fn count(&self) -> usize {
            self.tokens.read().await.len()
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TokenRepository for MockTokenRepository {
        async fn insert(&self, token: &NewAccessToken) -> Result<AccessToken, DomainError> {
            self.check_should_fail().await?;
            let mut tokens = self.tokens.write().await;

            if tokens.iter().any(|t| t.token() == token.token) {
                return Err(DomainError::conflict(format!(
                    "Token '{}' already exists",
                    token.token
                )));
            }

            let record = AccessToken::new(
                Uuid::new_v4(),
                &token.token,
                &token.user_id,
                token.scopes.clone(),
                token.created_at,
                token.expires_at,
            );
            tokens.push(record.clone());
            Ok(record)
        }

        async fn list_active(
            &self,
            user_id: &str,
            now: DateTime<Utc>,
        ) -> Result<Vec<AccessToken>, DomainError> {
            self.check_should_fail().await?;
            let tokens = self.tokens.read().await;

            let mut active: Vec<AccessToken> = tokens
                .iter()
                .filter(|t| t.user_id() == user_id && t.expires_at() > now)
                .cloned()
                .collect();
            active.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

            Ok(active)
        }

        async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
            self.check_should_fail().await?;
            let mut tokens = self.tokens.write().await;

            let before = tokens.len();
            tokens.retain(|t| t.expires_at() > now);

            Ok((before - tokens.len()) as u64)
        }

        async fn ping(&self) -> Result<(), DomainError> {
            self.check_should_fail().await
        }
    }
}
