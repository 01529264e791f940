//! Token lifecycle service

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use super::generator::TokenGenerator;
use crate::domain::token::{compute_expiry, AccessToken, NewAccessToken, TokenRepository};
use crate::domain::DomainError;

/// Request for issuing a new token. Inputs are assumed to have passed
/// request validation already.
#[derive(Debug, Clone)]
pub struct CreateTokenRequest {
    pub user_id: String,
    pub scopes: Vec<String>,
    pub expires_in_minutes: i64,
}

/// Orchestrates the generator, expiry calculator and repository.
///
/// Creation either fully succeeds with one persisted record or fully fails
/// with nothing persisted; there is no partial state and no retry here.
#[derive(Debug)]
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    generator: TokenGenerator,
}

impl<R: TokenRepository> TokenService<R> {
    /// Create a new token service with the default generator
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: TokenGenerator::default(),
        }
    }

    /// Replace the secret generator
    pub fn with_generator(mut self, generator: TokenGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Issue and persist a new token.
    ///
    /// The expiry is computed from the same instant recorded as the creation
    /// time, so `expires_at - created_at` equals the requested duration
    /// exactly.
    pub async fn create(&self, request: CreateTokenRequest) -> Result<AccessToken, DomainError> {
        let token = self.generator.generate();
        let created_at = Utc::now();
        let expires_at = compute_expiry(created_at, request.expires_in_minutes);

        debug!(
            user_id = %request.user_id,
            expires_in_minutes = request.expires_in_minutes,
            "Issuing access token"
        );

        self.repository
            .insert(&NewAccessToken {
                token,
                user_id: request.user_id,
                scopes: request.scopes,
                created_at,
                expires_at,
            })
            .await
    }

    /// List the user's unexpired tokens, most recently created first.
    /// Read-only: expired records are filtered out, never touched.
    pub async fn list_active(&self, user_id: &str) -> Result<Vec<AccessToken>, DomainError> {
        self.repository.list_active(user_id, Utc::now()).await
    }

    /// Remove every expired record. Run out-of-band, never from the API.
    pub async fn sweep_expired(&self) -> Result<u64, DomainError> {
        self.repository.delete_expired(Utc::now()).await
    }

    /// Check store connectivity
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::token::repository::mock::MockTokenRepository;
    use chrono::Duration;
    use uuid::Uuid;

    fn service() -> (TokenService<MockTokenRepository>, Arc<MockTokenRepository>) {
        let repository = Arc::new(MockTokenRepository::new());
        (TokenService::new(repository.clone()), repository)
    }

    fn create_request(user_id: &str, minutes: i64) -> CreateTokenRequest {
        CreateTokenRequest {
            user_id: user_id.to_string(),
            scopes: vec!["read".to_string(), "write".to_string()],
            expires_in_minutes: minutes,
        }
    }

    #[tokio::test]
    async fn test_create_issues_token_with_exact_expiry() {
        let (service, _) = service();

        let record = service.create(create_request("user123", 60)).await.unwrap();

        assert!(record.token().starts_with("token_"));
        assert_eq!(record.user_id(), "user123");
        assert_eq!(record.scopes(), &["read".to_string(), "write".to_string()]);
        assert_eq!(
            record.expires_at() - record.created_at(),
            Duration::minutes(60)
        );
    }

    #[tokio::test]
    async fn test_create_generates_distinct_secrets() {
        let (service, _) = service();

        let first = service.create(create_request("user123", 60)).await.unwrap();
        let second = service.create(create_request("user123", 60)).await.unwrap();

        assert_ne!(first.token(), second.token());
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_created_token_immediately_listed() {
        let (service, _) = service();

        let record = service.create(create_request("user123", 60)).await.unwrap();
        let active = service.list_active("user123").await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].token(), record.token());
    }

    #[tokio::test]
    async fn test_list_active_excludes_expired() {
        let (service, repository) = service();
        let now = Utc::now();

        repository
            .seed(AccessToken::new(
                Uuid::new_v4(),
                "token_expired",
                "user123",
                vec!["read".to_string()],
                now - Duration::minutes(10),
                now - Duration::minutes(5),
            ))
            .await;
        repository
            .seed(AccessToken::new(
                Uuid::new_v4(),
                "token_active",
                "user123",
                vec!["read".to_string()],
                now,
                now + Duration::minutes(5),
            ))
            .await;

        let active = service.list_active("user123").await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].token(), "token_active");
    }

    #[tokio::test]
    async fn test_list_active_filters_by_user() {
        let (service, _) = service();

        service.create(create_request("alice", 60)).await.unwrap();
        service.create(create_request("bob", 60)).await.unwrap();

        let active = service.list_active("alice").await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].user_id(), "alice");
    }

    #[tokio::test]
    async fn test_list_active_orders_newest_first() {
        let (service, repository) = service();
        let now = Utc::now();

        for (token, age) in [("token_old", 30), ("token_new", 10)] {
            repository
                .seed(AccessToken::new(
                    Uuid::new_v4(),
                    token,
                    "user123",
                    vec!["read".to_string()],
                    now - Duration::minutes(age),
                    now + Duration::minutes(60),
                ))
                .await;
        }

        let active = service.list_active("user123").await.unwrap();

        assert_eq!(active.len(), 2);
        assert_eq!(active[0].token(), "token_new");
        assert_eq!(active[1].token(), "token_old");
    }

    #[tokio::test]
    async fn test_list_active_empty_for_unknown_user() {
        let (service, _) = service();

        let active = service.list_active("nobody").await.unwrap();
        assert!(active.is_empty());
    }

    #[tokio::test]
    async fn test_create_fails_cleanly_when_store_rejects() {
        let (service, repository) = service();
        repository.set_should_fail(true).await;

        let result = service.create(create_request("user123", 60)).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
        repository.set_should_fail(false).await;
        assert_eq!(repository.count().await, 0);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let (service, repository) = service();
        let now = Utc::now();

        repository
            .seed(AccessToken::new(
                Uuid::new_v4(),
                "token_expired",
                "user123",
                vec!["read".to_string()],
                now - Duration::minutes(10),
                now - Duration::minutes(5),
            ))
            .await;
        service.create(create_request("user123", 60)).await.unwrap();

        let removed = service.sweep_expired().await.unwrap();

        assert_eq!(removed, 1);
        assert_eq!(repository.count().await, 1);
    }
}
