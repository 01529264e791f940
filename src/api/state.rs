//! Application state for shared services

use std::sync::Arc;

use crate::domain::token::TokenRepository;
use crate::domain::{AccessToken, DomainError};
use crate::infrastructure::token::{CreateTokenRequest, TokenService};

/// Application state shared across request handlers.
///
/// Built once at startup; the token service owns the process-wide connection
/// pool, and the configured API key (if any) is read once from the
/// environment.
#[derive(Clone)]
pub struct AppState {
    pub token_service: Arc<dyn TokenServiceTrait>,
    pub api_key: Option<String>,
}

/// Trait for token service operations
#[async_trait::async_trait]
pub trait TokenServiceTrait: Send + Sync {
    async fn create(&self, request: CreateTokenRequest) -> Result<AccessToken, DomainError>;
    async fn list_active(&self, user_id: &str) -> Result<Vec<AccessToken>, DomainError>;
    async fn sweep_expired(&self) -> Result<u64, DomainError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: TokenRepository + 'static> TokenServiceTrait for TokenService<R> {
    async fn create(&self, request: CreateTokenRequest) -> Result<AccessToken, DomainError> {
        TokenService::create(self, request).await
    }

    async fn list_active(&self, user_id: &str) -> Result<Vec<AccessToken>, DomainError> {
        TokenService::list_active(self, user_id).await
    }

    async fn sweep_expired(&self) -> Result<u64, DomainError> {
        TokenService::sweep_expired(self).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        TokenService::ping(self).await
    }
}

impl AppState {
    /// Create new application state with the provided service
    pub fn new(token_service: Arc<dyn TokenServiceTrait>, api_key: Option<String>) -> Self {
        Self {
            token_service,
            api_key,
        }
    }
}
