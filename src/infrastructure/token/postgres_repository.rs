//! PostgreSQL token repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::token::{AccessToken, NewAccessToken, TokenRepository};
use crate::domain::DomainError;

/// PostgreSQL implementation of TokenRepository
#[derive(Debug, Clone)]
pub struct PostgresTokenRepository {
    pool: PgPool,
}

impl PostgresTokenRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PostgresTokenRepository {
    async fn insert(&self, token: &NewAccessToken) -> Result<AccessToken, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO access_tokens (token, user_id, scopes, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, token, user_id, scopes, created_at, expires_at
            "#,
        )
        .bind(&token.token)
        .bind(&token.user_id)
        .bind(&token.scopes)
        .bind(token.created_at)
        .bind(token.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();

            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                DomainError::conflict("Token value already exists")
            } else {
                DomainError::storage(format!("Failed to insert token: {}", e))
            }
        })?;

        row_to_token(&row)
    }

    async fn list_active(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<AccessToken>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, token, user_id, scopes, created_at, expires_at
            FROM access_tokens
            WHERE user_id = $1 AND expires_at > $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list tokens: {}", e)))?;

        let mut tokens = Vec::with_capacity(rows.len());

        for row in rows {
            tokens.push(row_to_token(&row)?);
        }

        Ok(tokens)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete expired tokens: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Store unreachable: {}", e)))?;

        Ok(())
    }
}

fn row_to_token(row: &sqlx::postgres::PgRow) -> Result<AccessToken, DomainError> {
    let id: Uuid = row.get("id");
    let token: String = row.get("token");
    let user_id: String = row.get("user_id");
    let scopes: Vec<String> = row.get("scopes");
    let created_at: DateTime<Utc> = row.get("created_at");
    let expires_at: DateTime<Utc> = row.get("expires_at");

    Ok(AccessToken::new(
        id, token, user_id, scopes, created_at, expires_at,
    ))
}
