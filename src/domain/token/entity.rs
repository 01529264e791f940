//! Access token entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::expiry::is_expired;

/// A persisted access token record.
///
/// Records are immutable after creation: the lifecycle is create, read any
/// number of times, then fall out of active queries once `expires_at` passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Store-assigned identifier, never reused
    id: Uuid,
    /// The bearer secret, unique across all records
    token: String,
    /// Owning user - a plain attribute, not a foreign key
    user_id: String,
    /// Granted permission tags, order preserved, duplicates permitted
    scopes: Vec<String>,
    /// Set at insert time
    created_at: DateTime<Utc>,
    /// `created_at` plus the requested duration, always strictly later
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(
        id: Uuid,
        token: impl Into<String>,
        user_id: impl Into<String>,
        scopes: Vec<String>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            token: token.into(),
            user_id: user_id.into(),
            scopes,
            created_at,
            expires_at,
        }
    }

    // Getters

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Check whether this token is expired at the given instant.
    /// The expiry instant itself still counts as active.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }
}

/// An access token that has not been persisted yet.
///
/// The store assigns the `id` on insert; everything else is computed by the
/// lifecycle service before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccessToken {
    pub token: String,
    pub user_id: String,
    pub scopes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
