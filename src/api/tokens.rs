//! Token issue and list endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

use crate::api::middleware::RequireApiKey;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::token::{validate_create_request, validate_list_request};
use crate::domain::AccessToken;
use crate::infrastructure::token::CreateTokenRequest;

/// Request body for issuing a token.
///
/// Every field is optional at the serde level so that missing or malformed
/// fields surface as per-field validation details rather than a body parse
/// error. `expiresInMinutes` stays a raw JSON number for the same reason.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenBody {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    #[serde(default)]
    pub expires_in_minutes: Option<Number>,
}

/// Query parameters for listing tokens
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTokensQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Wire form of a token record. Timestamps are ISO-8601 UTC with millisecond
/// precision; everything else passes through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub id: Uuid,
    pub token: String,
    pub user_id: String,
    pub scopes: Vec<String>,
    pub created_at: String,
    pub expires_at: String,
}

impl From<&AccessToken> for TokenResponse {
    fn from(record: &AccessToken) -> Self {
        Self {
            id: record.id(),
            token: record.token().to_string(),
            user_id: record.user_id().to_string(),
            scopes: record.scopes().to_vec(),
            created_at: record
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            expires_at: record
                .expires_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// POST /api/tokens
pub async fn create_token(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Json(body): Json<CreateTokenBody>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let request = validate_create_request(
        body.user_id.as_deref(),
        body.scopes.as_deref(),
        body.expires_in_minutes.as_ref(),
    )
    .map_err(ApiError::validation_failed)?;

    let record = state
        .token_service
        .create(CreateTokenRequest {
            user_id: request.user_id,
            scopes: request.scopes,
            expires_in_minutes: request.expires_in_minutes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TokenResponse::from(&record))))
}

/// GET /api/tokens?userId=...
pub async fn list_tokens(
    State(state): State<AppState>,
    _auth: RequireApiKey,
    Query(query): Query<ListTokensQuery>,
) -> Result<Json<Vec<TokenResponse>>, ApiError> {
    let user_id =
        validate_list_request(query.user_id.as_deref()).map_err(ApiError::validation_failed)?;

    let tokens = state.token_service.list_active(&user_id).await?;

    Ok(Json(tokens.iter().map(TokenResponse::from).collect()))
}
