//! API key gate
//!
//! A single shared secret configured at process start. When no key is
//! configured the gate is open - local development only.

use std::sync::Once;

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;

static OPEN_MODE_WARNING: Once = Once::new();

/// Check a presented key against the configured one.
///
/// With no configured key every request passes. Otherwise the presented key
/// must be present and byte-for-byte equal.
pub fn authorize(presented: Option<&str>, configured: Option<&str>) -> bool {
    match configured {
        None => {
            OPEN_MODE_WARNING.call_once(|| {
                warn!(
                    "No API key configured; all requests are accepted. \
                     Set API_KEY before exposing this service."
                );
            });
            true
        }
        Some(expected) => presented.is_some_and(|key| key.as_bytes() == expected.as_bytes()),
    }
}

/// Extractor that enforces the API key gate.
///
/// The key is read from the `X-API-Key` header. Rejections carry a fixed
/// message and never reveal whether a key is configured.
#[derive(Debug, Clone)]
pub struct RequireApiKey;

impl FromRequestParts<AppState> for RequireApiKey {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = extract_api_key_from_headers(&parts.headers);

        if authorize(presented.as_deref(), state.api_key.as_deref()) {
            Ok(RequireApiKey)
        } else {
            debug!("API key missing or mismatched");
            Err(ApiError::unauthorized())
        }
    }
}

fn extract_api_key_from_headers(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(|key| key.to_string())
}
