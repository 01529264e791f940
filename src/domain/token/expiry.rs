//! Expiry arithmetic for access tokens

use chrono::{DateTime, Duration, Utc};

/// Advance `now` by the requested number of minutes.
///
/// Range checking is the validator's job; this function assumes a positive
/// minute count that fits the validated bounds. Uses chrono's calendar-aware
/// arithmetic so month and year boundaries resolve consistently.
pub fn compute_expiry(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now + Duration::minutes(minutes)
}

/// A token is expired strictly after its expiry instant.
/// At the exact instant, the token still counts as active.
pub fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > expires_at
}
