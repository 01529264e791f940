//! Request validation for the token endpoints
//!
//! Rules are evaluated as a flat rule set against the raw request values and
//! every violation is collected, so a response can report all failing fields
//! at once rather than just the first one.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use thiserror::Error;

/// Upper bound for the requested lifetime, inclusive (366 days in minutes).
pub const MAX_EXPIRES_IN_MINUTES: i64 = 525_600;

/// A single failed rule
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenRuleViolation {
    #[error("userId must be a non-empty string")]
    EmptyUserId,

    #[error("scopes must contain at least one scope")]
    EmptyScopes,

    #[error("scopes[{0}] must be a non-empty string")]
    EmptyScope(usize),

    #[error("expiresInMinutes must be an integer")]
    NotAnInteger,

    #[error("expiresInMinutes must be greater than 0")]
    NonPositiveMinutes,

    #[error("expiresInMinutes must be at most {0}")]
    MinutesTooLarge(i64),
}

/// A (field, reason) pair describing one validation failure, in the shape
/// returned to clients under `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, violation: &TokenRuleViolation) -> Self {
        Self {
            field: field.into(),
            message: violation.to_string(),
        }
    }
}

/// A create request that passed every rule
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCreateRequest {
    pub user_id: String,
    pub scopes: Vec<String>,
    pub expires_in_minutes: i64,
}

/// Validate a token creation request.
///
/// `expires_in_minutes` arrives as a raw JSON number so that fractional
/// values are reported as a field violation instead of a body parse error.
pub fn validate_create_request(
    user_id: Option<&str>,
    scopes: Option<&[String]>,
    expires_in_minutes: Option<&Number>,
) -> Result<ValidatedCreateRequest, Vec<FieldError>> {
    let mut errors = Vec::new();

    let user_id = match user_id {
        Some(id) if !id.is_empty() => Some(id),
        _ => {
            errors.push(FieldError::new("userId", &TokenRuleViolation::EmptyUserId));
            None
        }
    };

    let scopes = match scopes {
        Some(scopes) if !scopes.is_empty() => {
            for (index, scope) in scopes.iter().enumerate() {
                if scope.is_empty() {
                    errors.push(FieldError::new(
                        "scopes",
                        &TokenRuleViolation::EmptyScope(index),
                    ));
                }
            }
            Some(scopes)
        }
        _ => {
            errors.push(FieldError::new("scopes", &TokenRuleViolation::EmptyScopes));
            None
        }
    };

    let minutes = match expires_in_minutes {
        Some(value) => match validate_minutes(value) {
            Ok(minutes) => Some(minutes),
            Err(violation) => {
                errors.push(FieldError::new("expiresInMinutes", &violation));
                None
            }
        },
        None => {
            errors.push(FieldError::new(
                "expiresInMinutes",
                &TokenRuleViolation::NotAnInteger,
            ));
            None
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    // All three are Some once errors is empty
    Ok(ValidatedCreateRequest {
        user_id: user_id.unwrap_or_default().to_string(),
        scopes: scopes.unwrap_or_default().to_vec(),
        expires_in_minutes: minutes.unwrap_or_default(),
    })
}

/// Validate a list request, returning the validated user id.
pub fn validate_list_request(user_id: Option<&str>) -> Result<String, Vec<FieldError>> {
    match user_id {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => Err(vec![FieldError::new(
            "userId",
            &TokenRuleViolation::EmptyUserId,
        )]),
    }
}

fn validate_minutes(value: &Number) -> Result<i64, TokenRuleViolation> {
    let minutes = match value.as_i64() {
        Some(minutes) => minutes,
        None => {
            if value.is_u64() {
                // Integral but beyond i64 - way past the upper bound anyway
                return Err(TokenRuleViolation::MinutesTooLarge(MAX_EXPIRES_IN_MINUTES));
            }

            // Accept floats that carry an exact integral value ("60.0"),
            // matching how the deployed service treated JSON numbers
            match value.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
                _ => return Err(TokenRuleViolation::NotAnInteger),
            }
        }
    };

    if minutes <= 0 {
        return Err(TokenRuleViolation::NonPositiveMinutes);
    }

    if minutes > MAX_EXPIRES_IN_MINUTES {
        return Err(TokenRuleViolation::MinutesTooLarge(MAX_EXPIRES_IN_MINUTES));
    }

    Ok(minutes)
}
