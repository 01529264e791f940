//! Domain layer - core business logic and entities

pub mod error;
pub mod token;

pub use error::DomainError;
pub use token::{
    compute_expiry, is_expired, validate_create_request, validate_list_request, AccessToken,
    FieldError, NewAccessToken, TokenRepository, ValidatedCreateRequest, MAX_EXPIRES_IN_MINUTES,
};
