//! Access token domain - entity, expiry rules, validation, repository trait

pub mod entity;
pub mod expiry;
pub mod repository;
pub mod validation;

pub use entity::{AccessToken, NewAccessToken};
pub use expiry::{compute_expiry, is_expired};
pub use repository::TokenRepository;
pub use validation::{
    validate_create_request, validate_list_request, FieldError, TokenRuleViolation,
    ValidatedCreateRequest, MAX_EXPIRES_IN_MINUTES,
};
