//! Token secret generation

use uuid::Uuid;

/// Default prefix for generated token secrets
const DEFAULT_PREFIX: &str = "token_";

/// Generates opaque bearer token secrets.
///
/// Secrets are the prefix followed by a hyphenated v4 UUID (122 bits of
/// randomness from the OS entropy source). No collision check is performed
/// here; the store's unique constraint is the backstop.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    /// Prefix for all generated secrets
    prefix: String,
}

impl TokenGenerator {
    /// Create a generator with the given prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Generate a new token secret
    pub fn generate(&self) -> String {
        format!("{}{}", self.prefix, Uuid::new_v4())
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}
