//! Infrastructure layer - external service implementations

pub mod logging;
pub mod token;
