//! Token infrastructure - generator, storage and lifecycle service

pub mod generator;
pub mod postgres_repository;
pub mod service;

pub use generator::TokenGenerator;
pub use postgres_repository::PostgresTokenRepository;
pub use service::{CreateTokenRequest, TokenService};
