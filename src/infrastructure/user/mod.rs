//! User infrastructure module
//!
//! Repository implementations (in-memory and PostgreSQL) and the account
//! lifecycle service built on top of them.

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{AccountService, SignupRequest, TokenPolicy, UpdateProfileRequest};
