//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage.
///
/// Every operation is atomic with respect to concurrent callers; in
/// particular `insert` enforces username uniqueness in the same step as the
/// write and reports a duplicate as `DomainError::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Insert a new user, assigning its id
    async fn insert(&self, user: NewUser) -> Result<User, DomainError>;

    /// Find the user currently holding a session token
    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError>;

    /// Find a user whose username and password both match exactly
    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Persist the current state of an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Permanently remove a user; returns whether a record was deleted
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
}
