//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Inner {
    users: HashMap<i64, User>,
    /// Index for username -> user id lookup
    username_index: HashMap<String, i64>,
    next_id: i64,
}

/// In-memory implementation of UserRepository.
///
/// All state sits behind one lock so the uniqueness check and the insert
/// happen as a single atomic step, mirroring the unique-index guarantee of
/// the PostgreSQL implementation.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;

        if inner.username_index.contains_key(&user.username) {
            return Err(DomainError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let username = user.username.clone();
        let user = User::new(UserId::new(id), user);

        inner.username_index.insert(username, id);
        inner.users.insert(id, user.clone());

        Ok(user)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;

        Ok(inner
            .users
            .values()
            .find(|u| u.token() == Some(token))
            .cloned())
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let inner = self.inner.read().await;

        let Some(id) = inner.username_index.get(username) else {
            return Ok(None);
        };

        Ok(inner
            .users
            .get(id)
            .filter(|u| u.password() == password)
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut inner = self.inner.write().await;
        let id = user.id().value();

        if !inner.users.contains_key(&id) {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        inner.users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut inner = self.inner.write().await;

        match inner.users.remove(&id.value()) {
            Some(user) => {
                inner.username_index.remove(user.username());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            first_name: "Alice".to_string(),
            last_name: "Cooper".to_string(),
            password: "secret1".to_string(),
            token: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        let first = repo.insert(new_user("user_one")).await.unwrap();
        let second = repo.insert(new_user("user_two")).await.unwrap();

        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_username_uniqueness() {
        let repo = InMemoryUserRepository::new();

        repo.insert(new_user("bob_jones")).await.unwrap();

        let result = repo.insert(new_user("bob_jones")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_find_by_credentials() {
        let repo = InMemoryUserRepository::new();

        repo.insert(new_user("bob_jones")).await.unwrap();

        let found = repo
            .find_by_credentials("bob_jones", "secret1")
            .await
            .unwrap();
        assert!(found.is_some());

        let wrong_password = repo
            .find_by_credentials("bob_jones", "secret2")
            .await
            .unwrap();
        assert!(wrong_password.is_none());

        let wrong_username = repo
            .find_by_credentials("nobody", "secret1")
            .await
            .unwrap();
        assert!(wrong_username.is_none());
    }

    #[tokio::test]
    async fn test_find_by_token() {
        let repo = InMemoryUserRepository::new();

        let mut user = repo.insert(new_user("bob_jones")).await.unwrap();
        assert!(repo.find_by_token("tok-1").await.unwrap().is_none());

        user.set_token(Some("tok-1".to_string()));
        repo.update(&user).await.unwrap();

        let found = repo.find_by_token("tok-1").await.unwrap();
        assert_eq!(found.unwrap().username(), "bob_jones");
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = InMemoryUserRepository::new();
        let other = InMemoryUserRepository::new();

        let user = other.insert(new_user("bob_jones")).await.unwrap();

        let result = repo.update(&user).await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_releases_username() {
        let repo = InMemoryUserRepository::new();

        let user = repo.insert(new_user("bob_jones")).await.unwrap();

        assert!(repo.delete(user.id()).await.unwrap());
        assert!(!repo.delete(user.id()).await.unwrap());

        // The username can be claimed again once the record is gone
        repo.insert(new_user("bob_jones")).await.unwrap();
    }
}
