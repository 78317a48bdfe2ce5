//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::user::{AccountService, SignupRequest, UpdateProfileRequest};

/// Application state containing the account service behind dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServiceApi>,
}

impl AppState {
    /// Create new application state with the provided service
    pub fn new(account_service: Arc<dyn AccountServiceApi>) -> Self {
        Self { account_service }
    }
}

/// Trait for account lifecycle operations
#[async_trait::async_trait]
pub trait AccountServiceApi: Send + Sync {
    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError>;
    async fn signin(&self, username: &str, password: &str) -> Result<User, DomainError>;
    async fn fetch(&self, token: &str) -> Result<User, DomainError>;
    async fn update_profile(
        &self,
        token: &str,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError>;
    async fn signout(&self, token: &str) -> Result<(), DomainError>;
    async fn delete(&self, token: &str) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static> AccountServiceApi for AccountService<R> {
    async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        AccountService::signup(self, request).await
    }

    async fn signin(&self, username: &str, password: &str) -> Result<User, DomainError> {
        AccountService::signin(self, username, password).await
    }

    async fn fetch(&self, token: &str) -> Result<User, DomainError> {
        AccountService::fetch(self, token).await
    }

    async fn update_profile(
        &self,
        token: &str,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        AccountService::update_profile(self, token, request).await
    }

    async fn signout(&self, token: &str) -> Result<(), DomainError> {
        AccountService::signout(self, token).await
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        AccountService::delete(self, token).await
    }
}
