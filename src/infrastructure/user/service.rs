//! Account lifecycle service
//!
//! Orchestrates signup, signin, profile fetch/update, signout and delete
//! over a [`UserRepository`], applying the validation rules and the token
//! lifecycle. A user is signed in exactly while it holds a token.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::user::{
    validate_profile, NewUser, ProfileDraft, User, UserRepository, Violations, UNIQUENESS_MESSAGE,
};
use crate::domain::DomainError;

/// Whether a session token is pre-assigned at signup or only issued by an
/// explicit signin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenPolicy {
    /// Token stays unset until the user signs in
    #[default]
    RequireSignin,
    /// A fresh token is assigned as part of signup
    IssueAtSignup,
}

/// Input for creating a new account
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Partial update merged over an existing profile; unset fields are left
/// unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

/// Account service over a user repository
#[derive(Debug)]
pub struct AccountService<R: UserRepository> {
    repository: Arc<R>,
    token_policy: TokenPolicy,
}

impl<R: UserRepository> AccountService<R> {
    /// Create a new account service
    pub fn new(repository: Arc<R>, token_policy: TokenPolicy) -> Self {
        Self {
            repository,
            token_policy,
        }
    }

    /// Create a new account.
    ///
    /// Uniqueness is enforced by the store in the same step as the insert;
    /// a conflict comes back as a username violation in the mapping.
    pub async fn signup(&self, request: SignupRequest) -> Result<User, DomainError> {
        let draft = ProfileDraft {
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
            password_confirmation: request.password_confirmation,
        };

        validate_profile(&draft).map_err(DomainError::validation)?;

        let token = match self.token_policy {
            TokenPolicy::RequireSignin => None,
            TokenPolicy::IssueAtSignup => Some(generate_token()),
        };

        let result = self
            .repository
            .insert(NewUser {
                username: draft.username,
                first_name: draft.first_name,
                last_name: draft.last_name,
                password: draft.password,
                token,
            })
            .await;

        match result {
            Err(DomainError::Conflict { .. }) => {
                let mut violations = Violations::new();
                violations.add("username", UNIQUENESS_MESSAGE);
                Err(DomainError::validation(violations))
            }
            other => other,
        }
    }

    /// Authenticate and issue a fresh session token.
    ///
    /// The lookup matches username and stored plaintext password exactly;
    /// the failure reason never says which of the two was wrong.
    pub async fn signin(&self, username: &str, password: &str) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .find_by_credentials(username, password)
            .await?
            .ok_or_else(|| DomainError::credential("Invalid credentials"))?;

        user.set_token(Some(generate_token()));

        self.repository.update(&user).await
    }

    /// Fetch the profile behind a session token
    pub async fn fetch(&self, token: &str) -> Result<User, DomainError> {
        self.repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| DomainError::not_found("Not found"))
    }

    /// Merge the supplied fields into the profile behind a token and
    /// re-validate the result before persisting.
    pub async fn update_profile(
        &self,
        token: &str,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let mut user = self.fetch(token).await?;

        // The stored password stands unless either half of the pair is
        // supplied; then both are validated as given, a missing partner
        // counting as blank.
        let (password, password_confirmation) =
            if request.password.is_none() && request.password_confirmation.is_none() {
                (user.password().to_string(), user.password().to_string())
            } else {
                (
                    request.password.unwrap_or_default(),
                    request.password_confirmation.unwrap_or_default(),
                )
            };

        let draft = ProfileDraft {
            username: user.username().to_string(),
            first_name: request
                .first_name
                .unwrap_or_else(|| user.first_name().to_string()),
            last_name: request
                .last_name
                .unwrap_or_else(|| user.last_name().to_string()),
            password,
            password_confirmation,
        };

        validate_profile(&draft).map_err(DomainError::validation)?;

        user.set_first_name(draft.first_name);
        user.set_last_name(draft.last_name);
        user.set_password(draft.password);

        self.repository.update(&user).await
    }

    /// Clear the session token behind a token.
    ///
    /// A token that no longer resolves is reported as not found, so a
    /// repeated signout fails even though its effect would be idempotent.
    pub async fn signout(&self, token: &str) -> Result<(), DomainError> {
        let mut user = self.fetch(token).await?;

        user.set_token(None);
        self.repository.update(&user).await?;

        Ok(())
    }

    /// Permanently delete the account behind a session token
    pub async fn delete(&self, token: &str) -> Result<(), DomainError> {
        let user = self.fetch(token).await?;

        self.repository.delete(user.id()).await?;

        Ok(())
    }
}

fn generate_token() -> String {
    Uuid::new_v4().to_string()
}
