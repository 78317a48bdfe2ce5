//! User entity and related types

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User identifier - a surrogate key assigned by the store on insert,
/// never mutated afterwards and never exposed through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Field set for a user that has not been persisted yet.
///
/// The store assigns the id and timestamps on insert. `token` is set here
/// only when the signup policy pre-assigns one at creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub token: Option<String>,
}

/// User entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Username used for signin
    username: String,
    /// Given name
    first_name: String,
    /// Family name
    last_name: String,
    /// Stored and compared as an opaque plaintext string - never serialized
    #[serde(skip_serializing)]
    password: String,
    /// Opaque session token; None means signed out
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from an insert payload and a store-assigned id
    pub fn new(id: UserId, fields: NewUser) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: fields.username,
            first_name: fields.first_name,
            last_name: fields.last_name,
            password: fields.password,
            token: fields.token,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a user from persisted state
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: UserId,
        username: String,
        first_name: String,
        last_name: String,
        password: String,
        token: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            first_name,
            last_name,
            password,
            token,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the user currently holds a session token
    pub fn is_signed_in(&self) -> bool {
        self.token.is_some()
    }

    // Mutators

    /// Update the given name
    pub fn set_first_name(&mut self, first_name: impl Into<String>) {
        self.first_name = first_name.into();
        self.touch();
    }

    /// Update the family name
    pub fn set_last_name(&mut self, last_name: impl Into<String>) {
        self.last_name = last_name.into();
        self.touch();
    }

    /// Update the stored password
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.touch();
    }

    /// Assign or clear the session token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(id: i64, username: &str) -> User {
        User::new(
            UserId::new(id),
            NewUser {
                username: username.to_string(),
                first_name: "Alice".to_string(),
                last_name: "Cooper".to_string(),
                password: "secret1".to_string(),
                token: None,
            },
        )
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user(1, "alice_c");

        assert_eq!(user.id().value(), 1);
        assert_eq!(user.username(), "alice_c");
        assert_eq!(user.first_name(), "Alice");
        assert_eq!(user.last_name(), "Cooper");
        assert_eq!(user.password(), "secret1");
        assert!(user.token().is_none());
        assert!(!user.is_signed_in());
    }

    #[test]
    fn test_user_id_display() {
        let id = UserId::new(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(UserId::from(42), id);
    }

    #[test]
    fn test_token_assignment() {
        let mut user = create_test_user(1, "alice_c");

        user.set_token(Some("abc-123".to_string()));
        assert_eq!(user.token(), Some("abc-123"));
        assert!(user.is_signed_in());

        user.set_token(None);
        assert!(user.token().is_none());
        assert!(!user.is_signed_in());
    }

    #[test]
    fn test_mutators_touch_updated_at() {
        let mut user = create_test_user(1, "alice_c");
        let original_updated = user.updated_at();

        // Small delay to ensure timestamp differs
        std::thread::sleep(std::time::Duration::from_millis(10));

        user.set_first_name("Alicia");
        assert_eq!(user.first_name(), "Alicia");
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user(1, "alice_c");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret1"));
        assert!(!json.contains("password"));
    }
}
