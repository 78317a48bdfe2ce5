use thiserror::Error;

use crate::domain::user::Violations;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation failed: {violations}")]
    Validation { violations: Violations },

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(violations: Violations) -> Self {
        Self::Validation { violations }
    }

    pub fn credential(message: impl Into<String>) -> Self {
        Self::Credential {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("User not found");
        assert_eq!(error.to_string(), "Not found: User not found");
    }

    #[test]
    fn test_conflict_error() {
        let error = DomainError::conflict("Username 'bob_jones' already exists");
        assert_eq!(
            error.to_string(),
            "Conflict: Username 'bob_jones' already exists"
        );
    }

    #[test]
    fn test_validation_error_carries_violations() {
        let mut violations = Violations::new();
        violations.add("username", "Username must not be blank");

        let error = DomainError::validation(violations);
        match error {
            DomainError::Validation { violations } => {
                assert_eq!(
                    violations.messages("username"),
                    ["Username must not be blank"]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
