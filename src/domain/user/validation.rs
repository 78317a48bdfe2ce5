//! Profile validation
//!
//! Field rules are applied independently and every violation is collected,
//! so a caller always receives the complete mapping of field names to
//! ordered failure messages rather than the first failure found.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const MIN_USERNAME_LENGTH: usize = 6;
const MAX_USERNAME_LENGTH: usize = 15;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Allowed username shape: downcase letters, digits, underscore, hyphen.
/// The stricter 6..=15 length bound is layered on top as its own rule.
static USERNAME_FORMAT: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-z0-9_-]{3,15}$").expect("valid username regex"));

pub const UNIQUENESS_MESSAGE: &str = "Username is already taken";

/// Violation mapping keyed by field name, each value an ordered list of
/// human-readable failure messages for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(BTreeMap<String, Vec<String>>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a field's violation list
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for a field, empty if the field is clean
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;

        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }

        Ok(())
    }
}

/// Candidate field set examined before persistence.
///
/// `password_confirmation` exists only here; it is never stored.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Validate a candidate profile, collecting every violation
pub fn validate_profile(draft: &ProfileDraft) -> Result<(), Violations> {
    let mut violations = Violations::new();

    check_username(&draft.username, &mut violations);
    check_presence("first_name", "First name", &draft.first_name, &mut violations);
    check_presence("last_name", "Last name", &draft.last_name, &mut violations);
    check_password_field("password", "Password", &draft.password, &mut violations);
    check_password_field(
        "password_confirmation",
        "Password confirmation",
        &draft.password_confirmation,
        &mut violations,
    );

    // Byte-exact match between the pair whenever either is supplied
    if draft.password != draft.password_confirmation {
        violations.add(
            "password",
            "Password and password confirmation doesn't match",
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_username(username: &str, violations: &mut Violations) {
    if username.is_empty() {
        violations.add("username", "Username must not be blank");
        return;
    }

    if !USERNAME_FORMAT.is_match(username) {
        violations.add(
            "username",
            "Username should include only downcase letters, numbers, underscore and hyphens",
        );
    }

    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        violations.add(
            "username",
            format!(
                "Username must be between {} and {} characters long",
                MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
            ),
        );
    }
}

fn check_presence(field: &str, label: &str, value: &str, violations: &mut Violations) {
    if value.is_empty() {
        violations.add(field, format!("{} must not be blank", label));
    }
}

fn check_password_field(field: &str, label: &str, value: &str, violations: &mut Violations) {
    if value.is_empty() {
        violations.add(field, format!("{} must not be blank", label));
        return;
    }

    if value.len() < MIN_PASSWORD_LENGTH {
        violations.add(
            field,
            format!(
                "{} must be at least {} characters long",
                label, MIN_PASSWORD_LENGTH
            ),
        );
    }
}
