//! User domain
//!
//! This module provides the domain types for the account service: the user
//! entity, the profile validation rules, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_profile, ProfileDraft, Violations, UNIQUENESS_MESSAGE};
