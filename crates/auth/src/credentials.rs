//! Credential input validation.
//!
//! The messages here are user-facing; the HTTP layer renders them into
//! the registration and login forms verbatim.

use quill_core::{DomainError, DomainResult};

/// Validated registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub password: String,
}

impl Registration {
    /// Validate raw form input for registration.
    ///
    /// Usernames are trimmed; passwords are taken as-is (leading or
    /// trailing whitespace is significant).
    pub fn parse(username: &str, password: &str) -> DomainResult<Self> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation("Username is required."));
        }
        if password.is_empty() {
            return Err(DomainError::validation("Password is required."));
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Message shown when a username is already taken.
pub fn already_registered(username: &str) -> DomainError {
    DomainError::validation(format!("User {username} is already registered."))
}

/// Message shown when no such user exists at login.
pub fn incorrect_username() -> DomainError {
    DomainError::auth("Incorrect username.")
}

/// Message shown when the password does not match at login.
pub fn incorrect_password() -> DomainError {
    DomainError::auth("Incorrect password.")
}
