//! The authenticated identity attached to a request.

use serde::{Deserialize, Serialize};

use quill_core::UserId;

/// Identity of an authenticated user.
///
/// This is an authorization boundary object: it is resolved once per
/// request from the session and passed **explicitly** into every service
/// call that needs an actor. Nothing in the system reads identity from
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: UserId,
    pub username: String,
}

impl Principal {
    pub fn new(user_id: UserId, username: impl Into<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
        }
    }
}
