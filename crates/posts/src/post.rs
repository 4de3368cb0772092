//! The post entity and its ownership rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quill_auth::Principal;
use quill_core::{DomainError, DomainResult, PostId, UserId};

/// A published post, as read from storage.
///
/// # Invariants
/// - `author_id` referred to an existing user when the post was created.
/// - `created` is set once at creation and never changes.
/// - Only the user matching `author_id` may update or delete the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    /// Author's username, joined in on every read.
    pub author: String,
    pub title: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

impl Post {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Enforce the ownership rule for a mutation.
    pub fn ensure_owner(&self, actor: &Principal) -> DomainResult<()> {
        if !self.is_owned_by(actor.user_id) {
            return Err(DomainError::Forbidden);
        }
        Ok(())
    }
}
