//! Service operations over the stores.
//!
//! Every operation takes its actor explicitly; nothing reads identity from
//! ambient state. Mutations follow a fixed check order: existence, then
//! ownership, then validation, then the write (the write re-checks
//! ownership inside its transaction).

use chrono::Utc;
use sqlx::sqlite::SqlitePool;
use thiserror::Error;

use quill_auth::{credentials, hash_password, verify_password, HashError, Principal, Registration, SessionToken};
use quill_core::{DomainError, PostId, UserId};
use quill_posts::{Post, PostDraft};
use quill_storage::{OwnedMutation, PostStore, SessionStore, StorageError, UserStore};

/// Failure of a service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Hash(#[from] HashError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// The application's services: auth + posts over shared storage.
pub struct AppServices {
    users: UserStore,
    posts: PostStore,
    sessions: SessionStore,
}

impl AppServices {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            users: UserStore::new(pool.clone()),
            posts: PostStore::new(pool.clone()),
            sessions: SessionStore::new(pool),
        }
    }

    // ── auth ────────────────────────────────────────────────────────────

    /// Register a new user. The password is stored as a salted argon2
    /// hash.
    pub async fn register(&self, username: &str, password: &str) -> ServiceResult<UserId> {
        let registration = Registration::parse(username, password)?;
        let password_hash = hash_password(&registration.password)?;

        match self.users.create(&registration.username, &password_hash).await {
            Ok(id) => {
                tracing::info!(username = %registration.username, "user registered");
                Ok(id)
            }
            Err(StorageError::Duplicate) => {
                Err(credentials::already_registered(&registration.username).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Verify credentials and establish a session.
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<(Principal, SessionToken)> {
        let username = username.trim();
        let Some(user) = self.users.by_username(username).await? else {
            return Err(credentials::incorrect_username().into());
        };
        if !verify_password(&user.password_hash, password) {
            return Err(credentials::incorrect_password().into());
        }

        let token = SessionToken::generate();
        self.sessions.create(token, user.id, Utc::now()).await?;
        tracing::info!(username = %user.username, "user logged in");
        Ok((Principal::new(user.id, user.username), token))
    }

    /// End a session. Unknown tokens are ignored, so calling this twice is
    /// harmless.
    pub async fn logout(&self, token: SessionToken) -> ServiceResult<()> {
        self.sessions.delete(token).await?;
        Ok(())
    }

    /// Resolve a session token to its user, or `None` for a stale token.
    pub async fn current_user(&self, token: SessionToken) -> ServiceResult<Option<Principal>> {
        Ok(self.sessions.resolve(token).await?)
    }

    // ── posts ───────────────────────────────────────────────────────────

    /// All posts, newest first.
    pub async fn list_posts(&self) -> ServiceResult<Vec<Post>> {
        Ok(self.posts.list().await?)
    }

    pub async fn get_post(&self, id: PostId) -> ServiceResult<Post> {
        self.posts
            .get(id)
            .await?
            .ok_or(DomainError::NotFound.into())
    }

    /// Fetch a post for its edit form: the actor must own it.
    pub async fn post_for_edit(&self, id: PostId, actor: &Principal) -> ServiceResult<Post> {
        let post = self.get_post(id).await?;
        post.ensure_owner(actor)?;
        Ok(post)
    }

    /// Create a post owned by `actor`, stamped with the current time.
    pub async fn create_post(&self, actor: &Principal, title: &str, body: &str) -> ServiceResult<PostId> {
        let draft = PostDraft::parse(title, body)?;
        let id = self.posts.insert(actor.user_id, &draft, Utc::now()).await?;
        tracing::info!(post_id = %id, author = %actor.username, "post created");
        Ok(id)
    }

    /// Overwrite a post's title/body in place.
    pub async fn update_post(
        &self,
        id: PostId,
        actor: &Principal,
        title: &str,
        body: &str,
    ) -> ServiceResult<()> {
        let post = self.get_post(id).await?;
        post.ensure_owner(actor)?;
        let draft = PostDraft::parse(title, body)?;

        match self.posts.update_owned(id, actor.user_id, &draft).await? {
            OwnedMutation::Applied => Ok(()),
            OwnedMutation::Missing => Err(DomainError::NotFound.into()),
            OwnedMutation::NotOwner => Err(DomainError::Forbidden.into()),
        }
    }

    /// Delete a post.
    pub async fn delete_post(&self, id: PostId, actor: &Principal) -> ServiceResult<()> {
        let post = self.get_post(id).await?;
        post.ensure_owner(actor)?;

        match self.posts.delete_owned(id, actor.user_id).await? {
            OwnedMutation::Applied => {
                tracing::info!(post_id = %id, author = %actor.username, "post deleted");
                Ok(())
            }
            OwnedMutation::Missing => Err(DomainError::NotFound.into()),
            OwnedMutation::NotOwner => Err(DomainError::Forbidden.into()),
        }
    }

    /// Number of stored posts.
    pub async fn post_count(&self) -> ServiceResult<i64> {
        Ok(self.posts.count().await?)
    }
}
