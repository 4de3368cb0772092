//! Server-side session rows.
//!
//! The browser holds only the opaque token; this table maps it back to a
//! user. Sessions do not expire server-side; logout deletes the row.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

use quill_auth::{Principal, SessionToken};
use quill_core::UserId;

use crate::error::StorageResult;

/// Store for the `session` table.
#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        token: SessionToken,
        user_id: UserId,
        created: DateTime<Utc>,
    ) -> StorageResult<()> {
        sqlx::query("INSERT INTO session (token, user_id, created) VALUES (?, ?, ?)")
            .bind(token.to_string())
            .bind(user_id.as_i64())
            .bind(created)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Resolve a token to the logged-in user, joining in the username.
    pub async fn resolve(&self, token: SessionToken) -> StorageResult<Option<Principal>> {
        let row = sqlx::query(
            "SELECT s.user_id, u.username FROM session s \
             JOIN user u ON u.id = s.user_id WHERE s.token = ?",
        )
        .bind(token.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(Principal::new(
                UserId::new(row.try_get("user_id")?),
                row.try_get::<String, _>("username")?,
            ))),
            None => Ok(None),
        }
    }

    /// Delete a session. Deleting an unknown token is a no-op, which makes
    /// logout idempotent.
    pub async fn delete(&self, token: SessionToken) -> StorageResult<()> {
        sqlx::query("DELETE FROM session WHERE token = ?")
            .bind(token.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
