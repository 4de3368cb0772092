//! User rows.

use sqlx::sqlite::SqlitePool;
use sqlx::Row;

use quill_core::UserId;

use crate::error::{StorageError, StorageResult};

/// A user row as persisted. The hash never leaves the storage/auth
/// boundary; HTTP-facing code works with [`quill_auth::Principal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// Store for the `user` table.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. A taken username surfaces as
    /// [`StorageError::Duplicate`].
    pub async fn create(&self, username: &str, password_hash: &str) -> StorageResult<UserId> {
        let result = sqlx::query("INSERT INTO user (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;

        Ok(UserId::new(result.last_insert_rowid()))
    }

    pub async fn by_username(&self, username: &str) -> StorageResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT id, username, password_hash FROM user WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| record_from_row(&r)).transpose()
    }

    pub async fn by_id(&self, id: UserId) -> StorageResult<Option<UserRecord>> {
        let row = sqlx::query("SELECT id, username, password_hash FROM user WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| record_from_row(&r)).transpose()
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> StorageResult<UserRecord> {
    Ok(UserRecord {
        id: UserId::new(row.try_get("id")?),
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
    })
}
