//! Post rows.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

use quill_core::{PostId, UserId};
use quill_posts::{Post, PostDraft};

use crate::error::StorageResult;

const SELECT_POST: &str = "SELECT p.id, p.author_id, u.username, p.title, p.body, p.created \
     FROM post p JOIN user u ON u.id = p.author_id";

/// Outcome of an ownership-checked mutation, decided inside one
/// transaction so the row cannot change between check and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedMutation {
    Applied,
    Missing,
    NotOwner,
}

/// Store for the `post` table.
#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> StorageResult<Vec<Post>> {
        let rows = sqlx::query(&format!("{SELECT_POST} ORDER BY p.created DESC, p.id DESC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(post_from_row).collect()
    }

    pub async fn get(&self, id: PostId) -> StorageResult<Option<Post>> {
        let row = sqlx::query(&format!("{SELECT_POST} WHERE p.id = ?"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(post_from_row).transpose()
    }

    pub async fn insert(
        &self,
        author_id: UserId,
        draft: &PostDraft,
        created: DateTime<Utc>,
    ) -> StorageResult<PostId> {
        let result = sqlx::query("INSERT INTO post (author_id, title, body, created) VALUES (?, ?, ?, ?)")
            .bind(author_id.as_i64())
            .bind(&draft.title)
            .bind(&draft.body)
            .bind(created)
            .execute(&self.pool)
            .await?;

        Ok(PostId::new(result.last_insert_rowid()))
    }

    /// Overwrite title/body if and only if `actor_id` owns the post.
    /// `created` is never touched.
    pub async fn update_owned(
        &self,
        id: PostId,
        actor_id: UserId,
        draft: &PostDraft,
    ) -> StorageResult<OwnedMutation> {
        let mut tx = self.pool.begin().await?;

        let Some(owner) = author_of(&mut tx, id).await? else {
            return Ok(OwnedMutation::Missing);
        };
        if owner != actor_id {
            return Ok(OwnedMutation::NotOwner);
        }

        sqlx::query("UPDATE post SET title = ?, body = ? WHERE id = ?")
            .bind(&draft.title)
            .bind(&draft.body)
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(OwnedMutation::Applied)
    }

    /// Remove the post if and only if `actor_id` owns it.
    pub async fn delete_owned(&self, id: PostId, actor_id: UserId) -> StorageResult<OwnedMutation> {
        let mut tx = self.pool.begin().await?;

        let Some(owner) = author_of(&mut tx, id).await? else {
            return Ok(OwnedMutation::Missing);
        };
        if owner != actor_id {
            return Ok(OwnedMutation::NotOwner);
        }

        sqlx::query("DELETE FROM post WHERE id = ?")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(OwnedMutation::Applied)
    }

    pub async fn count(&self) -> StorageResult<i64> {
        let row = sqlx::query("SELECT COUNT(id) AS n FROM post")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

async fn author_of(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    id: PostId,
) -> StorageResult<Option<UserId>> {
    let row = sqlx::query("SELECT author_id FROM post WHERE id = ?")
        .bind(id.as_i64())
        .fetch_optional(&mut **tx)
        .await?;

    Ok(match row {
        Some(row) => Some(UserId::new(row.try_get("author_id")?)),
        None => None,
    })
}

fn post_from_row(row: &sqlx::sqlite::SqliteRow) -> StorageResult<Post> {
    Ok(Post {
        id: PostId::new(row.try_get("id")?),
        author_id: UserId::new(row.try_get("author_id")?),
        author: row.try_get("username")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
        created: row.try_get("created")?,
    })
}
