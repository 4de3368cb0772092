//! `quill-storage` — SQLite persistence for users, posts, and sessions.
//!
//! Storage is the sole owner of durable state. Stores hold a cloned
//! connection pool and speak plain SQL through sqlx; ownership-checked
//! mutations run their check and write inside one transaction.

pub mod db;
pub mod error;
pub mod posts;
pub mod sessions;
pub mod users;

pub use db::{connect, connect_in_memory, init_schema};
pub use error::{StorageError, StorageResult};
pub use posts::{OwnedMutation, PostStore};
pub use sessions::SessionStore;
pub use users::{UserRecord, UserStore};
