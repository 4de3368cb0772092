use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence-level error.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique constraint was violated (e.g. username already taken).
    #[error("unique constraint violated")]
    Duplicate,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Fold a sqlx error, surfacing unique-constraint violations as
    /// [`StorageError::Duplicate`].
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return Self::Duplicate;
            }
        }
        Self::Database(err)
    }
}
