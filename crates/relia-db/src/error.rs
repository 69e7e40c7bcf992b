//! Database-specific error types and conversions.

use relia_core::error::ReliaError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for ReliaError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ReliaError::NotFound { entity, id },
            other => ReliaError::Database(other.to_string()),
        }
    }
}
