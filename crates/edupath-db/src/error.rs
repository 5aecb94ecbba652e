//! Database-specific error types and conversions.

use edupath_core::error::EdupathError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Duplicate record: {entity}")]
    Duplicate { entity: String },

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed row: {0}")]
    MalformedRow(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl DbError {
    /// Classify a statement error surfaced by `check()` after a
    /// mutation. Unique-index violations become `Duplicate`.
    pub(crate) fn from_mutation(entity: &str, err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if msg.contains("already contains") {
            DbError::Duplicate {
                entity: entity.into(),
            }
        } else {
            DbError::Query(msg)
        }
    }
}

impl From<DbError> for EdupathError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => EdupathError::NotFound { entity, id },
            DbError::Duplicate { entity } => EdupathError::AlreadyExists { entity },
            DbError::InvalidReference(msg) => EdupathError::InvalidReference { message: msg },
            other => EdupathError::Database(other.to_string()),
        }
    }
}
