//! Error types for the EduPath system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EdupathError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid reference: {message}")]
    InvalidReference { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EdupathResult<T> = Result<T, EdupathError>;
