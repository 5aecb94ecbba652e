//! Comparison workflow error types.

use edupath_core::error::EdupathError;
use thiserror::Error;

/// A single field-level validation failure, surfaced next to the
/// offending form field.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum CompareError {
    /// The compare parameters are unusable: no course name, or fewer
    /// than 2 distinct institute slugs. Terminal — the only way out
    /// is navigating away.
    #[error("invalid comparison: select a course and at least 2 institutes")]
    InvalidSelection,

    /// Client-side validation failed before any backend call.
    #[error("registration validation failed")]
    Validation(Vec<FieldError>),

    /// The data facade rejected a call. The gate stays locked; the
    /// caller may retry by resubmitting.
    #[error(transparent)]
    Repository(#[from] EdupathError),
}

impl CompareError {
    /// Field errors for a `Validation` failure, empty otherwise.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CompareError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
