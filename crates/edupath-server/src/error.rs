//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically
//! converted to a JSON-body HTTP response with an appropriate status
//! code and machine-readable `code`.
//!
//! **Security note:** internal errors are logged with full detail but
//! only a generic message is returned to the caller so that queries or
//! other implementation details never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edupath_compare::CompareError;
use edupath_core::error::EdupathError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the edupath-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the repository/auth layers.
    #[error(transparent)]
    Core(#[from] EdupathError),

    /// Propagated from the comparison workflow.
    #[error(transparent)]
    Compare(#[from] CompareError),

    /// The caller sent an invalid or malformed request.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Core(e) => core_response(e),
            ServerError::Compare(e) => compare_response(e),
            ServerError::BadRequest(m) => body(StatusCode::BAD_REQUEST, "bad_request", &m),
        }
    }
}

fn core_response(err: EdupathError) -> Response {
    match &err {
        EdupathError::NotFound { entity, .. } => body(
            StatusCode::NOT_FOUND,
            "not_found",
            &format!("{entity} not found"),
        ),
        EdupathError::AlreadyExists { entity } => body(
            StatusCode::CONFLICT,
            "conflict",
            &format!("{entity} already exists"),
        ),
        EdupathError::Conflict { message } => body(StatusCode::CONFLICT, "conflict", message),
        EdupathError::AuthenticationFailed { .. } => {
            body(StatusCode::UNAUTHORIZED, "unauthorized", "unauthorized")
        }
        EdupathError::Validation { message } => {
            body(StatusCode::UNPROCESSABLE_ENTITY, "validation", message)
        }
        EdupathError::InvalidReference { message } => {
            body(StatusCode::UNPROCESSABLE_ENTITY, "invalid_reference", message)
        }
        EdupathError::Database(detail) | EdupathError::Internal(detail) => {
            error!(error = %detail, "internal server error");
            body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
                "internal server error",
            )
        }
    }
}

fn compare_response(err: CompareError) -> Response {
    match err {
        // Distinct from not_found: the parameters themselves are
        // unusable, there is nothing to look up.
        CompareError::InvalidSelection => body(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_comparison",
            &err.to_string(),
        ),
        CompareError::Validation(ref fields) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "error": err.to_string(),
                "code": "validation",
                "fields": fields,
            })),
        )
            .into_response(),
        CompareError::Repository(inner) => core_response(inner),
    }
}

fn body(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "error": message, "code": code }))).into_response()
}
