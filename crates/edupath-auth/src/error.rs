//! Authentication error types.

use edupath_core::error::EdupathError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session has expired")]
    SessionExpired,

    #[error("invalid session token")]
    SessionInvalid,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for EdupathError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::SessionExpired
            | AuthError::SessionInvalid => EdupathError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => EdupathError::Internal(msg),
        }
    }
}
