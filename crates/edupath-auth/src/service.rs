//! Admin authentication service — login, request authentication, and
//! logout.

use chrono::{Duration, Utc};
use edupath_core::error::EdupathResult;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::store::{SessionRecord, SessionStore};
use crate::token;

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Raw opaque session token (return to client, not stored).
    pub session_token: String,
    /// Session lifetime in seconds.
    pub expires_in: u64,
}

/// The authenticated admin, as proven by a live session token.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub email: String,
}

/// Admin authentication service.
///
/// Generic over the session store so the auth layer carries no
/// storage dependency of its own.
pub struct AdminAuthService<S: SessionStore> {
    store: S,
    config: AuthConfig,
}

impl<S: SessionStore> AdminAuthService<S> {
    pub fn new(store: S, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Authenticate the admin with email + password and mint a
    /// session token.
    ///
    /// Email mismatch and password mismatch are indistinguishable to
    /// the caller.
    pub async fn login(&self, email: &str, password: &str) -> EdupathResult<LoginOutput> {
        if !email.eq_ignore_ascii_case(&self.config.admin_email) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let valid = password::verify_password(
            password,
            &self.config.admin_password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let raw_token = token::generate_session_token();
        let token_hash = token::hash_session_token(&raw_token);
        let now = Utc::now();

        self.store
            .insert(
                token_hash,
                SessionRecord {
                    email: self.config.admin_email.clone(),
                    created_at: now,
                    expires_at: now + Duration::seconds(self.config.session_lifetime_secs as i64),
                },
            )
            .await?;

        Ok(LoginOutput {
            session_token: raw_token,
            expires_in: self.config.session_lifetime_secs,
        })
    }

    /// Resolve a bearer token to the admin identity.
    ///
    /// Expired sessions are removed from the store on first sight.
    pub async fn authenticate(&self, raw_token: &str) -> EdupathResult<AdminIdentity> {
        let token_hash = token::hash_session_token(raw_token);

        let record = self
            .store
            .get(&token_hash)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if record.expires_at <= Utc::now() {
            self.store.remove(&token_hash).await?;
            return Err(AuthError::SessionExpired.into());
        }

        Ok(AdminIdentity {
            email: record.email,
        })
    }

    /// Invalidate a session. Unknown tokens are accepted silently so
    /// logout is idempotent.
    pub async fn logout(&self, raw_token: &str) -> EdupathResult<()> {
        let token_hash = token::hash_session_token(raw_token);
        self.store.remove(&token_hash).await?;
        Ok(())
    }

    /// Drop every expired session and return how many were removed.
    ///
    /// `authenticate` evicts an expired session only when its token is
    /// presented again; abandoned sessions need this sweep.
    pub async fn purge_expired(&self) -> EdupathResult<usize> {
        Ok(self.store.purge_expired(Utc::now()).await?)
    }
}
