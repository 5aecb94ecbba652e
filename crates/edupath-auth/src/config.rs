//! Authentication configuration.

/// Configuration for the admin authentication service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The single admin login email. Compared case-insensitively.
    pub admin_email: String,
    /// Argon2id PHC-format hash of the admin password.
    pub admin_password_hash: String,
    /// Optional pepper prepended to the password before Argon2id
    /// verification. Must match the pepper used during hashing.
    pub pepper: Option<String>,
    /// Session lifetime in seconds (default: 86_400 = 24 hours).
    pub session_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_email: String::new(),
            admin_password_hash: String::new(),
            pepper: None,
            session_lifetime_secs: 86_400,
        }
    }
}
