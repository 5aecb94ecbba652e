//! Server configuration, loaded from environment variables at startup.

use edupath_auth::AuthConfig;
use edupath_db::DbConfig;

/// Runtime configuration for edupath-server.
///
/// Every field except the admin credential has a sensible default so a
/// development server starts without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:3000"`).
    pub bind_address: String,

    /// SurrealDB WebSocket address (default: `"127.0.0.1:8000"`).
    pub database_url: String,

    /// SurrealDB namespace (default: `"edupath"`).
    pub database_namespace: String,

    /// SurrealDB database name (default: `"catalog"`).
    pub database_name: String,

    /// SurrealDB root username (default: `"root"`).
    pub database_user: String,

    /// SurrealDB root password (default: `"root"`).
    pub database_password: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated CORS origin allowlist. `None` means wildcard
    /// (development).
    pub cors_allowed_origins: Option<String>,

    /// Admin login email.
    pub admin_email: String,

    /// Argon2id PHC hash of the admin password. The admin API rejects
    /// every login while this is empty.
    pub admin_password_hash: String,

    /// Optional pepper matching the one used when hashing the admin
    /// password.
    pub auth_pepper: Option<String>,

    /// Admin session lifetime in seconds (default: 86_400).
    pub session_lifetime_secs: u64,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("EDUPATH_BIND", "0.0.0.0:3000"),
            database_url: env_or("EDUPATH_DB_URL", "127.0.0.1:8000"),
            database_namespace: env_or("EDUPATH_DB_NAMESPACE", "edupath"),
            database_name: env_or("EDUPATH_DB_NAME", "catalog"),
            database_user: env_or("EDUPATH_DB_USER", "root"),
            database_password: env_or("EDUPATH_DB_PASSWORD", "root"),
            log_level: env_or("EDUPATH_LOG", "info"),
            log_json: std::env::var("EDUPATH_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cors_allowed_origins: std::env::var("EDUPATH_CORS_ORIGINS").ok(),
            admin_email: env_or("EDUPATH_ADMIN_EMAIL", "admin@edupath.local"),
            admin_password_hash: env_or("EDUPATH_ADMIN_PASSWORD_HASH", ""),
            auth_pepper: std::env::var("EDUPATH_AUTH_PEPPER").ok(),
            session_lifetime_secs: parse_env("EDUPATH_SESSION_LIFETIME_SECS", 86_400),
        }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.database_url.clone(),
            namespace: self.database_namespace.clone(),
            database: self.database_name.clone(),
            username: self.database_user.clone(),
            password: self.database_password.clone(),
        }
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            admin_email: self.admin_email.clone(),
            admin_password_hash: self.admin_password_hash.clone(),
            pepper: self.auth_pepper.clone(),
            session_lifetime_secs: self.session_lifetime_secs,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
