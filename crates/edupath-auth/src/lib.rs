//! EduPath Auth — admin password verification and opaque session
//! tokens.
//!
//! There is exactly one admin principal, configured out of band. A
//! successful login mints a random bearer token; only its SHA-256
//! hash is kept server-side, so a store dump never leaks usable
//! tokens.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AdminAuthService, AdminIdentity, LoginOutput};
pub use store::{InMemorySessionStore, SessionRecord, SessionStore};
