//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use edupath_auth::{AdminAuthService, InMemorySessionStore};
use edupath_db::DbManager;
use edupath_db::repository::{
    SurrealCourseRepository, SurrealEnquiryRepository, SurrealInstituteRepository,
    SurrealRegistrationRepository,
};
use surrealdb::engine::remote::ws::Client;

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Connection handle, kept for the health endpoint's liveness check.
    pub db: DbManager,
    pub institutes: SurrealInstituteRepository<Client>,
    pub courses: SurrealCourseRepository<Client>,
    pub enquiries: SurrealEnquiryRepository<Client>,
    pub registrations: SurrealRegistrationRepository<Client>,
    /// Admin login + session validation.
    pub auth: Arc<AdminAuthService<InMemorySessionStore>>,
}

impl AppState {
    pub fn new(config: Config, db: DbManager) -> Self {
        let auth = AdminAuthService::new(InMemorySessionStore::new(), config.auth_config());
        let client = db.client().clone();
        Self {
            config: Arc::new(config),
            db,
            institutes: SurrealInstituteRepository::new(client.clone()),
            courses: SurrealCourseRepository::new(client.clone()),
            enquiries: SurrealEnquiryRepository::new(client.clone()),
            registrations: SurrealRegistrationRepository::new(client),
            auth: Arc::new(auth),
        }
    }
}
