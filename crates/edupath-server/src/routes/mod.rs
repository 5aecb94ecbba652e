//! Axum router construction.
//!
//! [`build`] assembles the complete application router:
//! - CORS layer (wildcard or `EDUPATH_CORS_ORIGINS` allowlist)
//! - Health route
//! - Public catalog, compare, and enquiry routes
//! - `/admin` routes behind the session middleware

mod admin;
mod compare;
mod courses;
mod enquiries;
mod health;
mod institutes;

use std::sync::Arc;

use axum::Router;
use edupath_core::repository::{PaginatedResult, Pagination};
use serde::{Deserialize, Serialize};

use crate::middleware::cors;
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(institutes::router())
        .merge(courses::router())
        .merge(compare::router())
        .merge(enquiries::router())
        .nest("/admin", admin::router(state.clone()))
        .layer(cors::cors_layer(state.clone()))
        .with_state(state)
}

/// Query parameters shared by all paginated list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn pagination(&self) -> Pagination {
        let defaults = Pagination::default();
        Pagination {
            offset: self.offset.unwrap_or(defaults.offset),
            limit: self.limit.unwrap_or(defaults.limit).min(200),
        }
    }
}

/// Wire shape of a paginated result.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> From<PaginatedResult<T>> for Page<T> {
    fn from(r: PaginatedResult<T>) -> Self {
        Self {
            items: r.items,
            total: r.total,
            offset: r.offset,
            limit: r.limit,
        }
    }
}
