//! CORS layer — wildcard in development, allowlist when
//! `EDUPATH_CORS_ORIGINS` is set.

use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn cors_layer(state: Arc<AppState>) -> CorsLayer {
    if let Some(origins_str) = &state.config.cors_allowed_origins {
        let origins: Vec<axum::http::HeaderValue> = origins_str
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        if !origins.is_empty() {
            return CorsLayer::new()
                .allow_origin(origins)
                .allow_headers(Any)
                .allow_methods(Any);
        }
    }

    // Wildcard — suitable for development; set EDUPATH_CORS_ORIGINS in
    // production.
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
}
