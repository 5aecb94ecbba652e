//! Routes nested under `/admin`.
//!
//! Login and logout are open; everything else sits behind the session
//! middleware.

mod catalog;
mod enquiries;
mod session;
mod summary;

use std::sync::Arc;

use axum::Router;
use axum::middleware;

use crate::middleware::auth;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let protected = Router::new()
        .merge(catalog::router())
        .merge(enquiries::router())
        .merge(summary::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new().merge(session::router()).merge(protected)
}
