//! Admin bearer-token middleware.
//!
//! Wraps every `/admin` route except login/logout. The HTTP analog of
//! "redirect to login" is a plain 401.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::state::AppState;

/// Extract the `Authorization: Bearer <token>` value, if present.
pub fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&req) else {
        return unauthorized();
    };

    match state.auth.authenticate(token).await {
        Ok(_identity) => next.run(req).await,
        Err(e) => {
            debug!(error = %e, "admin request rejected");
            unauthorized()
        }
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(serde_json::json!({ "error": "unauthorized", "code": "unauthorized" })),
    )
        .into_response()
}
