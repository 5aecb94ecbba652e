//! Health / heartbeat endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(get_health))
}

/// Reports service and database liveness. Returns 200 while the
/// database answers, 503 once it stops. Load-balancers and monitoring
/// systems should poll this endpoint.
pub async fn get_health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let db_up = state.db.ping().await.is_ok();
    let status = if db_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health_body(db_up)))
}

fn health_body(db_up: bool) -> Value {
    json!({
        "status": if db_up { "ok" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": if db_up { "up" } else { "down" },
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn healthy_body_reports_ok_and_version() {
        let body = health_body(true);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "up");
        assert!(!body["version"].as_str().unwrap_or("").is_empty());
    }

    #[test]
    fn unreachable_database_reports_degraded() {
        let body = health_body(false);
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], "down");
    }
}
