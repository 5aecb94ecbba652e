//! Admin lead management: list, status pipeline, delete.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use edupath_core::models::enquiry::{Enquiry, EnquiryStatus};
use edupath_core::repository::EnquiryRepository;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::error::ServerError;
use crate::routes::{ListQuery, Page};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/enquiries", get(list_enquiries))
        .route("/enquiries/{id}/status", put(update_status))
        .route("/enquiries/{id}", delete(delete_enquiry))
}

async fn list_enquiries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Enquiry>>, ServerError> {
    let page = state.enquiries.list(query.pagination()).await?;
    Ok(Json(page.into()))
}

#[derive(Debug, Deserialize)]
struct StatusRequest {
    status: EnquiryStatus,
}

async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Enquiry>, ServerError> {
    let updated = state.enquiries.update_status(id, request.status).await?;
    info!(%id, status = %updated.status, "enquiry status updated");
    Ok(Json(updated))
}

async fn delete_enquiry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ServerError> {
    state.enquiries.get_by_id(id).await?;
    state.enquiries.delete(id).await?;
    info!(%id, "enquiry deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
