//! Admin catalog management: institute and course CRUD.
//!
//! Admin mutations address records by ID; slugs stay a public-surface
//! concern.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, post, put};
use axum::{Json, Router};
use edupath_core::models::course::{Course, CreateCourse, UpdateCourse};
use edupath_core::models::institute::{CreateInstitute, Institute, UpdateInstitute};
use edupath_core::repository::{CourseRepository, InstituteRepository};
use serde_json::{Value, json};
use tracing::info;
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/institutes", post(create_institute))
        .route("/institutes/{id}", put(update_institute))
        .route("/institutes/{id}", delete(delete_institute))
        .route("/courses", post(create_course))
        .route("/courses/{id}", put(update_course))
        .route("/courses/{id}", delete(delete_course))
}

async fn create_institute(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateInstitute>,
) -> Result<Json<Institute>, ServerError> {
    let created = state.institutes.create(input).await?;
    info!(id = %created.id, slug = %created.slug, "institute created");
    Ok(Json(created))
}

async fn update_institute(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateInstitute>,
) -> Result<Json<Institute>, ServerError> {
    let updated = state.institutes.update(id, input).await?;
    Ok(Json(updated))
}

async fn delete_institute(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ServerError> {
    // Ensure the target exists so deletes of unknown IDs are 404s.
    state.institutes.get_by_id(id).await?;
    state.institutes.delete(id).await?;
    info!(%id, "institute deleted");
    Ok(Json(json!({ "status": "deleted" })))
}

async fn create_course(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateCourse>,
) -> Result<Json<Course>, ServerError> {
    let created = state.courses.create(input).await?;
    info!(id = %created.id, slug = %created.slug, "course created");
    Ok(Json(created))
}

async fn update_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCourse>,
) -> Result<Json<Course>, ServerError> {
    let updated = state.courses.update(id, input).await?;
    Ok(Json(updated))
}

async fn delete_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ServerError> {
    state.courses.get_by_id(id).await?;
    state.courses.delete(id).await?;
    info!(%id, "course deleted");
    Ok(Json(json!({ "status": "deleted" })))
}
