//! Public institute catalog routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use edupath_core::models::course::Course;
use edupath_core::models::institute::Institute;
use edupath_core::repository::{CourseRepository, InstituteRepository};

use crate::error::ServerError;
use crate::routes::{ListQuery, Page};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/institutes", get(list_institutes))
        .route("/institutes/{slug}", get(get_institute))
        .route("/institutes/{slug}/courses", get(list_institute_courses))
}

async fn list_institutes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Institute>>, ServerError> {
    let page = state.institutes.list(query.pagination()).await?;
    Ok(Json(page.into()))
}

async fn get_institute(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Institute>, ServerError> {
    let institute = state.institutes.get_by_slug(&slug).await?;
    Ok(Json(institute))
}

async fn list_institute_courses(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Course>>, ServerError> {
    // Resolve the slug first so an unknown institute is a 404, not an
    // empty list.
    let institute = state.institutes.get_by_slug(&slug).await?;
    let courses = state.courses.list_by_institute(institute.id).await?;
    Ok(Json(courses))
}
