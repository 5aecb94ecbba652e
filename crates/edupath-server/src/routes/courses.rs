//! Public course catalog routes.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use edupath_core::models::course::{CourseOffering, CourseWithInstitute};
use edupath_core::repository::CourseRepository;
use serde::Deserialize;

use crate::error::ServerError;
use crate::routes::{ListQuery, Page};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/courses", get(list_courses))
        // Literal segments before the slug capture.
        .route("/courses/names", get(list_course_names))
        .route("/courses/offerings", get(list_offerings))
        .route("/courses/{slug}", get(get_course))
}

async fn list_courses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<CourseWithInstitute>>, ServerError> {
    let page = state.courses.list(query.pagination()).await?;
    Ok(Json(page.into()))
}

async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<CourseWithInstitute>, ServerError> {
    let course = state.courses.get_by_slug(&slug).await?;
    Ok(Json(course))
}

/// Unique course names, for the comparison selection widget.
async fn list_course_names(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ServerError> {
    let names = state.courses.list_names().await?;
    Ok(Json(names))
}

#[derive(Debug, Deserialize)]
struct OfferingsQuery {
    course: String,
}

/// Institutes offering the given course name.
async fn list_offerings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OfferingsQuery>,
) -> Result<Json<Vec<CourseOffering>>, ServerError> {
    if query.course.trim().is_empty() {
        return Err(ServerError::BadRequest("course must not be empty".into()));
    }
    let offerings = state.courses.list_offerings(&query.course).await?;
    Ok(Json(offerings))
}
