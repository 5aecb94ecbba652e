//! Comparison routes: locked preview and the registration unlock.
//!
//! `GET /compare` never returns attribute data — only the column
//! headers, so a landing page can render what is being compared. The
//! full table comes back exclusively from a successful
//! `POST /compare/registrations`.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use edupath_compare::{
    CompareParams, ComparisonColumn, ComparisonTable, LeadGate, RegistrationInput, resolve,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/compare", get(preview_comparison))
        .route("/compare/registrations", post(unlock_comparison))
}

#[derive(Debug, Deserialize)]
struct CompareQuery {
    course: Option<String>,
    /// Comma-joined institute slugs, as emitted by compare links.
    institutes: Option<String>,
}

#[derive(Debug, Serialize)]
struct ComparePreview {
    course_name: String,
    columns: Vec<ComparisonColumn>,
    locked: bool,
}

async fn preview_comparison(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparePreview>, ServerError> {
    let params =
        CompareParams::from_query_parts(query.course.as_deref(), query.institutes.as_deref())?;
    let comparison = resolve(&state.courses, &params).await?;

    let columns = comparison
        .rows
        .iter()
        .map(|r| ComparisonColumn {
            institute_name: r.institute.name.clone(),
            institute_slug: r.institute.slug.clone(),
            course_slug: r.course.slug.clone(),
        })
        .collect();

    Ok(Json(ComparePreview {
        course_name: comparison.course_name,
        columns,
        locked: true,
    }))
}

#[derive(Debug, Deserialize)]
struct UnlockRequest {
    course: String,
    institutes: Vec<String>,
    #[serde(flatten)]
    registration: RegistrationInput,
}

#[derive(Debug, Serialize)]
struct UnlockResponse {
    registration_id: Uuid,
    table: ComparisonTable,
}

async fn unlock_comparison(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UnlockRequest>,
) -> Result<Json<UnlockResponse>, ServerError> {
    let joined = request.institutes.join(",");
    let params = CompareParams::from_query_parts(Some(&request.course), Some(&joined))?;
    let comparison = resolve(&state.courses, &params).await?;

    let mut gate = LeadGate::new();
    let created = gate
        .submit(
            &state.registrations,
            &request.registration,
            comparison.course_ids(),
        )
        .await?;

    info!(
        registration_id = %created.id,
        course = %comparison.course_name,
        columns = comparison.rows.len(),
        "comparison unlocked"
    );

    let table = gate
        .table_for(&comparison)
        .ok_or_else(|| ServerError::Core(edupath_core::error::EdupathError::Internal(
            "gate not unlocked after successful registration".into(),
        )))?;

    Ok(Json(UnlockResponse {
        registration_id: created.id,
        table,
    }))
}
