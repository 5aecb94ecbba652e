//! Admin dashboard summary counts.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use edupath_core::repository::{
    CourseRepository, EnquiryRepository, InstituteRepository, Pagination,
};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/summary", get(get_summary))
}

#[derive(Debug, Serialize)]
struct Summary {
    institutes: u64,
    courses: u64,
    enquiries: u64,
}

async fn get_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Summary>, ServerError> {
    // Independent counts; fetch them concurrently.
    let counts = Pagination {
        offset: 0,
        limit: 1,
    };
    let (institutes, courses, enquiries) = tokio::join!(
        state.institutes.list(counts.clone()),
        state.courses.list(counts.clone()),
        state.enquiries.list(counts),
    );

    Ok(Json(Summary {
        institutes: institutes?.total,
        courses: courses?.total,
        enquiries: enquiries?.total,
    }))
}
