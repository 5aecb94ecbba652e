//! Public enquiry submission route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use edupath_core::models::enquiry::{CreateEnquiry, Enquiry};
use edupath_core::repository::EnquiryRepository;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::ServerError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/enquiries", post(create_enquiry))
}

/// The public contact form. Same contact-field rules as the
/// comparison registration form.
#[derive(Debug, Deserialize, Validate)]
struct EnquiryForm {
    #[validate(length(min = 2, max = 100, message = "name must be 2-100 characters"))]
    name: String,
    #[validate(
        email(message = "email must be a valid address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    email: String,
    #[validate(length(min = 10, max = 15, message = "phone must be 10-15 characters"))]
    phone: String,
    #[validate(length(min = 2, max = 100, message = "city must be 2-100 characters"))]
    city: Option<String>,
    institute_id: Option<Uuid>,
    course_id: Option<Uuid>,
    #[validate(length(max = 1000, message = "message must be at most 1000 characters"))]
    message: Option<String>,
}

async fn create_enquiry(
    State(state): State<Arc<AppState>>,
    Json(form): Json<EnquiryForm>,
) -> Result<Json<Enquiry>, ServerError> {
    form.validate()
        .map_err(|e| ServerError::Core(edupath_core::error::EdupathError::Validation {
            message: e.to_string(),
        }))?;

    let created = state
        .enquiries
        .create(CreateEnquiry {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            city: form.city.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
            institute_id: form.institute_id,
            course_id: form.course_id,
            message: form.message,
        })
        .await?;

    Ok(Json(created))
}
