//! Course domain model.
//!
//! A course is a program offering tied to one institute. Many
//! institutes offer courses sharing the same `name` (e.g., "MBA") —
//! that shared name is the grouping key for comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EdupathError, EdupathResult};
use crate::models::institute::InstituteSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseLevel {
    #[serde(rename = "UG")]
    Ug,
    #[serde(rename = "PG")]
    Pg,
    Diploma,
    Certificate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseMode {
    Online,
    Hybrid,
    Offline,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    /// The institute offering this course.
    pub institute_id: Uuid,
    /// Shared grouping name across institutes (e.g., `MBA`).
    pub name: String,
    /// URL-safe unique identifier.
    pub slug: String,
    pub description: Option<String>,
    /// Free-form duration text (e.g., `2 years`).
    pub duration: String,
    pub level: CourseLevel,
    pub mode: CourseMode,
    pub fee_min: Option<u64>,
    pub fee_max: Option<u64>,
    pub eligibility: Option<String>,
    pub specializations: Vec<String>,
    pub accreditation: Vec<String>,
    /// Rating in [0, 5].
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourse {
    pub institute_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub duration: String,
    pub level: CourseLevel,
    pub mode: CourseMode,
    pub fee_min: Option<u64>,
    pub fee_max: Option<u64>,
    pub eligibility: Option<String>,
    pub specializations: Vec<String>,
    pub accreditation: Vec<String>,
    pub rating: Option<f64>,
}

/// Fields that can be updated on an existing course.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCourse {
    pub institute_id: Option<Uuid>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub level: Option<CourseLevel>,
    pub mode: Option<CourseMode>,
    pub fee_min: Option<u64>,
    pub fee_max: Option<u64>,
    pub eligibility: Option<String>,
    pub specializations: Option<Vec<String>>,
    pub accreditation: Option<Vec<String>>,
    pub rating: Option<f64>,
}

/// Rejects an inverted fee range. Bounds are optional; the check
/// applies only when both are present.
pub fn check_fee_range(fee_min: Option<u64>, fee_max: Option<u64>) -> EdupathResult<()> {
    if let (Some(min), Some(max)) = (fee_min, fee_max) {
        if min > max {
            return Err(EdupathError::Validation {
                message: format!("fee_min ({min}) must not exceed fee_max ({max})"),
            });
        }
    }
    Ok(())
}

/// A course together with its owning institute's nested fields, as
/// returned by catalog listings and the comparison query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseWithInstitute {
    pub course: Course,
    pub institute: InstituteSummary,
}

/// One selectable institute option for a given course name, used by
/// the comparison selection widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOffering {
    pub course_id: Uuid,
    pub course_slug: String,
    pub institute: InstituteSummary,
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CourseLevel::Ug => "UG",
            CourseLevel::Pg => "PG",
            CourseLevel::Diploma => "Diploma",
            CourseLevel::Certificate => "Certificate",
        };
        f.write_str(s)
    }
}

impl std::fmt::Display for CourseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CourseMode::Online => "Online",
            CourseMode::Hybrid => "Hybrid",
            CourseMode::Offline => "Offline",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_fee_range_is_rejected() {
        let err = check_fee_range(Some(500_000), Some(100_000)).unwrap_err();
        assert!(matches!(err, EdupathError::Validation { .. }));
    }

    #[test]
    fn ordered_equal_and_partial_ranges_pass() {
        assert!(check_fee_range(Some(100_000), Some(500_000)).is_ok());
        assert!(check_fee_range(Some(100_000), Some(100_000)).is_ok());
        assert!(check_fee_range(Some(500_000), None).is_ok());
        assert!(check_fee_range(None, Some(100_000)).is_ok());
        assert!(check_fee_range(None, None).is_ok());
    }
}
