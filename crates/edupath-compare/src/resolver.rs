//! Resolves decoded compare-link parameters into comparison rows.

use edupath_core::models::course::CourseWithInstitute;
use edupath_core::repository::CourseRepository;
use uuid::Uuid;

use crate::error::CompareError;
use crate::selection::{CompareParams, MIN_INSTITUTES};

/// The comparison data behind an unlocked (or previewed) comparison:
/// the grouping course name and one row per matching course, in
/// backend order.
#[derive(Debug, Clone)]
pub struct ResolvedComparison {
    pub course_name: String,
    pub rows: Vec<CourseWithInstitute>,
}

impl ResolvedComparison {
    /// Course IDs of every row, recorded on the registration created
    /// at unlock time.
    pub fn course_ids(&self) -> Vec<Uuid> {
        self.rows.iter().map(|r| r.course.id).collect()
    }
}

/// Run the comparison query for already-validated params.
///
/// Params arriving from an external link are re-checked here: fewer
/// than [`MIN_INSTITUTES`] slugs is invalid regardless of how the
/// params were constructed. Slugs that match nothing simply produce
/// fewer rows; an empty result set is not an error.
pub async fn resolve<R: CourseRepository>(
    repo: &R,
    params: &CompareParams,
) -> Result<ResolvedComparison, CompareError> {
    if params.course_name.trim().is_empty() || params.institute_slugs.len() < MIN_INSTITUTES {
        return Err(CompareError::InvalidSelection);
    }

    let rows = repo
        .list_for_comparison(&params.course_name, &params.institute_slugs)
        .await?;

    Ok(ResolvedComparison {
        course_name: params.course_name.clone(),
        rows,
    })
}
