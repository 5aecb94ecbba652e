//! Projection of resolved comparison rows into the attribute table.
//!
//! The table is attribute-major: one column per compared course, one
//! row per fixed attribute. All cell values are display strings;
//! missing data renders as an empty cell, never an error.

use edupath_core::models::course::CourseWithInstitute;
use serde::Serialize;

use crate::resolver::ResolvedComparison;

/// Fixed attribute rows, in display order.
pub const ATTRIBUTE_LABELS: [&str; 8] = [
    "Location",
    "Duration",
    "Fee Range",
    "Rating",
    "Approvals",
    "Mode",
    "Specializations",
    "Eligibility",
];

/// Specializations shown before collapsing into `+N more`.
const SPECIALIZATIONS_SHOWN: usize = 3;

/// One column header: the institute offering the compared course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonColumn {
    pub institute_name: String,
    pub institute_slug: String,
    pub course_slug: String,
}

/// One attribute row across all columns. `values` is parallel to the
/// table's `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRow {
    pub label: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonTable {
    pub course_name: String,
    pub columns: Vec<ComparisonColumn>,
    pub rows: Vec<AttributeRow>,
}

impl ComparisonTable {
    /// Build the table from resolved rows, preserving their order.
    pub fn project(comparison: &ResolvedComparison) -> Self {
        let columns = comparison
            .rows
            .iter()
            .map(|r| ComparisonColumn {
                institute_name: r.institute.name.clone(),
                institute_slug: r.institute.slug.clone(),
                course_slug: r.course.slug.clone(),
            })
            .collect();

        let rows = ATTRIBUTE_LABELS
            .iter()
            .map(|label| AttributeRow {
                label: label.to_string(),
                values: comparison
                    .rows
                    .iter()
                    .map(|r| attribute_value(label, r))
                    .collect(),
            })
            .collect();

        Self {
            course_name: comparison.course_name.clone(),
            columns,
            rows,
        }
    }
}

fn attribute_value(label: &str, row: &CourseWithInstitute) -> String {
    match label {
        "Location" => row.institute.location.clone().unwrap_or_default(),
        "Duration" => row.course.duration.clone(),
        "Fee Range" => fee_range(row.course.fee_min, row.course.fee_max),
        "Rating" => row
            .course
            .rating
            .or(row.institute.rating)
            .map(|r| format!("{r}/5"))
            .unwrap_or_default(),
        "Approvals" => row.institute.approvals.join(", "),
        "Mode" => row.course.mode.to_string(),
        "Specializations" => specializations(&row.course.specializations),
        "Eligibility" => row.course.eligibility.clone().unwrap_or_default(),
        _ => String::new(),
    }
}

/// `₹min - ₹max`, collapsing to one figure when only one bound is
/// present.
fn fee_range(min: Option<u64>, max: Option<u64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("₹{min} - ₹{max}"),
        (Some(min), None) => format!("₹{min}"),
        (None, Some(max)) => format!("₹{max}"),
        (None, None) => String::new(),
    }
}

/// First few specializations, then a `+N more` suffix.
fn specializations(all: &[String]) -> String {
    if all.is_empty() {
        return String::new();
    }
    let shown = all
        .iter()
        .take(SPECIALIZATIONS_SHOWN)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    let hidden = all.len().saturating_sub(SPECIALIZATIONS_SHOWN);
    if hidden > 0 {
        format!("{shown} +{hidden} more")
    } else {
        shown
    }
}
