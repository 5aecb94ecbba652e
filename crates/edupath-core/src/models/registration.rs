//! Comparison registration domain model.
//!
//! Created exactly once per successful comparison unlock. Write-only
//! audit trail: no public surface ever reads these back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRegistration {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    /// The full set of course IDs resolved for the comparison being
    /// unlocked.
    pub compared_courses: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted from the comparison unlock form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComparisonRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub compared_courses: Vec<Uuid>,
}
