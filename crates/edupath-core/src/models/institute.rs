//! Institute domain model.
//!
//! An institute is a university/college record in the public catalog.
//! Its `slug` is the only stable external identifier — database IDs
//! never appear in URLs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institute {
    pub id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe unique identifier (e.g., `amity-noida`).
    pub slug: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub established_year: Option<i32>,
    /// Aggregate rating in [0, 5].
    pub rating: Option<f64>,
    /// Ordered list of approval bodies (e.g., `UGC`, `AICTE`).
    pub approvals: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new institute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInstitute {
    pub name: String,
    pub slug: String,
    pub location: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub established_year: Option<i32>,
    pub rating: Option<f64>,
    pub approvals: Vec<String>,
}

/// Fields that can be updated on an existing institute.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateInstitute {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub established_year: Option<i32>,
    pub rating: Option<f64>,
    pub approvals: Option<Vec<String>>,
}

/// Institute fields nested into comparison and offering rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstituteSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub location: Option<String>,
    pub approvals: Vec<String>,
    pub rating: Option<f64>,
    pub established_year: Option<i32>,
}
