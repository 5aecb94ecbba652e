//! Enquiry domain model.
//!
//! A lead record submitted via the public contact form. Mutated only
//! via status update or delete from the admin panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnquiryStatus {
    New,
    Contacted,
    Interested,
    NotInterested,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enquiry {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    /// Optional institute the enquiry is about.
    pub institute_id: Option<Uuid>,
    /// Optional course the enquiry is about.
    pub course_id: Option<Uuid>,
    pub message: Option<String>,
    pub status: EnquiryStatus,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted from the public enquiry form. Status always starts
/// as `New`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEnquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub city: Option<String>,
    pub institute_id: Option<Uuid>,
    pub course_id: Option<Uuid>,
    pub message: Option<String>,
}

impl std::fmt::Display for EnquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EnquiryStatus::New => "new",
            EnquiryStatus::Contacted => "contacted",
            EnquiryStatus::Interested => "interested",
            EnquiryStatus::NotInterested => "not-interested",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for EnquiryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(EnquiryStatus::New),
            "contacted" => Ok(EnquiryStatus::Contacted),
            "interested" => Ok(EnquiryStatus::Interested),
            "not-interested" => Ok(EnquiryStatus::NotInterested),
            other => Err(format!("unknown enquiry status: {other}")),
        }
    }
}
