//! Domain models for EduPath.
//!
//! These are the core catalog and lead-capture types shared across all
//! crates.

pub mod course;
pub mod enquiry;
pub mod institute;
pub mod registration;
