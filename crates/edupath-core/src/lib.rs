//! EduPath Core — domain models, repository traits, and shared error
//! types for the education catalog and comparison platform.

pub mod error;
pub mod models;
pub mod repository;

pub use error::{EdupathError, EdupathResult};
