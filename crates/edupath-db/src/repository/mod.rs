//! SurrealDB repository implementations.

mod course;
mod enquiry;
mod institute;
mod registration;

pub use course::SurrealCourseRepository;
pub use enquiry::SurrealEnquiryRepository;
pub use institute::SurrealInstituteRepository;
pub use registration::SurrealRegistrationRepository;
