//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Implementations live in
//! `edupath-db`; the comparison and session services depend only on
//! these traits.

use uuid::Uuid;

use crate::error::EdupathResult;
use crate::models::{
    course::{Course, CourseOffering, CourseWithInstitute, CreateCourse, UpdateCourse},
    enquiry::{CreateEnquiry, Enquiry, EnquiryStatus},
    institute::{CreateInstitute, Institute, UpdateInstitute},
    registration::{ComparisonRegistration, CreateComparisonRegistration},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Catalog (admin-owned, publicly read)
// ---------------------------------------------------------------------------

pub trait InstituteRepository: Send + Sync {
    fn create(
        &self,
        input: CreateInstitute,
    ) -> impl Future<Output = EdupathResult<Institute>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = EdupathResult<Institute>> + Send;
    fn get_by_slug(&self, slug: &str) -> impl Future<Output = EdupathResult<Institute>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateInstitute,
    ) -> impl Future<Output = EdupathResult<Institute>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = EdupathResult<()>> + Send;
    /// List institutes ordered by name.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = EdupathResult<PaginatedResult<Institute>>> + Send;
}

pub trait CourseRepository: Send + Sync {
    /// Create a course. Fails with `InvalidReference` if
    /// `institute_id` does not name an existing institute.
    fn create(&self, input: CreateCourse) -> impl Future<Output = EdupathResult<Course>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = EdupathResult<Course>> + Send;
    /// Slug lookup including the owning institute's nested fields.
    fn get_by_slug(
        &self,
        slug: &str,
    ) -> impl Future<Output = EdupathResult<CourseWithInstitute>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateCourse,
    ) -> impl Future<Output = EdupathResult<Course>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = EdupathResult<()>> + Send;
    /// List courses with nested institute fields, ordered by name.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = EdupathResult<PaginatedResult<CourseWithInstitute>>> + Send;
    /// All courses offered by one institute, ordered by name.
    fn list_by_institute(
        &self,
        institute_id: Uuid,
    ) -> impl Future<Output = EdupathResult<Vec<Course>>> + Send;
    /// Deduplicated, sorted course names (the comparison grouping
    /// keys).
    fn list_names(&self) -> impl Future<Output = EdupathResult<Vec<String>>> + Send;
    /// Institutes offering the given course name, for the selection
    /// widget.
    fn list_offerings(
        &self,
        course_name: &str,
    ) -> impl Future<Output = EdupathResult<Vec<CourseOffering>>> + Send;
    /// The comparison query: all courses whose `name` equals
    /// `course_name` and whose owning institute's slug is in
    /// `institute_slugs`, with nested institute fields. Result order
    /// is backend-defined.
    fn list_for_comparison(
        &self,
        course_name: &str,
        institute_slugs: &[String],
    ) -> impl Future<Output = EdupathResult<Vec<CourseWithInstitute>>> + Send;
}

// ---------------------------------------------------------------------------
// Leads
// ---------------------------------------------------------------------------

pub trait EnquiryRepository: Send + Sync {
    fn create(&self, input: CreateEnquiry) -> impl Future<Output = EdupathResult<Enquiry>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = EdupathResult<Enquiry>> + Send;
    /// List enquiries, newest first.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = EdupathResult<PaginatedResult<Enquiry>>> + Send;
    fn update_status(
        &self,
        id: Uuid,
        status: EnquiryStatus,
    ) -> impl Future<Output = EdupathResult<Enquiry>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = EdupathResult<()>> + Send;
}

/// Append-only: registrations are never read back by any surface.
pub trait RegistrationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateComparisonRegistration,
    ) -> impl Future<Output = EdupathResult<ComparisonRegistration>> + Send;
}
