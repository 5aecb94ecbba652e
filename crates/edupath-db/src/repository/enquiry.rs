//! SurrealDB implementation of [`EnquiryRepository`].

use chrono::{DateTime, Utc};
use edupath_core::error::EdupathResult;
use edupath_core::models::enquiry::{CreateEnquiry, Enquiry, EnquiryStatus};
use edupath_core::repository::{EnquiryRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct EnquiryRow {
    name: String,
    email: String,
    phone: String,
    city: Option<String>,
    institute_id: Option<String>,
    course_id: Option<String>,
    message: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct EnquiryRowWithId {
    record_id: String,
    name: String,
    email: String,
    phone: String,
    city: Option<String>,
    institute_id: Option<String>,
    course_id: Option<String>,
    message: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_status(s: &str) -> Result<EnquiryStatus, DbError> {
    s.parse()
        .map_err(|e: String| DbError::MalformedRow(e))
}

fn parse_optional_uuid(field: &str, value: Option<String>) -> Result<Option<Uuid>, DbError> {
    value
        .map(|v| {
            Uuid::parse_str(&v)
                .map_err(|e| DbError::MalformedRow(format!("invalid {field} UUID: {e}")))
        })
        .transpose()
}

impl EnquiryRow {
    fn into_enquiry(self, id: Uuid) -> Result<Enquiry, DbError> {
        Ok(Enquiry {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            city: self.city,
            institute_id: parse_optional_uuid("institute", self.institute_id)?,
            course_id: parse_optional_uuid("course", self.course_id)?,
            message: self.message,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
        })
    }
}

impl EnquiryRowWithId {
    fn try_into_enquiry(self) -> Result<Enquiry, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::MalformedRow(format!("invalid UUID: {e}")))?;
        Ok(Enquiry {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            city: self.city,
            institute_id: parse_optional_uuid("institute", self.institute_id)?,
            course_id: parse_optional_uuid("course", self.course_id)?,
            message: self.message,
            status: parse_status(&self.status)?,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the Enquiry repository.
#[derive(Clone)]
pub struct SurrealEnquiryRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealEnquiryRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> EnquiryRepository for SurrealEnquiryRepository<C> {
    async fn create(&self, input: CreateEnquiry) -> EdupathResult<Enquiry> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        // Status is not caller-supplied: every enquiry starts as 'new'.
        let result = self
            .db
            .query(
                "CREATE type::record('enquiry', $id) SET \
                 name = $name, email = $email, phone = $phone, \
                 city = $city, institute_id = $institute_id, \
                 course_id = $course_id, message = $message, \
                 status = 'new'",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .bind(("city", input.city))
            .bind(("institute_id", input.institute_id.map(|v| v.to_string())))
            .bind(("course_id", input.course_id.map(|v| v.to_string())))
            .bind(("message", input.message))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_mutation("enquiry", e))?;

        let rows: Vec<EnquiryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "enquiry".into(),
            id: id_str,
        })?;

        Ok(row.into_enquiry(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> EdupathResult<Enquiry> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('enquiry', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EnquiryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "enquiry".into(),
            id: id_str,
        })?;

        Ok(row.into_enquiry(id)?)
    }

    async fn list(&self, pagination: Pagination) -> EdupathResult<PaginatedResult<Enquiry>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM enquiry GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM enquiry \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<EnquiryRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_enquiry())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn update_status(&self, id: Uuid, status: EnquiryStatus) -> EdupathResult<Enquiry> {
        let id_str = id.to_string();

        let result = self
            .db
            .query("UPDATE type::record('enquiry', $id) SET status = $status")
            .bind(("id", id_str.clone()))
            .bind(("status", status.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_mutation("enquiry", e))?;

        let rows: Vec<EnquiryRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "enquiry".into(),
            id: id_str,
        })?;

        Ok(row.into_enquiry(id)?)
    }

    async fn delete(&self, id: Uuid) -> EdupathResult<()> {
        self.db
            .query("DELETE type::record('enquiry', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
