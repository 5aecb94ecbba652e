//! SurrealDB implementation of [`RegistrationRepository`].
//!
//! Comparison registrations are a write-only audit trail: there is no
//! read path here by design.

use chrono::{DateTime, Utc};
use edupath_core::error::EdupathResult;
use edupath_core::models::registration::{ComparisonRegistration, CreateComparisonRegistration};
use edupath_core::repository::RegistrationRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct RegistrationRow {
    name: String,
    email: String,
    phone: String,
    city: Option<String>,
    compared_courses: Vec<String>,
    created_at: DateTime<Utc>,
}

impl RegistrationRow {
    fn into_registration(self, id: Uuid) -> Result<ComparisonRegistration, DbError> {
        let compared_courses = self
            .compared_courses
            .into_iter()
            .map(|v| {
                Uuid::parse_str(&v)
                    .map_err(|e| DbError::MalformedRow(format!("invalid course UUID: {e}")))
            })
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(ComparisonRegistration {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            city: self.city,
            compared_courses,
            created_at: self.created_at,
        })
    }
}

/// SurrealDB implementation of the comparison registration repository.
#[derive(Clone)]
pub struct SurrealRegistrationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealRegistrationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> RegistrationRepository for SurrealRegistrationRepository<C> {
    async fn create(
        &self,
        input: CreateComparisonRegistration,
    ) -> EdupathResult<ComparisonRegistration> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let compared: Vec<String> = input
            .compared_courses
            .iter()
            .map(|v| v.to_string())
            .collect();

        let result = self
            .db
            .query(
                "CREATE type::record('comparison_registration', $id) SET \
                 name = $name, email = $email, phone = $phone, \
                 city = $city, compared_courses = $compared_courses",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("phone", input.phone))
            .bind(("city", input.city))
            .bind(("compared_courses", compared))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_mutation("comparison_registration", e))?;

        let rows: Vec<RegistrationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "comparison_registration".into(),
            id: id_str,
        })?;

        Ok(row.into_registration(id)?)
    }
}
