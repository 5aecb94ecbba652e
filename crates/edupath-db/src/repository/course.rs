//! SurrealDB implementation of [`CourseRepository`].
//!
//! Listings that need institute fields issue a second query for the
//! owning institutes and join in memory, keyed by institute ID. The
//! comparison query deliberately makes no ordering promise — rows come
//! back in backend order and callers key columns by institute.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use edupath_core::error::EdupathResult;
use edupath_core::models::course::{
    Course, CourseLevel, CourseMode, CourseOffering, CourseWithInstitute, CreateCourse,
    UpdateCourse, check_fee_range,
};
use edupath_core::models::institute::InstituteSummary;
use edupath_core::repository::{CourseRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct CourseRow {
    institute_id: String,
    name: String,
    slug: String,
    description: Option<String>,
    duration: String,
    level: String,
    mode: String,
    fee_min: Option<u64>,
    fee_max: Option<u64>,
    eligibility: Option<String>,
    specializations: Vec<String>,
    accreditation: Vec<String>,
    rating: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct CourseRowWithId {
    record_id: String,
    institute_id: String,
    name: String,
    slug: String,
    description: Option<String>,
    duration: String,
    level: String,
    mode: String,
    fee_min: Option<u64>,
    fee_max: Option<u64>,
    eligibility: Option<String>,
    specializations: Vec<String>,
    accreditation: Vec<String>,
    rating: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Nested institute fields fetched alongside courses.
#[derive(Debug, SurrealValue)]
struct InstituteSummaryRow {
    record_id: String,
    name: String,
    slug: String,
    location: Option<String>,
    approvals: Vec<String>,
    rating: Option<f64>,
    established_year: Option<i32>,
}

impl InstituteSummaryRow {
    fn try_into_summary(self) -> Result<InstituteSummary, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::MalformedRow(format!("invalid institute UUID: {e}")))?;
        Ok(InstituteSummary {
            id,
            name: self.name,
            slug: self.slug,
            location: self.location,
            approvals: self.approvals,
            rating: self.rating,
            established_year: self.established_year,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// Row struct for name-only projections.
#[derive(Debug, SurrealValue)]
struct NameRow {
    name: String,
}

fn parse_level(s: &str) -> Result<CourseLevel, DbError> {
    match s {
        "UG" => Ok(CourseLevel::Ug),
        "PG" => Ok(CourseLevel::Pg),
        "Diploma" => Ok(CourseLevel::Diploma),
        "Certificate" => Ok(CourseLevel::Certificate),
        other => Err(DbError::MalformedRow(format!(
            "unknown course level: {other}"
        ))),
    }
}

fn parse_mode(s: &str) -> Result<CourseMode, DbError> {
    match s {
        "Online" => Ok(CourseMode::Online),
        "Hybrid" => Ok(CourseMode::Hybrid),
        "Offline" => Ok(CourseMode::Offline),
        other => Err(DbError::MalformedRow(format!(
            "unknown course mode: {other}"
        ))),
    }
}

impl CourseRow {
    fn into_course(self, id: Uuid) -> Result<Course, DbError> {
        let institute_id = Uuid::parse_str(&self.institute_id)
            .map_err(|e| DbError::MalformedRow(format!("invalid institute UUID: {e}")))?;
        Ok(Course {
            id,
            institute_id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            duration: self.duration,
            level: parse_level(&self.level)?,
            mode: parse_mode(&self.mode)?,
            fee_min: self.fee_min,
            fee_max: self.fee_max,
            eligibility: self.eligibility,
            specializations: self.specializations,
            accreditation: self.accreditation,
            rating: self.rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl CourseRowWithId {
    fn try_into_course(self) -> Result<Course, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::MalformedRow(format!("invalid UUID: {e}")))?;
        let institute_id = Uuid::parse_str(&self.institute_id)
            .map_err(|e| DbError::MalformedRow(format!("invalid institute UUID: {e}")))?;
        Ok(Course {
            id,
            institute_id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            duration: self.duration,
            level: parse_level(&self.level)?,
            mode: parse_mode(&self.mode)?,
            fee_min: self.fee_min,
            fee_max: self.fee_max,
            eligibility: self.eligibility,
            specializations: self.specializations,
            accreditation: self.accreditation,
            rating: self.rating,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn level_to_string(level: &CourseLevel) -> &'static str {
    match level {
        CourseLevel::Ug => "UG",
        CourseLevel::Pg => "PG",
        CourseLevel::Diploma => "Diploma",
        CourseLevel::Certificate => "Certificate",
    }
}

fn mode_to_string(mode: &CourseMode) -> &'static str {
    match mode {
        CourseMode::Online => "Online",
        CourseMode::Hybrid => "Hybrid",
        CourseMode::Offline => "Offline",
    }
}

/// SurrealDB implementation of the Course repository.
#[derive(Clone)]
pub struct SurrealCourseRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCourseRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Fetch institute summaries for the given IDs, keyed by UUID.
    async fn institutes_by_ids(
        &self,
        ids: Vec<String>,
    ) -> Result<HashMap<Uuid, InstituteSummary>, DbError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, name, slug, \
                 location, approvals, rating, established_year \
                 FROM institute WHERE meta::id(id) IN $ids",
            )
            .bind(("ids", ids))
            .await?;

        let rows: Vec<InstituteSummaryRow> = result.take(0)?;
        let mut map = HashMap::with_capacity(rows.len());
        for row in rows {
            let summary = row.try_into_summary()?;
            map.insert(summary.id, summary);
        }
        Ok(map)
    }

    /// Referential integrity: the owning institute must exist.
    async fn assert_institute_exists(&self, institute_id: &str) -> Result<(), DbError> {
        let mut check = self
            .db
            .query("SELECT count() AS total FROM type::record('institute', $iid) GROUP ALL")
            .bind(("iid", institute_id.to_string()))
            .await?;
        let counts: Vec<CountRow> = check.take(0)?;
        if counts.first().map(|r| r.total).unwrap_or(0) == 0 {
            return Err(DbError::InvalidReference(format!(
                "institute {institute_id} does not exist"
            )));
        }
        Ok(())
    }

    /// Join course rows with their institute summaries, dropping
    /// nothing: a course whose institute is missing is a malformed
    /// row, not a silent omission.
    async fn join_institutes(
        &self,
        courses: Vec<Course>,
    ) -> Result<Vec<CourseWithInstitute>, DbError> {
        let ids: Vec<String> = courses
            .iter()
            .map(|c| c.institute_id.to_string())
            .collect();
        let institutes = self.institutes_by_ids(ids).await?;

        courses
            .into_iter()
            .map(|course| {
                let institute = institutes.get(&course.institute_id).cloned().ok_or_else(|| {
                    DbError::MalformedRow(format!(
                        "course {} references missing institute {}",
                        course.id, course.institute_id
                    ))
                })?;
                Ok(CourseWithInstitute { course, institute })
            })
            .collect()
    }
}

impl<C: Connection> CourseRepository for SurrealCourseRepository<C> {
    async fn create(&self, input: CreateCourse) -> EdupathResult<Course> {
        check_fee_range(input.fee_min, input.fee_max)?;

        let institute_id_str = input.institute_id.to_string();
        self.assert_institute_exists(&institute_id_str).await?;

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('course', $id) SET \
                 institute_id = $institute_id, \
                 name = $name, slug = $slug, \
                 description = $description, duration = $duration, \
                 level = $level, mode = $mode, \
                 fee_min = $fee_min, fee_max = $fee_max, \
                 eligibility = $eligibility, \
                 specializations = $specializations, \
                 accreditation = $accreditation, \
                 rating = $rating",
            )
            .bind(("id", id_str.clone()))
            .bind(("institute_id", institute_id_str))
            .bind(("name", input.name))
            .bind(("slug", input.slug))
            .bind(("description", input.description))
            .bind(("duration", input.duration))
            .bind(("level", level_to_string(&input.level).to_string()))
            .bind(("mode", mode_to_string(&input.mode).to_string()))
            .bind(("fee_min", input.fee_min))
            .bind(("fee_max", input.fee_max))
            .bind(("eligibility", input.eligibility))
            .bind(("specializations", input.specializations))
            .bind(("accreditation", input.accreditation))
            .bind(("rating", input.rating))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_mutation("course", e))?;

        let rows: Vec<CourseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "course".into(),
            id: id_str,
        })?;

        Ok(row.into_course(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> EdupathResult<Course> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('course', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "course".into(),
            id: id_str,
        })?;

        Ok(row.into_course(id)?)
    }

    async fn get_by_slug(&self, slug: &str) -> EdupathResult<CourseWithInstitute> {
        let slug_owned = slug.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM course WHERE slug = $slug",
            )
            .bind(("slug", slug_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourseRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "course".into(),
            id: format!("slug={slug}"),
        })?;

        let course = row.try_into_course()?;
        let mut joined = self.join_institutes(vec![course]).await?;
        // join_institutes preserves input length on success.
        joined
            .pop()
            .ok_or_else(|| {
                DbError::MalformedRow("course join produced no rows".into()).into()
            })
    }

    async fn update(&self, id: Uuid, input: UpdateCourse) -> EdupathResult<Course> {
        let id_str = id.to_string();

        if let Some(institute_id) = input.institute_id {
            self.assert_institute_exists(&institute_id.to_string())
                .await?;
        }

        // A partial fee update must not invert the stored range.
        if input.fee_min.is_some() || input.fee_max.is_some() {
            let current = self.get_by_id(id).await?;
            check_fee_range(
                input.fee_min.or(current.fee_min),
                input.fee_max.or(current.fee_max),
            )?;
        }

        let mut sets = Vec::new();
        if input.institute_id.is_some() {
            sets.push("institute_id = $institute_id");
        }
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.slug.is_some() {
            sets.push("slug = $slug");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.duration.is_some() {
            sets.push("duration = $duration");
        }
        if input.level.is_some() {
            sets.push("level = $level");
        }
        if input.mode.is_some() {
            sets.push("mode = $mode");
        }
        if input.fee_min.is_some() {
            sets.push("fee_min = $fee_min");
        }
        if input.fee_max.is_some() {
            sets.push("fee_max = $fee_max");
        }
        if input.eligibility.is_some() {
            sets.push("eligibility = $eligibility");
        }
        if input.specializations.is_some() {
            sets.push("specializations = $specializations");
        }
        if input.accreditation.is_some() {
            sets.push("accreditation = $accreditation");
        }
        if input.rating.is_some() {
            sets.push("rating = $rating");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('course', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(institute_id) = input.institute_id {
            builder = builder.bind(("institute_id", institute_id.to_string()));
        }
        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(slug) = input.slug {
            builder = builder.bind(("slug", slug));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(duration) = input.duration {
            builder = builder.bind(("duration", duration));
        }
        if let Some(ref level) = input.level {
            builder = builder.bind(("level", level_to_string(level).to_string()));
        }
        if let Some(ref mode) = input.mode {
            builder = builder.bind(("mode", mode_to_string(mode).to_string()));
        }
        if let Some(fee_min) = input.fee_min {
            builder = builder.bind(("fee_min", fee_min));
        }
        if let Some(fee_max) = input.fee_max {
            builder = builder.bind(("fee_max", fee_max));
        }
        if let Some(eligibility) = input.eligibility {
            builder = builder.bind(("eligibility", eligibility));
        }
        if let Some(specializations) = input.specializations {
            builder = builder.bind(("specializations", specializations));
        }
        if let Some(accreditation) = input.accreditation {
            builder = builder.bind(("accreditation", accreditation));
        }
        if let Some(rating) = input.rating {
            builder = builder.bind(("rating", rating));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::from_mutation("course", e))?;

        let rows: Vec<CourseRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "course".into(),
            id: id_str,
        })?;

        Ok(row.into_course(id)?)
    }

    async fn delete(&self, id: Uuid) -> EdupathResult<()> {
        self.db
            .query("DELETE type::record('course', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(
        &self,
        pagination: Pagination,
    ) -> EdupathResult<PaginatedResult<CourseWithInstitute>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM course GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM course \
                 ORDER BY name ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourseRowWithId> = result.take(0).map_err(DbError::from)?;
        let courses = rows
            .into_iter()
            .map(|row| row.try_into_course())
            .collect::<Result<Vec<_>, DbError>>()?;

        let items = self.join_institutes(courses).await?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_by_institute(&self, institute_id: Uuid) -> EdupathResult<Vec<Course>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM course \
                 WHERE institute_id = $institute_id \
                 ORDER BY name ASC",
            )
            .bind(("institute_id", institute_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourseRowWithId> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .map(|row| row.try_into_course())
            .collect::<Result<Vec<_>, DbError>>()?)
    }

    async fn list_names(&self) -> EdupathResult<Vec<String>> {
        let mut result = self
            .db
            .query("SELECT name FROM course ORDER BY name ASC")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<NameRow> = result.take(0).map_err(DbError::from)?;

        // Many institutes offer the same course name; dedupe while
        // keeping the sorted order.
        let mut names: Vec<String> = Vec::with_capacity(rows.len());
        for row in rows {
            if names.last().map(|n| n != &row.name).unwrap_or(true) {
                names.push(row.name);
            }
        }
        Ok(names)
    }

    async fn list_offerings(&self, course_name: &str) -> EdupathResult<Vec<CourseOffering>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM course \
                 WHERE name = $name",
            )
            .bind(("name", course_name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourseRowWithId> = result.take(0).map_err(DbError::from)?;
        let courses = rows
            .into_iter()
            .map(|row| row.try_into_course())
            .collect::<Result<Vec<_>, DbError>>()?;

        let joined = self.join_institutes(courses).await?;
        Ok(joined
            .into_iter()
            .map(|cwi| CourseOffering {
                course_id: cwi.course.id,
                course_slug: cwi.course.slug,
                institute: cwi.institute,
            })
            .collect())
    }

    async fn list_for_comparison(
        &self,
        course_name: &str,
        institute_slugs: &[String],
    ) -> EdupathResult<Vec<CourseWithInstitute>> {
        // Resolve the slug set to institute IDs first, then fetch the
        // matching course rows. No ordering clause: the comparison
        // view keys columns by institute, not by request order.
        let mut inst_result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, name, slug, \
                 location, approvals, rating, established_year \
                 FROM institute WHERE slug IN $slugs",
            )
            .bind(("slugs", institute_slugs.to_vec()))
            .await
            .map_err(DbError::from)?;

        let inst_rows: Vec<InstituteSummaryRow> = inst_result.take(0).map_err(DbError::from)?;
        let mut institutes = HashMap::with_capacity(inst_rows.len());
        for row in inst_rows {
            let summary = row.try_into_summary()?;
            institutes.insert(summary.id, summary);
        }

        if institutes.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = institutes.keys().map(|id| id.to_string()).collect();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM course \
                 WHERE name = $name AND institute_id IN $institute_ids",
            )
            .bind(("name", course_name.to_string()))
            .bind(("institute_ids", ids))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CourseRowWithId> = result.take(0).map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| {
                let course = row.try_into_course()?;
                let institute = institutes.get(&course.institute_id).cloned().ok_or_else(|| {
                    DbError::MalformedRow(format!(
                        "course {} references missing institute {}",
                        course.id, course.institute_id
                    ))
                })?;
                Ok(CourseWithInstitute { course, institute })
            })
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }
}
