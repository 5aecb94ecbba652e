//! SurrealDB implementation of [`InstituteRepository`].

use chrono::{DateTime, Utc};
use edupath_core::error::{EdupathError, EdupathResult};
use edupath_core::models::institute::{CreateInstitute, Institute, UpdateInstitute};
use edupath_core::repository::{InstituteRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct InstituteRow {
    name: String,
    slug: String,
    location: Option<String>,
    description: Option<String>,
    logo_url: Option<String>,
    website_url: Option<String>,
    established_year: Option<i32>,
    rating: Option<f64>,
    approvals: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InstituteRow {
    fn into_institute(self, id: Uuid) -> Institute {
        Institute {
            id,
            name: self.name,
            slug: self.slug,
            location: self.location,
            description: self.description,
            logo_url: self.logo_url,
            website_url: self.website_url,
            established_year: self.established_year,
            rating: self.rating,
            approvals: self.approvals,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct InstituteRowWithId {
    record_id: String,
    name: String,
    slug: String,
    location: Option<String>,
    description: Option<String>,
    logo_url: Option<String>,
    website_url: Option<String>,
    established_year: Option<i32>,
    rating: Option<f64>,
    approvals: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InstituteRowWithId {
    fn try_into_institute(self) -> Result<Institute, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::MalformedRow(format!("invalid institute UUID: {e}")))?;
        Ok(Institute {
            id,
            name: self.name,
            slug: self.slug,
            location: self.location,
            description: self.description,
            logo_url: self.logo_url,
            website_url: self.website_url,
            established_year: self.established_year,
            rating: self.rating,
            approvals: self.approvals,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Institute repository.
#[derive(Clone)]
pub struct SurrealInstituteRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealInstituteRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> InstituteRepository for SurrealInstituteRepository<C> {
    async fn create(&self, input: CreateInstitute) -> EdupathResult<Institute> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('institute', $id) SET \
                 name = $name, slug = $slug, \
                 location = $location, description = $description, \
                 logo_url = $logo_url, website_url = $website_url, \
                 established_year = $established_year, \
                 rating = $rating, approvals = $approvals",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("slug", input.slug))
            .bind(("location", input.location))
            .bind(("description", input.description))
            .bind(("logo_url", input.logo_url))
            .bind(("website_url", input.website_url))
            .bind(("established_year", input.established_year))
            .bind(("rating", input.rating))
            .bind(("approvals", input.approvals))
            .await
            .map_err(DbError::from)?;

        // A unique-index violation on slug surfaces here.
        let mut result = result
            .check()
            .map_err(|e| DbError::from_mutation("institute", e))?;

        let rows: Vec<InstituteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "institute".into(),
            id: id_str,
        })?;

        Ok(row.into_institute(id))
    }

    async fn get_by_id(&self, id: Uuid) -> EdupathResult<Institute> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('institute', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<InstituteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "institute".into(),
            id: id_str,
        })?;

        Ok(row.into_institute(id))
    }

    async fn get_by_slug(&self, slug: &str) -> EdupathResult<Institute> {
        let slug_owned = slug.to_string();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM institute WHERE slug = $slug",
            )
            .bind(("slug", slug_owned))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<InstituteRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "institute".into(),
            id: format!("slug={slug}"),
        })?;

        Ok(row.try_into_institute()?)
    }

    async fn update(&self, id: Uuid, input: UpdateInstitute) -> EdupathResult<Institute> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.slug.is_some() {
            sets.push("slug = $slug");
        }
        if input.location.is_some() {
            sets.push("location = $location");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.logo_url.is_some() {
            sets.push("logo_url = $logo_url");
        }
        if input.website_url.is_some() {
            sets.push("website_url = $website_url");
        }
        if input.established_year.is_some() {
            sets.push("established_year = $established_year");
        }
        if input.rating.is_some() {
            sets.push("rating = $rating");
        }
        if input.approvals.is_some() {
            sets.push("approvals = $approvals");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('institute', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(slug) = input.slug {
            builder = builder.bind(("slug", slug));
        }
        if let Some(location) = input.location {
            builder = builder.bind(("location", location));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(logo_url) = input.logo_url {
            builder = builder.bind(("logo_url", logo_url));
        }
        if let Some(website_url) = input.website_url {
            builder = builder.bind(("website_url", website_url));
        }
        if let Some(established_year) = input.established_year {
            builder = builder.bind(("established_year", established_year));
        }
        if let Some(rating) = input.rating {
            builder = builder.bind(("rating", rating));
        }
        if let Some(approvals) = input.approvals {
            builder = builder.bind(("approvals", approvals));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::from_mutation("institute", e))?;

        let rows: Vec<InstituteRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "institute".into(),
            id: id_str,
        })?;

        Ok(row.into_institute(id))
    }

    async fn delete(&self, id: Uuid) -> EdupathResult<()> {
        let id_str = id.to_string();

        // Courses keep a plain-string reference to their institute;
        // deleting one that is still referenced would strand those
        // courses and break every listing that joins them.
        let mut dependents = self
            .db
            .query("SELECT count() AS total FROM course WHERE institute_id = $iid GROUP ALL")
            .bind(("iid", id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let counts: Vec<CountRow> = dependents.take(0).map_err(DbError::from)?;
        let total = counts.first().map(|r| r.total).unwrap_or(0);
        if total > 0 {
            return Err(EdupathError::Conflict {
                message: format!("institute {id_str} still has {total} courses; delete them first"),
            });
        }

        self.db
            .query("DELETE type::record('institute', $id)")
            .bind(("id", id_str))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> EdupathResult<PaginatedResult<Institute>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM institute GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM institute \
                 ORDER BY name ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<InstituteRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_institute())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
