//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. Slugs carry unique indexes so
//! collisions are rejected by the backend rather than producing
//! ambiguous lookups.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "catalog_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — catalog and lead tables
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Institutes (public catalog, admin-owned)
-- =======================================================================
DEFINE TABLE institute SCHEMAFULL;
DEFINE FIELD name ON TABLE institute TYPE string;
DEFINE FIELD slug ON TABLE institute TYPE string;
DEFINE FIELD location ON TABLE institute TYPE option<string>;
DEFINE FIELD description ON TABLE institute TYPE option<string>;
DEFINE FIELD logo_url ON TABLE institute TYPE option<string>;
DEFINE FIELD website_url ON TABLE institute TYPE option<string>;
DEFINE FIELD established_year ON TABLE institute TYPE option<int>;
DEFINE FIELD rating ON TABLE institute TYPE option<float> \
    ASSERT $value = NONE OR ($value >= 0 AND $value <= 5);
DEFINE FIELD approvals ON TABLE institute TYPE array<string> DEFAULT [];
DEFINE FIELD created_at ON TABLE institute TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE institute TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_institute_slug ON TABLE institute \
    COLUMNS slug UNIQUE;

-- =======================================================================
-- Courses (public catalog, admin-owned; grouped across institutes
-- by shared name)
-- =======================================================================
DEFINE TABLE course SCHEMAFULL;
DEFINE FIELD institute_id ON TABLE course TYPE string;
DEFINE FIELD name ON TABLE course TYPE string;
DEFINE FIELD slug ON TABLE course TYPE string;
DEFINE FIELD description ON TABLE course TYPE option<string>;
DEFINE FIELD duration ON TABLE course TYPE string;
DEFINE FIELD level ON TABLE course TYPE string \
    ASSERT $value IN ['UG', 'PG', 'Diploma', 'Certificate'];
DEFINE FIELD mode ON TABLE course TYPE string \
    ASSERT $value IN ['Online', 'Hybrid', 'Offline'];
DEFINE FIELD fee_min ON TABLE course TYPE option<int> \
    ASSERT $value = NONE OR $value >= 0;
DEFINE FIELD fee_max ON TABLE course TYPE option<int> \
    ASSERT $value = NONE OR $value >= 0;
DEFINE FIELD eligibility ON TABLE course TYPE option<string>;
DEFINE FIELD specializations ON TABLE course TYPE array<string> \
    DEFAULT [];
DEFINE FIELD accreditation ON TABLE course TYPE array<string> \
    DEFAULT [];
DEFINE FIELD rating ON TABLE course TYPE option<float> \
    ASSERT $value = NONE OR ($value >= 0 AND $value <= 5);
DEFINE FIELD created_at ON TABLE course TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE course TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_course_slug ON TABLE course COLUMNS slug UNIQUE;
DEFINE INDEX idx_course_name ON TABLE course COLUMNS name;
DEFINE INDEX idx_course_institute ON TABLE course \
    COLUMNS institute_id;

-- =======================================================================
-- Enquiries (public form submissions)
-- =======================================================================
DEFINE TABLE enquiry SCHEMAFULL;
DEFINE FIELD name ON TABLE enquiry TYPE string;
DEFINE FIELD email ON TABLE enquiry TYPE string;
DEFINE FIELD phone ON TABLE enquiry TYPE string;
DEFINE FIELD city ON TABLE enquiry TYPE option<string>;
DEFINE FIELD institute_id ON TABLE enquiry TYPE option<string>;
DEFINE FIELD course_id ON TABLE enquiry TYPE option<string>;
DEFINE FIELD message ON TABLE enquiry TYPE option<string>;
DEFINE FIELD status ON TABLE enquiry TYPE string DEFAULT 'new' \
    ASSERT $value IN ['new', 'contacted', 'interested', \
    'not-interested'];
DEFINE FIELD created_at ON TABLE enquiry TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Comparison registrations (write-only lead audit trail)
-- =======================================================================
DEFINE TABLE comparison_registration SCHEMAFULL;
DEFINE FIELD name ON TABLE comparison_registration TYPE string;
DEFINE FIELD email ON TABLE comparison_registration TYPE string;
DEFINE FIELD phone ON TABLE comparison_registration TYPE string;
DEFINE FIELD city ON TABLE comparison_registration \
    TYPE option<string>;
DEFINE FIELD compared_courses ON TABLE comparison_registration \
    TYPE array<string> DEFAULT [];
DEFINE FIELD created_at ON TABLE comparison_registration \
    TYPE datetime DEFAULT time::now();
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query("CREATE _migration SET version = $version, name = $name")
                .bind(("version", migration.version))
                .bind(("name", migration.name))
                .await?
                .check()
                .map_err(|e| {
                    DbError::Migration(format!(
                        "Failed to record migration v{}: {}",
                        migration.version, e,
                    ))
                })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_all_collections() {
        for table in [
            "institute",
            "course",
            "enquiry",
            "comparison_registration",
        ] {
            assert!(
                SCHEMA_V1.contains(&format!("DEFINE TABLE {table} SCHEMAFULL")),
                "missing table definition: {table}"
            );
        }
    }

    #[test]
    fn slugs_are_uniquely_indexed() {
        assert!(SCHEMA_V1.contains("idx_institute_slug"));
        assert!(SCHEMA_V1.contains("idx_course_slug"));
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
