//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings; session record ids are the opaque
//! tokens themselves. Enums are stored as strings with ASSERT
//! constraints. Each webservice variant (standard API, portal,
//! consents) owns its own session/user table pair.

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
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Standard API — sessions and users
-- =======================================================================
DEFINE TABLE api_session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE api_session TYPE string;
DEFINE FIELD created_at ON TABLE api_session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD changed_at ON TABLE api_session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD ip ON TABLE api_session TYPE option<string>;
DEFINE FIELD last_method ON TABLE api_session TYPE option<string>;
DEFINE FIELD language ON TABLE api_session TYPE option<string>;
DEFINE FIELD params ON TABLE api_session TYPE option<string>;

DEFINE TABLE api_user SCHEMAFULL;
DEFINE FIELD login ON TABLE api_user TYPE string;
DEFINE FIELD password_hash ON TABLE api_user TYPE string;
DEFINE FIELD status ON TABLE api_user TYPE string \
    ASSERT $value IN ['Active', 'Inactive'];
DEFINE FIELD permission_type ON TABLE api_user TYPE string \
    ASSERT $value IN ['Staff', 'Portal', 'Integration'];
DEFINE FIELD crm_id ON TABLE api_user TYPE option<int>;
DEFINE FIELD storage_id ON TABLE api_user TYPE option<int>;
DEFINE FIELD custom_params ON TABLE api_user TYPE option<string>;
DEFINE FIELD created_at ON TABLE api_user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE api_user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_api_user_login ON TABLE api_user COLUMNS login UNIQUE;

-- =======================================================================
-- Customer portal — sessions and users
-- =======================================================================
DEFINE TABLE portal_session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE portal_session TYPE string;
DEFINE FIELD created_at ON TABLE portal_session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD changed_at ON TABLE portal_session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD ip ON TABLE portal_session TYPE option<string>;
DEFINE FIELD last_method ON TABLE portal_session TYPE option<string>;
DEFINE FIELD language ON TABLE portal_session TYPE option<string>;
DEFINE FIELD params ON TABLE portal_session TYPE option<string>;

DEFINE TABLE portal_user SCHEMAFULL;
DEFINE FIELD login ON TABLE portal_user TYPE string;
DEFINE FIELD password_hash ON TABLE portal_user TYPE string;
DEFINE FIELD status ON TABLE portal_user TYPE string \
    ASSERT $value IN ['Active', 'Inactive'];
DEFINE FIELD permission_type ON TABLE portal_user TYPE string \
    ASSERT $value IN ['Staff', 'Portal', 'Integration'];
DEFINE FIELD crm_id ON TABLE portal_user TYPE option<int>;
DEFINE FIELD storage_id ON TABLE portal_user TYPE option<int>;
DEFINE FIELD custom_params ON TABLE portal_user TYPE option<string>;
DEFINE FIELD created_at ON TABLE portal_user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE portal_user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_portal_user_login ON TABLE portal_user \
    COLUMNS login UNIQUE;

-- =======================================================================
-- Consent management — sessions and users
-- =======================================================================
DEFINE TABLE consents_session SCHEMAFULL;
DEFINE FIELD user_id ON TABLE consents_session TYPE string;
DEFINE FIELD created_at ON TABLE consents_session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD changed_at ON TABLE consents_session TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD ip ON TABLE consents_session TYPE option<string>;
DEFINE FIELD last_method ON TABLE consents_session TYPE option<string>;
DEFINE FIELD language ON TABLE consents_session TYPE option<string>;
DEFINE FIELD params ON TABLE consents_session TYPE option<string>;

DEFINE TABLE consents_user SCHEMAFULL;
DEFINE FIELD login ON TABLE consents_user TYPE string;
DEFINE FIELD password_hash ON TABLE consents_user TYPE string;
DEFINE FIELD status ON TABLE consents_user TYPE string \
    ASSERT $value IN ['Active', 'Inactive'];
DEFINE FIELD permission_type ON TABLE consents_user TYPE string \
    ASSERT $value IN ['Staff', 'Portal', 'Integration'];
DEFINE FIELD crm_id ON TABLE consents_user TYPE option<int>;
DEFINE FIELD storage_id ON TABLE consents_user TYPE option<int>;
DEFINE FIELD custom_params ON TABLE consents_user TYPE option<string>;
DEFINE FIELD created_at ON TABLE consents_user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE consents_user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_consents_user_login ON TABLE consents_user \
    COLUMNS login UNIQUE;

-- =======================================================================
-- Record collector configuration (record id = collector name)
-- =======================================================================
DEFINE TABLE collector_config SCHEMAFULL;
DEFINE FIELD enabled ON TABLE collector_config TYPE bool DEFAULT false;
DEFINE FIELD api_key ON TABLE collector_config TYPE option<string>;
DEFINE FIELD modules ON TABLE collector_config TYPE array<string> \
    DEFAULT [];
DEFINE FIELD parameters ON TABLE collector_config TYPE object FLEXIBLE \
    DEFAULT {};
DEFINE FIELD updated_at ON TABLE collector_config TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Synchronizer cursors (record id = cursor key)
-- =======================================================================
DEFINE TABLE sync_cursor SCHEMAFULL;
DEFINE FIELD last_id ON TABLE sync_cursor TYPE int;
DEFINE FIELD updated_at ON TABLE sync_cursor TYPE datetime \
    DEFAULT time::now();

-- =======================================================================
-- Synchronized contacts
-- =======================================================================
DEFINE TABLE contact SCHEMAFULL;
DEFINE FIELD wapro_id ON TABLE contact TYPE int;
DEFINE FIELD parent_id ON TABLE contact TYPE option<int>;
DEFINE FIELD first_name ON TABLE contact TYPE option<string>;
DEFINE FIELD last_name ON TABLE contact TYPE string;
DEFINE FIELD job_title ON TABLE contact TYPE option<string>;
DEFINE FIELD phone ON TABLE contact TYPE option<string>;
DEFINE FIELD mobile ON TABLE contact TYPE option<string>;
DEFINE FIELD email ON TABLE contact TYPE option<string>;
DEFINE FIELD secondary_email ON TABLE contact TYPE option<string>;
DEFINE FIELD description ON TABLE contact TYPE option<string>;
DEFINE FIELD created_at ON TABLE contact TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE contact TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_contact_wapro_id ON TABLE contact \
    COLUMNS wapro_id UNIQUE;
";

// -----------------------------------------------------------------------
// Migration runner
// -----------------------------------------------------------------------

/// Apply all pending migrations.
///
/// Safe to run repeatedly — applied versions are tracked in the
/// `_migration` table and skipped.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("migration table DDL: {e}")))?;

    let mut applied = db
        .query("SELECT version, name FROM _migration ORDER BY version ASC")
        .await?;
    let applied: Vec<MigrationRecord> = applied.take(0)?;
    let latest = applied.iter().map(|m| m.version).max().unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version <= latest {
            continue;
        }
        info!(
            version = migration.version,
            name = migration.name,
            "Applying schema migration"
        );
        db.query(migration.sql)
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("{}: {e}", migration.name)))?;
        db.query("CREATE _migration SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name.to_string()))
            .await?
            .check()
            .map_err(|e| DbError::Migration(format!("recording {}: {e}", migration.name)))?;
    }

    Ok(())
}
