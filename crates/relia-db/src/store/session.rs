//! SurrealDB implementation of [`SessionStore`].
//!
//! Session record ids are the opaque tokens themselves, so every
//! operation addresses exactly one record. The active-user restriction
//! of `find_active` is enforced here: a session whose owner is missing
//! or inactive is reported as no match at all.

use chrono::{DateTime, Utc};
use relia_core::error::ReliaResult;
use relia_core::models::context::ApiVariant;
use relia_core::models::session::{CreateSession, SessionTouch, SessionUserRow};
use relia_core::store::SessionStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;
use crate::store::user::parse_permission_type;

#[derive(Debug, SurrealValue)]
struct SessionRow {
    user_id: String,
    created_at: DateTime<Utc>,
    changed_at: DateTime<Utc>,
    language: Option<String>,
    params: Option<String>,
}

/// User columns needed to bind a principal.
#[derive(Debug, SurrealValue)]
struct OwnerRow {
    permission_type: String,
    crm_id: Option<i64>,
    storage_id: Option<i64>,
    custom_params: Option<String>,
}

/// SurrealDB implementation of the session store.
#[derive(Clone)]
pub struct SurrealSessionStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealSessionStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SessionStore for SurrealSessionStore<C> {
    async fn find_active(
        &self,
        variant: ApiVariant,
        token: &str,
    ) -> ReliaResult<Option<SessionUserRow>> {
        let tables = variant.tables();

        let mut result = self
            .db
            .query(
                "SELECT user_id, created_at, changed_at, language, params \
                 FROM type::record($tb, $tok)",
            )
            .bind(("tb", tables.session.to_string()))
            .bind(("tok", token.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SessionRow> = result.take(0).map_err(DbError::from)?;
        let session = match rows.into_iter().next() {
            Some(row) => row,
            None => return Ok(None),
        };

        let user_id = Uuid::parse_str(&session.user_id)
            .map_err(|e| DbError::Migration(format!("invalid user UUID: {e}")))?;

        let mut result = self
            .db
            .query(
                "SELECT permission_type, crm_id, storage_id, custom_params \
                 FROM type::record($tb, $id) \
                 WHERE status = 'Active'",
            )
            .bind(("tb", tables.user.to_string()))
            .bind(("id", session.user_id))
            .await
            .map_err(DbError::from)?;

        let owners: Vec<OwnerRow> = result.take(0).map_err(DbError::from)?;
        let owner = match owners.into_iter().next() {
            Some(row) => row,
            None => return Ok(None),
        };

        Ok(Some(SessionUserRow {
            session_id: token.to_string(),
            user_id,
            created_at: session.created_at,
            changed_at: session.changed_at,
            language: session.language,
            session_params: session.params,
            permission_type: parse_permission_type(&owner.permission_type)?,
            crm_id: owner.crm_id,
            storage_id: owner.storage_id,
            custom_params: owner.custom_params,
        }))
    }

    async fn create(&self, variant: ApiVariant, input: CreateSession) -> ReliaResult<()> {
        let tables = variant.tables();

        self.db
            .query(
                "CREATE type::record($tb, $tok) SET \
                 user_id = $user_id, \
                 ip = $ip, \
                 language = $language, \
                 params = $params",
            )
            .bind(("tb", tables.session.to_string()))
            .bind(("tok", input.id))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("ip", input.ip))
            .bind(("language", input.language))
            .bind(("params", input.params))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        Ok(())
    }

    async fn touch(
        &self,
        variant: ApiVariant,
        token: &str,
        fields: SessionTouch,
    ) -> ReliaResult<()> {
        let tables = variant.tables();

        self.db
            .query(
                "UPDATE type::record($tb, $tok) SET \
                 changed_at = $changed_at, \
                 ip = $ip, \
                 last_method = $last_method",
            )
            .bind(("tb", tables.session.to_string()))
            .bind(("tok", token.to_string()))
            .bind(("changed_at", fields.changed_at))
            .bind(("ip", fields.ip))
            .bind(("last_method", fields.last_method))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn delete(&self, variant: ApiVariant, token: &str) -> ReliaResult<()> {
        let tables = variant.tables();

        // DELETE on an absent record id is a no-op in SurrealDB, which
        // is exactly the idempotency the callers rely on.
        self.db
            .query("DELETE type::record($tb, $tok)")
            .bind(("tb", tables.session.to_string()))
            .bind(("tok", token.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
