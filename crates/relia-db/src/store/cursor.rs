//! SurrealDB implementation of [`CursorStore`].

use relia_core::error::ReliaResult;
use relia_core::store::CursorStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CursorRow {
    last_id: i64,
}

/// SurrealDB implementation of the synchronizer checkpoint store.
#[derive(Clone)]
pub struct SurrealCursorStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCursorStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CursorStore for SurrealCursorStore<C> {
    async fn get(&self, key: &str) -> ReliaResult<Option<i64>> {
        let mut result = self
            .db
            .query("SELECT last_id FROM type::record('sync_cursor', $key)")
            .bind(("key", key.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CursorRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row.last_id))
    }

    async fn set(&self, key: &str, value: i64) -> ReliaResult<()> {
        self.db
            .query(
                "UPSERT type::record('sync_cursor', $key) SET \
                 last_id = $last_id, updated_at = time::now()",
            )
            .bind(("key", key.to_string()))
            .bind(("last_id", value))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self, key: &str) -> ReliaResult<()> {
        // Clearing an absent cursor is a no-op.
        self.db
            .query("DELETE type::record('sync_cursor', $key)")
            .bind(("key", key.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
