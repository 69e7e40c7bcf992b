//! SurrealDB implementation of [`CollectorConfigStore`].
//!
//! One record per collector, keyed by the collector name. `save`
//! applies a validated update command on top of the stored state, so
//! partial updates never clear fields they did not name.

use relia_core::error::ReliaResult;
use relia_core::models::collector::{CollectorConfig, CollectorConfigUpdate, CollectorKind};
use relia_core::store::CollectorConfigStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct CollectorRow {
    enabled: bool,
    api_key: Option<String>,
    modules: Vec<String>,
    parameters: serde_json::Value,
}

impl CollectorRow {
    fn into_config(self, kind: CollectorKind) -> CollectorConfig {
        CollectorConfig {
            kind,
            enabled: self.enabled,
            api_key: self.api_key,
            modules: self.modules,
            parameters: self
                .parameters
                .as_object()
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// SurrealDB implementation of the collector configuration store.
#[derive(Clone)]
pub struct SurrealCollectorStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCollectorStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> CollectorConfigStore for SurrealCollectorStore<C> {
    async fn load(&self, kind: CollectorKind) -> ReliaResult<CollectorConfig> {
        let mut result = self
            .db
            .query(
                "SELECT enabled, api_key, modules, parameters \
                 FROM type::record('collector_config', $name)",
            )
            .bind(("name", kind.name().to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CollectorRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.into_config(kind))
            .unwrap_or_else(|| CollectorConfig::disabled(kind)))
    }

    async fn save(&self, update: CollectorConfigUpdate) -> ReliaResult<()> {
        // Apply the command to the current state, merging parameter
        // keys instead of replacing the whole object.
        let mut config = self.load(update.kind).await?;
        if let Some(enabled) = update.enabled {
            config.enabled = enabled;
        }
        if let Some(api_key) = update.api_key {
            config.api_key = Some(api_key);
        }
        if let Some(modules) = update.modules {
            config.modules = modules;
        }
        if let Some(parameters) = update.parameters {
            config.parameters.extend(parameters);
        }

        self.db
            .query(
                "UPSERT type::record('collector_config', $name) SET \
                 enabled = $enabled, \
                 api_key = $api_key, \
                 modules = $modules, \
                 parameters = $parameters, \
                 updated_at = time::now()",
            )
            .bind(("name", update.kind.name().to_string()))
            .bind(("enabled", config.enabled))
            .bind(("api_key", config.api_key))
            .bind(("modules", config.modules))
            .bind(("parameters", serde_json::Value::Object(config.parameters)))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        Ok(())
    }
}
