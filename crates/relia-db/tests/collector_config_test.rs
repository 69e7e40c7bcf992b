//! Integration tests for the collector configuration store.

use relia_core::models::collector::{CollectorKind, CollectorSettings};
use relia_core::store::CollectorConfigStore;
use relia_db::store::SurrealCollectorStore;
use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type Db = surrealdb::engine::local::Db;

async fn setup() -> SurrealCollectorStore<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    relia_db::run_migrations(&db).await.unwrap();
    SurrealCollectorStore::new(db)
}

fn settings(kind: CollectorKind) -> CollectorSettings {
    CollectorSettings {
        kind,
        enabled: None,
        api_key: None,
        modules: None,
        parameters: None,
    }
}

#[tokio::test]
async fn unconfigured_collector_loads_as_disabled_defaults() {
    let store = setup().await;

    let config = store.load(CollectorKind::Vies).await.unwrap();
    assert_eq!(config.kind, CollectorKind::Vies);
    assert!(!config.enabled);
    assert!(config.api_key.is_none());
    assert!(config.modules.is_empty());
    assert!(config.parameters.is_empty());
}

#[tokio::test]
async fn validated_settings_round_trip() {
    let store = setup().await;

    let mut input = settings(CollectorKind::DkCvr);
    input.enabled = Some(true);
    input.api_key = Some("cvr-key".into());
    input.modules = Some(vec!["Accounts".into(), "Contacts".into()]);
    store.save(input.validate().unwrap()).await.unwrap();

    let config = store.load(CollectorKind::DkCvr).await.unwrap();
    assert!(config.enabled);
    assert_eq!(config.api_key.as_deref(), Some("cvr-key"));
    assert_eq!(config.modules, vec!["Accounts", "Contacts"]);
}

#[tokio::test]
async fn partial_update_preserves_unnamed_fields() {
    let store = setup().await;

    let mut input = settings(CollectorKind::Vies);
    input.enabled = Some(true);
    input.modules = Some(vec!["Accounts".into()]);
    store.save(input.validate().unwrap()).await.unwrap();

    // A later update that only flips the flag must not clear modules.
    let mut flip = settings(CollectorKind::Vies);
    flip.enabled = Some(false);
    store.save(flip.validate().unwrap()).await.unwrap();

    let config = store.load(CollectorKind::Vies).await.unwrap();
    assert!(!config.enabled);
    assert_eq!(config.modules, vec!["Accounts"]);
}

#[tokio::test]
async fn parameter_keys_merge_instead_of_replacing() {
    let store = setup().await;

    let mut first = settings(CollectorKind::PlVatStatus);
    let mut params = serde_json::Map::new();
    params.insert("endpoint".into(), json!("https://wl-api.example"));
    first.parameters = Some(params);
    store.save(first.validate().unwrap()).await.unwrap();

    let mut second = settings(CollectorKind::PlVatStatus);
    let mut params = serde_json::Map::new();
    params.insert("timeout_secs".into(), json!(30));
    second.parameters = Some(params);
    store.save(second.validate().unwrap()).await.unwrap();

    let config = store.load(CollectorKind::PlVatStatus).await.unwrap();
    assert_eq!(config.parameters["endpoint"], json!("https://wl-api.example"));
    assert_eq!(config.parameters["timeout_secs"], json!(30));
}

#[tokio::test]
async fn collectors_are_stored_independently() {
    let store = setup().await;

    let mut vies = settings(CollectorKind::Vies);
    vies.enabled = Some(true);
    store.save(vies.validate().unwrap()).await.unwrap();

    let zefix = store.load(CollectorKind::ChZefix).await.unwrap();
    assert!(!zefix.enabled);
}
