//! Integration tests for the cursor and contact stores.

use relia_core::models::contact::ContactUpsert;
use relia_core::store::{ContactStore, CursorStore};
use relia_db::store::{SurrealContactStore, SurrealCursorStore};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type Db = surrealdb::engine::local::Db;

async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    relia_db::run_migrations(&db).await.unwrap();
    db
}

fn upsert(wapro_id: i64, last_name: &str) -> ContactUpsert {
    ContactUpsert {
        wapro_id,
        parent_id: None,
        first_name: Some("Jan".into()),
        last_name: last_name.into(),
        job_title: None,
        phone: Some("+48601602603".into()),
        mobile: None,
        email: Some("jan@example.com".into()),
        secondary_email: None,
        description: None,
    }
}

#[tokio::test]
async fn cursor_lifecycle() {
    let store = SurrealCursorStore::new(setup().await);

    assert_eq!(store.get("wapro_contacts_last_id").await.unwrap(), None);

    store.set("wapro_contacts_last_id", 150).await.unwrap();
    assert_eq!(
        store.get("wapro_contacts_last_id").await.unwrap(),
        Some(150)
    );

    // A later batch moves the checkpoint forward in place.
    store.set("wapro_contacts_last_id", 200).await.unwrap();
    assert_eq!(
        store.get("wapro_contacts_last_id").await.unwrap(),
        Some(200)
    );

    store.clear("wapro_contacts_last_id").await.unwrap();
    assert_eq!(store.get("wapro_contacts_last_id").await.unwrap(), None);

    // Clearing an absent cursor is a no-op.
    store.clear("wapro_contacts_last_id").await.unwrap();
}

#[tokio::test]
async fn cursors_are_keyed_independently() {
    let store = SurrealCursorStore::new(setup().await);

    store.set("wapro_contacts_last_id", 10).await.unwrap();
    assert_eq!(store.get("wapro_accounts_last_id").await.unwrap(), None);
}

#[tokio::test]
async fn contact_create_and_find_by_source_id() {
    let store = SurrealContactStore::new(setup().await);

    let created = store.create(upsert(77, "Kowalski")).await.unwrap();
    assert_eq!(created.wapro_id, 77);
    assert_eq!(created.last_name, "Kowalski");

    let found = store
        .find_by_wapro_id(77)
        .await
        .unwrap()
        .expect("contact should be found");
    assert_eq!(found.id, created.id);
    assert_eq!(found.email.as_deref(), Some("jan@example.com"));

    assert!(store.find_by_wapro_id(78).await.unwrap().is_none());
}

#[tokio::test]
async fn contact_update_overwrites_mapped_fields() {
    let store = SurrealContactStore::new(setup().await);

    let created = store.create(upsert(77, "Kowalski")).await.unwrap();

    let mut changed = upsert(77, "Kowalska");
    changed.phone = None;
    changed.job_title = Some("Dyrektor".into());
    let updated = store.update(created.id, changed).await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.last_name, "Kowalska");
    assert_eq!(updated.job_title.as_deref(), Some("Dyrektor"));
    assert!(updated.phone.is_none());
    assert!(updated.updated_at >= created.updated_at);
}
