//! Integration tests for the session and user store implementations
//! using in-memory SurrealDB.

use chrono::{Duration, Utc};
use relia_core::models::context::ApiVariant;
use relia_core::models::session::{CreateSession, SessionTouch};
use relia_core::models::user::{CreateUser, PermissionType, User, UserStatus};
use relia_core::store::{SessionStore, UserStore};
use relia_db::store::{SurrealSessionStore, SurrealUserStore};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

type Db = surrealdb::engine::local::Db;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    relia_db::run_migrations(&db).await.unwrap();
    db
}

async fn create_user(db: &Surreal<Db>, variant: ApiVariant, login: &str) -> User {
    SurrealUserStore::new(db.clone())
        .create(
            variant,
            CreateUser {
                login: login.into(),
                password: "correct-horse-battery".into(),
                permission_type: PermissionType::Staff,
                crm_id: Some(99),
                storage_id: Some(4),
                custom_params: None,
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn create_and_find_active_session() {
    let db = setup().await;
    let user = create_user(&db, ApiVariant::Standard, "alice").await;
    let store = SurrealSessionStore::new(db.clone());

    store
        .create(
            ApiVariant::Standard,
            CreateSession {
                id: "tok-1".into(),
                user_id: user.id,
                ip: Some("192.0.2.1".into()),
                language: Some("en-GB".into()),
                params: Some(r#"{"device":"cli"}"#.into()),
            },
        )
        .await
        .unwrap();

    let row = store
        .find_active(ApiVariant::Standard, "tok-1")
        .await
        .unwrap()
        .expect("session should be found");

    assert_eq!(row.session_id, "tok-1");
    assert_eq!(row.user_id, user.id);
    assert_eq!(row.language.as_deref(), Some("en-GB"));
    assert_eq!(row.session_params.as_deref(), Some(r#"{"device":"cli"}"#));
    assert_eq!(row.permission_type, PermissionType::Staff);
    assert_eq!(row.crm_id, Some(99));
    assert_eq!(row.storage_id, Some(4));
    // A fresh session starts with changed_at == created_at.
    assert_eq!(row.created_at, row.changed_at);
}

#[tokio::test]
async fn unknown_token_finds_nothing() {
    let db = setup().await;
    let store = SurrealSessionStore::new(db);

    let row = store
        .find_active(ApiVariant::Standard, "missing")
        .await
        .unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn inactive_owner_hides_the_session() {
    let db = setup().await;
    let user = create_user(&db, ApiVariant::Standard, "alice").await;
    let store = SurrealSessionStore::new(db.clone());

    store
        .create(
            ApiVariant::Standard,
            CreateSession {
                id: "tok-1".into(),
                user_id: user.id,
                ip: None,
                language: None,
                params: None,
            },
        )
        .await
        .unwrap();

    db.query("UPDATE type::record('api_user', $id) SET status = 'Inactive'")
        .bind(("id", user.id.to_string()))
        .await
        .unwrap()
        .check()
        .unwrap();

    let row = store
        .find_active(ApiVariant::Standard, "tok-1")
        .await
        .unwrap();
    assert!(row.is_none());
}

#[tokio::test]
async fn touch_overwrites_the_liveness_fields() {
    let db = setup().await;
    let user = create_user(&db, ApiVariant::Standard, "alice").await;
    let store = SurrealSessionStore::new(db.clone());

    store
        .create(
            ApiVariant::Standard,
            CreateSession {
                id: "tok-1".into(),
                user_id: user.id,
                ip: Some("192.0.2.1".into()),
                language: None,
                params: None,
            },
        )
        .await
        .unwrap();

    let later = Utc::now() + Duration::minutes(3);
    store
        .touch(
            ApiVariant::Standard,
            "tok-1",
            SessionTouch {
                changed_at: later,
                ip: Some("198.51.100.2".into()),
                last_method: "/webservice/modules/Accounts/access".into(),
            },
        )
        .await
        .unwrap();

    let row = store
        .find_active(ApiVariant::Standard, "tok-1")
        .await
        .unwrap()
        .unwrap();
    assert!((row.changed_at - later).num_milliseconds().abs() <= 1);
    assert!(row.changed_at > row.created_at);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let db = setup().await;
    let user = create_user(&db, ApiVariant::Standard, "alice").await;
    let store = SurrealSessionStore::new(db.clone());

    store
        .create(
            ApiVariant::Standard,
            CreateSession {
                id: "tok-1".into(),
                user_id: user.id,
                ip: None,
                language: None,
                params: None,
            },
        )
        .await
        .unwrap();

    store.delete(ApiVariant::Standard, "tok-1").await.unwrap();
    assert!(
        store
            .find_active(ApiVariant::Standard, "tok-1")
            .await
            .unwrap()
            .is_none()
    );

    // Deleting again (or deleting a token that never existed) is fine.
    store.delete(ApiVariant::Standard, "tok-1").await.unwrap();
    store.delete(ApiVariant::Standard, "ghost").await.unwrap();
}

#[tokio::test]
async fn each_variant_keeps_its_own_tables() {
    let db = setup().await;
    let user = create_user(&db, ApiVariant::Portal, "bob").await;
    let store = SurrealSessionStore::new(db.clone());

    store
        .create(
            ApiVariant::Portal,
            CreateSession {
                id: "tok-p".into(),
                user_id: user.id,
                ip: None,
                language: None,
                params: None,
            },
        )
        .await
        .unwrap();

    assert!(
        store
            .find_active(ApiVariant::Portal, "tok-p")
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        store
            .find_active(ApiVariant::Standard, "tok-p")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn find_by_login_returns_only_active_users() {
    let db = setup().await;
    let user = create_user(&db, ApiVariant::Standard, "alice").await;
    let users = SurrealUserStore::new(db.clone());

    let found = users
        .find_by_login(ApiVariant::Standard, "alice")
        .await
        .unwrap()
        .expect("active user should be found");
    assert_eq!(found.id, user.id);
    assert_eq!(found.status, UserStatus::Active);
    // The stored hash is an Argon2id PHC string, never the raw password.
    assert!(found.password_hash.starts_with("$argon2id$"));

    db.query("UPDATE type::record('api_user', $id) SET status = 'Inactive'")
        .bind(("id", user.id.to_string()))
        .await
        .unwrap()
        .check()
        .unwrap();

    assert!(
        users
            .find_by_login(ApiVariant::Standard, "alice")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn get_by_id_round_trips_custom_params() {
    let db = setup().await;
    let users = SurrealUserStore::new(db.clone());

    let created = users
        .create(
            ApiVariant::Standard,
            CreateUser {
                login: "carol".into(),
                password: "correct-horse-battery".into(),
                permission_type: PermissionType::Integration,
                crm_id: None,
                storage_id: None,
                custom_params: Some(serde_json::json!({ "language": "fr-FR" })),
            },
        )
        .await
        .unwrap();

    let fetched = users
        .get_by_id(ApiVariant::Standard, created.id)
        .await
        .unwrap();
    assert_eq!(fetched.login, "carol");
    assert_eq!(fetched.permission_type, PermissionType::Integration);
    let raw = fetched.custom_params.expect("params should be stored");
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["language"], "fr-FR");
}
