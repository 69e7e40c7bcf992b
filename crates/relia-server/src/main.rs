//! Relia Webservice — application entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use relia_auth::{AuthConfig, AuthService, Authenticator, ModuleGate};
use relia_db::store::{SurrealSessionStore, SurrealUserStore};
use relia_db::{DbConfig, DbManager};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("relia=info".parse().unwrap()))
        .json()
        .init();

    let config = ServerConfig::from_env().expect("invalid server configuration");
    let db_config = DbConfig::from_env();

    let db = DbManager::connect(&db_config)
        .await
        .expect("database connection failed");
    relia_db::run_migrations(db.client())
        .await
        .expect("schema migration failed");

    let mut auth_config = AuthConfig::new(config.max_session_age_mins, config.max_idle_age_mins)
        .expect("invalid session expiry configuration");
    auth_config.default_language = config.default_language.clone();
    auth_config.pepper = config.pepper.clone();

    let sessions = SurrealSessionStore::new(db.client().clone());
    let users = match &config.pepper {
        Some(pepper) => SurrealUserStore::with_pepper(db.client().clone(), pepper.clone()),
        None => SurrealUserStore::new(db.client().clone()),
    };

    let state = AppState {
        authenticator: Arc::new(Authenticator::new(sessions.clone(), auth_config.clone())),
        sessions: Arc::new(AuthService::new(sessions, users.clone(), auth_config)),
        users,
        gate: Arc::new(ModuleGate::new(config.portal_modules.clone())),
        app: config.app_context(),
    };

    let public_routes = Router::new().route("/login", post(routes::login));

    let protected_routes = Router::new()
        .route("/logout", post(routes::logout))
        .route("/me", get(routes::me))
        .route("/modules/{module}/access", get(routes::module_access))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    let router = Router::new().nest(
        "/webservice",
        Router::new().merge(public_routes).merge(protected_routes),
    );

    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    let app = router.with_state(state);

    let addr = SocketAddr::new(
        config.host.parse().expect("invalid RELIA_HOST"),
        config.port,
    );
    tracing::info!(
        variant = config.variant.as_str(),
        app_id = config.app_id,
        "Webservice listening on {addr}"
    );
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("failed to bind"),
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server terminated");
}
