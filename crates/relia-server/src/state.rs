//! Shared application state.

use std::sync::Arc;

use relia_auth::{AuthService, Authenticator, ModuleGate};
use relia_core::models::context::AppContext;
use relia_db::store::{SurrealSessionStore, SurrealUserStore};
use surrealdb::engine::remote::ws::Client;

#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator<SurrealSessionStore<Client>>>,
    pub sessions: Arc<AuthService<SurrealSessionStore<Client>, SurrealUserStore<Client>>>,
    pub users: SurrealUserStore<Client>,
    pub gate: Arc<ModuleGate>,
    pub app: AppContext,
}
