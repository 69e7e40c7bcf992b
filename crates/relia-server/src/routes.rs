//! HTTP handlers.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};
use relia_auth::{AuthError, LoginInput};
use relia_core::models::context::PermissionContext;
use relia_core::store::UserStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
    pub custom_params: Option<Map<String, Value>>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub language: String,
}

pub async fn login(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let accept_language = headers
        .get("accept-language")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let out = state
        .sessions
        .login(
            state.app.variant,
            LoginInput {
                login: body.login,
                password: body.password,
                ip: Some(addr.ip().to_string()),
                accept_language,
                custom_params: body.custom_params,
            },
        )
        .await?;

    Ok(Json(LoginResponse {
        token: out.token,
        user_id: out.user_id.to_string(),
        language: out.language,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    let token = headers
        .get("x-token")
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    state.sessions.logout(state.app.variant, token).await?;
    Ok(Json(json!({ "success": true })))
}

#[derive(Serialize)]
pub struct MeResponse {
    pub user_id: String,
    pub login: String,
    pub permission_type: i32,
    pub crm_id: Option<i64>,
    pub app_id: i32,
}

pub async fn me(
    State(state): State<AppState>,
    Extension(ctx): Extension<PermissionContext>,
) -> Result<Json<MeResponse>, ApiError> {
    let user = state.users.get_by_id(state.app.variant, ctx.user_id).await?;

    Ok(Json(MeResponse {
        user_id: ctx.user_id.to_string(),
        login: user.login,
        permission_type: ctx.permission_type.code(),
        crm_id: ctx.crm_id,
        app_id: ctx.app_id,
    }))
}

/// Module gate probe — answers whether the authenticated principal may
/// reach the named module.
pub async fn module_access(
    State(state): State<AppState>,
    Extension(ctx): Extension<PermissionContext>,
    Path(module): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.gate.check(&ctx, &module)?;
    Ok(Json(json!({ "module": module, "allowed": true })))
}
