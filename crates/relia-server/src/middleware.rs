//! Authentication middleware.
//!
//! Authenticates the `x-token` header and inserts the resulting
//! [`PermissionContext`] as a request extension — the context lives and
//! dies with the request it was bound for.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use relia_auth::RequestMeta;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get("x-token")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let meta = RequestMeta {
        ip: Some(addr.ip().to_string()),
        path: request.uri().path().to_string(),
    };

    let ctx = state
        .authenticator
        .authenticate(token.as_deref(), &state.app, &meta)
        .await?;

    request.extensions_mut().insert(ctx);
    Ok(next.run(request).await)
}
