//! Session authenticator — token validation and privilege binding.
//!
//! Authenticates a bearer token against the session store, enforces the
//! two expiry windows, binds the request-scoped [`PermissionContext`],
//! and touches the session's liveness fields. Apart from the
//! delete-on-expiry and touch-on-success mutations, the outcome is a
//! pure function of `(token, now, store snapshot)`.

use chrono::{DateTime, Utc};
use relia_core::models::context::{AppContext, PermissionContext};
use relia_core::models::session::SessionTouch;
use relia_core::store::SessionStore;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Per-request caller metadata recorded on the session.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    /// Caller's remote address.
    pub ip: Option<String>,
    /// Request path of the call being authenticated.
    pub path: String,
}

pub struct Authenticator<S: SessionStore> {
    store: S,
    config: AuthConfig,
}

impl<S: SessionStore> Authenticator<S> {
    pub fn new(store: S, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Authenticate a request's token against the current wall clock.
    pub async fn authenticate(
        &self,
        token: Option<&str>,
        app: &AppContext,
        peer: &RequestMeta,
    ) -> Result<PermissionContext, AuthError> {
        self.authenticate_at(token, app, peer, Utc::now()).await
    }

    /// Deterministic authentication against an explicit `now`.
    pub async fn authenticate_at(
        &self,
        token: Option<&str>,
        app: &AppContext,
        peer: &RequestMeta,
        now: DateTime<Utc>,
    ) -> Result<PermissionContext, AuthError> {
        // 1. Token presence — reject before any store access.
        let token = match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => t,
            None => return Err(AuthError::MissingToken),
        };

        // 2. Lookup, joined to an active user. Zero rows covers both
        //    "no such token" and "user disabled" — indistinguishable to
        //    the caller.
        let row = self
            .store
            .find_active(app.variant, token)
            .await
            .map_err(AuthError::store)?;
        let row = match row {
            Some(row) => row,
            None => {
                debug!(variant = app.variant.as_str(), "unknown or inactive token");
                return Err(AuthError::InvalidToken);
            }
        };

        // 3. Two independent expiry windows. A session found expired is
        //    deleted before the failure surfaces; the delete is
        //    idempotent, so a concurrent request racing on the same
        //    token cannot fail here.
        let absolute_deadline = row.created_at + self.config.session_age();
        let idle_deadline = row.changed_at + self.config.idle_age();
        if now > absolute_deadline || now > idle_deadline {
            self.store
                .delete(app.variant, token)
                .await
                .map_err(AuthError::store)?;
            debug!(
                user_id = %row.user_id,
                variant = app.variant.as_str(),
                "expired session removed"
            );
            return Err(AuthError::TokenExpired);
        }

        // 4. Bind the principal. Malformed stored params are fatal for
        //    the request, never silently dropped, and do not delete the
        //    session.
        decode_custom_params(row.custom_params.as_deref())?;
        let ctx = PermissionContext {
            user_id: row.user_id,
            permission_type: row.permission_type,
            crm_id: row.crm_id,
            app_id: app.id,
            interpreter: app.variant.interpreter(),
        };

        // 5. Liveness heartbeat on every successful call.
        self.store
            .touch(
                app.variant,
                token,
                SessionTouch {
                    changed_at: now,
                    ip: peer.ip.clone(),
                    last_method: peer.path.clone(),
                },
            )
            .await
            .map_err(AuthError::store)?;

        Ok(ctx)
    }
}

/// Decode a user's stored `custom_params`. Empty or absent text decodes
/// to an empty mapping; anything that is not a JSON object is an
/// internal error.
pub fn decode_custom_params(raw: Option<&str>) -> Result<Map<String, Value>, AuthError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Map::new()),
        Some(text) => serde_json::from_str::<Map<String, Value>>(text)
            .map_err(|e| AuthError::Internal(format!("malformed custom_params: {e}"))),
    }
}
