//! Login and logout orchestration.

use relia_core::models::context::ApiVariant;
use relia_core::models::session::CreateSession;
use relia_core::store::{SessionStore, UserStore};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::authenticator::decode_custom_params;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::language::resolve_language;
use crate::password;
use crate::token;

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub login: String,
    pub password: String,
    pub ip: Option<String>,
    /// Raw `Accept-Language` header, if the client sent one.
    pub accept_language: Option<String>,
    /// `custom_params` from the login payload.
    pub custom_params: Option<Map<String, Value>>,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Opaque session token (also the session's primary key).
    pub token: String,
    pub user_id: Uuid,
    /// Language resolved for this session and stored on it.
    pub language: String,
}

/// Session lifecycle service.
///
/// Generic over store implementations so this crate has no dependency
/// on the database crate.
pub struct AuthService<S: SessionStore, U: UserStore> {
    sessions: S,
    users: U,
    config: AuthConfig,
}

impl<S: SessionStore, U: UserStore> AuthService<S, U> {
    pub fn new(sessions: S, users: U, config: AuthConfig) -> Self {
        Self {
            sessions,
            users,
            config,
        }
    }

    /// Authenticate a user with login + password and open a session.
    ///
    /// An unknown login, an inactive account, and a wrong password are
    /// indistinguishable to the caller.
    pub async fn login(
        &self,
        variant: ApiVariant,
        input: LoginInput,
    ) -> Result<LoginOutput, AuthError> {
        let user = self
            .users
            .find_by_login(variant, &input.login)
            .await
            .map_err(AuthError::store)?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user_params = decode_custom_params(user.custom_params.as_deref())?;
        let language = resolve_language(
            None,
            &user_params,
            input.custom_params.as_ref(),
            input.accept_language.as_deref(),
            &self.config.default_language,
        );

        let token = token::generate_session_token();
        self.sessions
            .create(
                variant,
                CreateSession {
                    id: token.clone(),
                    user_id: user.id,
                    ip: input.ip,
                    language: Some(language.clone()),
                    params: None,
                },
            )
            .await
            .map_err(AuthError::store)?;

        info!(user_id = %user.id, variant = variant.as_str(), "session opened");

        Ok(LoginOutput {
            token,
            user_id: user.id,
            language,
        })
    }

    /// Close a session. Deleting an already-absent token succeeds.
    pub async fn logout(&self, variant: ApiVariant, token: &str) -> Result<(), AuthError> {
        self.sessions
            .delete(variant, token)
            .await
            .map_err(AuthError::store)
    }
}
