//! Server configuration.
//!
//! The served app variant and id are fixed here at startup — one
//! server process fronts exactly one webservice family.

use relia_core::error::{ReliaError, ReliaResult};
use relia_core::models::context::{ApiVariant, AppContext};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Webservice family this process serves.
    pub variant: ApiVariant,
    /// Registered app id bound into every permission context.
    pub app_id: i32,
    /// Absolute session lifetime in minutes.
    pub max_session_age_mins: i64,
    /// Idle session lifetime in minutes.
    pub max_idle_age_mins: i64,
    pub default_language: String,
    /// Optional server-side password pepper.
    pub pepper: Option<String>,
    /// Modules portal principals may reach.
    pub portal_modules: Vec<String>,
}

impl ServerConfig {
    /// Build the configuration from `RELIA_*` environment variables.
    pub fn from_env() -> ReliaResult<Self> {
        let variant_raw = env_or("RELIA_API_VARIANT", "Standard");
        let variant = ApiVariant::parse(&variant_raw).ok_or_else(|| ReliaError::Validation {
            message: format!("unknown API variant: {variant_raw}"),
        })?;

        Ok(Self {
            host: env_or("RELIA_HOST", "127.0.0.1"),
            port: parse_env("RELIA_PORT", 8090)?,
            variant,
            app_id: parse_env("RELIA_APP_ID", 1)?,
            max_session_age_mins: parse_env("RELIA_SESSION_AGE_MINS", 480)?,
            max_idle_age_mins: parse_env("RELIA_SESSION_IDLE_MINS", 20)?,
            default_language: env_or("RELIA_DEFAULT_LANGUAGE", "en-US"),
            pepper: std::env::var("RELIA_PASSWORD_PEPPER").ok(),
            portal_modules: env_or("RELIA_PORTAL_MODULES", "Accounts,Contacts,HelpDesk,Faq")
                .split(',')
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .collect(),
        })
    }

    pub fn app_context(&self) -> AppContext {
        AppContext {
            variant: self.variant,
            id: self.app_id,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> ReliaResult<T> {
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|_| ReliaError::Validation {
            message: format!("invalid value for {key}: {raw}"),
        }),
        Err(_) => Ok(default),
    }
}
