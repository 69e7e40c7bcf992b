//! Authentication configuration.

use chrono::Duration;
use relia_core::error::{ReliaError, ReliaResult};

/// Configuration for session authentication.
///
/// Both expiry windows are required and must be positive; construction
/// rejects anything else so a misconfigured window can never reach the
/// expiry arithmetic.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Absolute session lifetime in minutes, counted from creation.
    pub max_session_age_mins: i64,
    /// Idle lifetime in minutes, counted from the last touch.
    pub max_idle_age_mins: i64,
    /// Language used when every resolution source is empty.
    pub default_language: String,
    /// Optional pepper prepended to passwords before Argon2id
    /// verification.
    pub pepper: Option<String>,
}

impl AuthConfig {
    pub fn new(max_session_age_mins: i64, max_idle_age_mins: i64) -> ReliaResult<Self> {
        if max_session_age_mins <= 0 {
            return Err(ReliaError::Validation {
                message: format!("max_session_age_mins must be > 0, got {max_session_age_mins}"),
            });
        }
        if max_idle_age_mins <= 0 {
            return Err(ReliaError::Validation {
                message: format!("max_idle_age_mins must be > 0, got {max_idle_age_mins}"),
            });
        }
        Ok(Self {
            max_session_age_mins,
            max_idle_age_mins,
            default_language: "en-US".into(),
            pepper: None,
        })
    }

    /// Absolute lifetime window.
    pub fn session_age(&self) -> Duration {
        Duration::minutes(self.max_session_age_mins)
    }

    /// Idle lifetime window.
    pub fn idle_age(&self) -> Duration {
        Duration::minutes(self.max_idle_age_mins)
    }
}
