//! Request-scoped permission context and the closed set of webservice
//! app variants.
//!
//! The variant fixes the session/user table pair and the authorization
//! interpreter once at startup. Nothing here is resolved per request by
//! string lookup.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::PermissionType;

/// Deployment family of a webservice app.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiVariant {
    /// Standard API for internal integrations.
    Standard,
    /// Customer portal API.
    Portal,
    /// Consent-management API.
    Consents,
}

/// Session/user table identifiers for one variant.
#[derive(Debug, Clone, Copy)]
pub struct TableSet {
    pub session: &'static str,
    pub user: &'static str,
}

impl ApiVariant {
    pub fn tables(&self) -> TableSet {
        match self {
            ApiVariant::Standard => TableSet {
                session: "api_session",
                user: "api_user",
            },
            ApiVariant::Portal => TableSet {
                session: "portal_session",
                user: "portal_user",
            },
            ApiVariant::Consents => TableSet {
                session: "consents_session",
                user: "consents_user",
            },
        }
    }

    /// The authorization rule-set family governing this variant.
    pub fn interpreter(&self) -> Interpreter {
        match self {
            ApiVariant::Standard => Interpreter::Standard,
            ApiVariant::Portal => Interpreter::Portal,
            ApiVariant::Consents => Interpreter::Consents,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVariant::Standard => "Standard",
            ApiVariant::Portal => "Portal",
            ApiVariant::Consents => "Consents",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Standard" => Some(ApiVariant::Standard),
            "Portal" => Some(ApiVariant::Portal),
            "Consents" => Some(ApiVariant::Consents),
            _ => None,
        }
    }
}

/// Family of authorization-rule implementations selected by app variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Interpreter {
    Standard,
    Portal,
    Consents,
}

/// Identity of the app a request arrived through.
#[derive(Debug, Clone, Copy)]
pub struct AppContext {
    pub variant: ApiVariant,
    pub id: i32,
}

/// Authenticated principal bound for the duration of one request.
///
/// Owned exclusively by the current request and discarded at its end —
/// never persisted, never process-global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionContext {
    pub user_id: Uuid,
    pub permission_type: PermissionType,
    pub crm_id: Option<i64>,
    pub app_id: i32,
    pub interpreter: Interpreter,
}
