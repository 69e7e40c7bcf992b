//! Session domain model.
//!
//! A session's `id` is the opaque token presented by the client on every
//! API call — there is no separate token column. `params` and the user's
//! `custom_params` are stored as raw JSON text and only decoded where a
//! component actually needs them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::PermissionType;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSession {
    pub id: String,
    pub user_id: Uuid,
    pub ip: Option<String>,
    pub language: Option<String>,
    pub params: Option<String>,
}

/// Touch fields written on every successful authentication.
///
/// Each touch overwrites the previous `ip`/`last_method` — this is a
/// liveness heartbeat, not an audit log.
#[derive(Debug, Clone)]
pub struct SessionTouch {
    pub changed_at: DateTime<Utc>,
    pub ip: Option<String>,
    pub last_method: String,
}

/// One row of the session ⋈ user lookup used by authentication.
///
/// `custom_params` is carried raw; the authenticator owns the decode and
/// its failure mode.
#[derive(Debug, Clone)]
pub struct SessionUserRow {
    pub session_id: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub changed_at: DateTime<Utc>,
    pub language: Option<String>,
    pub session_params: Option<String>,
    pub permission_type: PermissionType,
    pub crm_id: Option<i64>,
    pub storage_id: Option<i64>,
    pub custom_params: Option<String>,
}
