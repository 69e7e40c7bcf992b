//! Webservice user domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

/// Coarse role classification driving which authorization rule-set
/// applies to the account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermissionType {
    /// Internal staff account — full rule-set.
    Staff,
    /// External portal account bound to a CRM record.
    Portal,
    /// Machine-to-machine integration account.
    Integration,
}

impl PermissionType {
    /// Wire/storage code for the role.
    pub fn code(&self) -> i32 {
        match self {
            PermissionType::Staff => 1,
            PermissionType::Portal => 2,
            PermissionType::Integration => 3,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(PermissionType::Staff),
            2 => Some(PermissionType::Portal),
            3 => Some(PermissionType::Integration),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub password_hash: String,
    pub status: UserStatus,
    pub permission_type: PermissionType,
    /// Linked business-record id (set for portal users).
    pub crm_id: Option<i64>,
    pub storage_id: Option<i64>,
    /// Raw JSON text; may embed a preferred `language`.
    pub custom_params: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub login: String,
    /// Raw password (hashed with Argon2id before storage).
    pub password: String,
    pub permission_type: PermissionType,
    pub crm_id: Option<i64>,
    pub storage_id: Option<i64>,
    pub custom_params: Option<serde_json::Value>,
}
