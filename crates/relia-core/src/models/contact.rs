//! CRM contact projection targeted by the ERP synchronizer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    /// Source-side key in the WAPRO `KONTAKT` table.
    pub wapro_id: i64,
    /// Owning account's source-side key, when the contact is linked.
    pub parent_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: String,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub secondary_email: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field set written on create and update — the synchronizer always
/// writes the full mapped row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactUpsert {
    pub wapro_id: i64,
    pub parent_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: String,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub secondary_email: Option<String>,
    pub description: Option<String>,
}
