//! SurrealDB implementation of [`ContactStore`].

use chrono::{DateTime, Utc};
use relia_core::error::ReliaResult;
use relia_core::models::contact::{Contact, ContactUpsert};
use relia_core::store::ContactStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct ContactRow {
    wapro_id: i64,
    parent_id: Option<i64>,
    first_name: Option<String>,
    last_name: String,
    job_title: Option<String>,
    phone: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
    secondary_email: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ContactRowWithId {
    record_id: String,
    wapro_id: i64,
    parent_id: Option<i64>,
    first_name: Option<String>,
    last_name: String,
    job_title: Option<String>,
    phone: Option<String>,
    mobile: Option<String>,
    email: Option<String>,
    secondary_email: Option<String>,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_contact(self, id: Uuid) -> Contact {
        Contact {
            id,
            wapro_id: self.wapro_id,
            parent_id: self.parent_id,
            first_name: self.first_name,
            last_name: self.last_name,
            job_title: self.job_title,
            phone: self.phone,
            mobile: self.mobile,
            email: self.email,
            secondary_email: self.secondary_email,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl ContactRowWithId {
    fn try_into_contact(self) -> Result<Contact, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(Contact {
            id,
            wapro_id: self.wapro_id,
            parent_id: self.parent_id,
            first_name: self.first_name,
            last_name: self.last_name,
            job_title: self.job_title,
            phone: self.phone,
            mobile: self.mobile,
            email: self.email,
            secondary_email: self.secondary_email,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the synchronized-contact store.
#[derive(Clone)]
pub struct SurrealContactStore<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealContactStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ContactStore for SurrealContactStore<C> {
    async fn find_by_wapro_id(&self, wapro_id: i64) -> ReliaResult<Option<Contact>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM contact \
                 WHERE wapro_id = $wapro_id",
            )
            .bind(("wapro_id", wapro_id))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ContactRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_contact()?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: ContactUpsert) -> ReliaResult<Contact> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('contact', $id) SET \
                 wapro_id = $wapro_id, \
                 parent_id = $parent_id, \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 job_title = $job_title, \
                 phone = $phone, \
                 mobile = $mobile, \
                 email = $email, \
                 secondary_email = $secondary_email, \
                 description = $description",
            )
            .bind(("id", id_str.clone()))
            .bind(("wapro_id", input.wapro_id))
            .bind(("parent_id", input.parent_id))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("job_title", input.job_title))
            .bind(("phone", input.phone))
            .bind(("mobile", input.mobile))
            .bind(("email", input.email))
            .bind(("secondary_email", input.secondary_email))
            .bind(("description", input.description))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<ContactRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "contact".into(),
            id: id_str,
        })?;

        Ok(row.into_contact(id))
    }

    async fn update(&self, id: Uuid, input: ContactUpsert) -> ReliaResult<Contact> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('contact', $id) SET \
                 wapro_id = $wapro_id, \
                 parent_id = $parent_id, \
                 first_name = $first_name, \
                 last_name = $last_name, \
                 job_title = $job_title, \
                 phone = $phone, \
                 mobile = $mobile, \
                 email = $email, \
                 secondary_email = $secondary_email, \
                 description = $description, \
                 updated_at = time::now()",
            )
            .bind(("id", id_str.clone()))
            .bind(("wapro_id", input.wapro_id))
            .bind(("parent_id", input.parent_id))
            .bind(("first_name", input.first_name))
            .bind(("last_name", input.last_name))
            .bind(("job_title", input.job_title))
            .bind(("phone", input.phone))
            .bind(("mobile", input.mobile))
            .bind(("email", input.email))
            .bind(("secondary_email", input.secondary_email))
            .bind(("description", input.description))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<ContactRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "contact".into(),
            id: id_str,
        })?;

        Ok(row.into_contact(id))
    }
}
