//! SurrealDB implementation of [`UserStore`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (server-side secret) can be
//! provided at construction time.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use relia_core::error::ReliaResult;
use relia_core::models::context::ApiVariant;
use relia_core::models::user::{CreateUser, PermissionType, User, UserStatus};
use relia_core::store::UserStore;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct UserRow {
    login: String,
    password_hash: String,
    status: String,
    permission_type: String,
    crm_id: Option<i64>,
    storage_id: Option<i64>,
    custom_params: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct UserRowWithId {
    record_id: String,
    login: String,
    password_hash: String,
    status: String,
    permission_type: String,
    crm_id: Option<i64>,
    storage_id: Option<i64>,
    custom_params: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

pub(crate) fn parse_status(s: &str) -> Result<UserStatus, DbError> {
    match s {
        "Active" => Ok(UserStatus::Active),
        "Inactive" => Ok(UserStatus::Inactive),
        other => Err(DbError::Migration(format!("unknown user status: {other}"))),
    }
}

pub(crate) fn parse_permission_type(s: &str) -> Result<PermissionType, DbError> {
    match s {
        "Staff" => Ok(PermissionType::Staff),
        "Portal" => Ok(PermissionType::Portal),
        "Integration" => Ok(PermissionType::Integration),
        other => Err(DbError::Migration(format!(
            "unknown permission type: {other}"
        ))),
    }
}

fn permission_type_to_string(t: &PermissionType) -> &'static str {
    match t {
        PermissionType::Staff => "Staff",
        PermissionType::Portal => "Portal",
        PermissionType::Integration => "Integration",
    }
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        Ok(User {
            id,
            login: self.login,
            password_hash: self.password_hash,
            status: parse_status(&self.status)?,
            permission_type: parse_permission_type(&self.permission_type)?,
            crm_id: self.crm_id,
            storage_id: self.storage_id,
            custom_params: self.custom_params,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(User {
            id,
            login: self.login,
            password_hash: self.password_hash,
            status: parse_status(&self.status)?,
            permission_type: parse_permission_type(&self.permission_type)?,
            crm_id: self.crm_id,
            storage_id: self.storage_id,
            custom_params: self.custom_params,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Migration(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::Migration(format!("password hash error: {e}")))?;

    Ok(hash.to_string())
}

/// SurrealDB implementation of the webservice user store.
#[derive(Clone)]
pub struct SurrealUserStore<C: Connection> {
    db: Surreal<C>,
    /// Optional server-side pepper for password hashing.
    pepper: Option<String>,
}

impl<C: Connection> SurrealUserStore<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }
}

impl<C: Connection> UserStore for SurrealUserStore<C> {
    async fn create(&self, variant: ApiVariant, input: CreateUser) -> ReliaResult<User> {
        let tables = variant.tables();
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;
        let custom_params = match &input.custom_params {
            Some(value) => Some(
                serde_json::to_string(value)
                    .map_err(|e| DbError::Migration(format!("custom_params encode: {e}")))?,
            ),
            None => None,
        };

        let result = self
            .db
            .query(
                "CREATE type::record($tb, $id) SET \
                 login = $login, \
                 password_hash = $password_hash, \
                 status = 'Active', \
                 permission_type = $permission_type, \
                 crm_id = $crm_id, \
                 storage_id = $storage_id, \
                 custom_params = $custom_params",
            )
            .bind(("tb", tables.user.to_string()))
            .bind(("id", id_str.clone()))
            .bind(("login", input.login))
            .bind(("password_hash", password_hash))
            .bind((
                "permission_type",
                permission_type_to_string(&input.permission_type).to_string(),
            ))
            .bind(("crm_id", input.crm_id))
            .bind(("storage_id", input.storage_id))
            .bind(("custom_params", custom_params))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: tables.user.to_string(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn find_by_login(&self, variant: ApiVariant, login: &str) -> ReliaResult<Option<User>> {
        let tables = variant.tables();

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM type::table($tb) \
                 WHERE login = $login AND status = 'Active'",
            )
            .bind(("tb", tables.user.to_string()))
            .bind(("login", login.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_user()?)),
            None => Ok(None),
        }
    }

    async fn get_by_id(&self, variant: ApiVariant, id: Uuid) -> ReliaResult<User> {
        let tables = variant.tables();
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record($tb, $id)")
            .bind(("tb", tables.user.to_string()))
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: tables.user.to_string(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }
}
