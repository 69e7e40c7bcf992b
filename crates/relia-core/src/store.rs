//! Store trait definitions for data access abstraction.
//!
//! All store operations are async. Session and user operations take an
//! [`ApiVariant`] so each webservice family stays in its own table pair.

use uuid::Uuid;

use crate::error::ReliaResult;
use crate::models::{
    collector::{CollectorConfig, CollectorConfigUpdate, CollectorKind},
    contact::{Contact, ContactUpsert},
    context::ApiVariant,
    session::{CreateSession, SessionTouch, SessionUserRow},
    user::{CreateUser, User},
};

/// Persistence for API sessions.
///
/// Every authentication re-reads current state through this trait —
/// session rows are never cached across requests, so revocation and
/// expiry take effect on the very next call.
pub trait SessionStore: Send + Sync {
    /// Look up a session joined to its owning user, restricted to
    /// active users. At most one row can match (the token is the
    /// session primary key).
    fn find_active(
        &self,
        variant: ApiVariant,
        token: &str,
    ) -> impl Future<Output = ReliaResult<Option<SessionUserRow>>> + Send;

    fn create(
        &self,
        variant: ApiVariant,
        input: CreateSession,
    ) -> impl Future<Output = ReliaResult<()>> + Send;

    /// Overwrite the liveness fields of a session.
    fn touch(
        &self,
        variant: ApiVariant,
        token: &str,
        fields: SessionTouch,
    ) -> impl Future<Output = ReliaResult<()>> + Send;

    /// Delete a session. Deleting an absent token is a no-op, not an
    /// error.
    fn delete(
        &self,
        variant: ApiVariant,
        token: &str,
    ) -> impl Future<Output = ReliaResult<()>> + Send;
}

/// Persistence for webservice user accounts.
pub trait UserStore: Send + Sync {
    fn create(
        &self,
        variant: ApiVariant,
        input: CreateUser,
    ) -> impl Future<Output = ReliaResult<User>> + Send;

    /// Find an active user by login name. Inactive accounts are not
    /// returned.
    fn find_by_login(
        &self,
        variant: ApiVariant,
        login: &str,
    ) -> impl Future<Output = ReliaResult<Option<User>>> + Send;

    fn get_by_id(
        &self,
        variant: ApiVariant,
        id: Uuid,
    ) -> impl Future<Output = ReliaResult<User>> + Send;
}

/// Persistence for record-collector settings.
pub trait CollectorConfigStore: Send + Sync {
    /// Current configuration; a never-configured collector loads as
    /// disabled defaults.
    fn load(
        &self,
        kind: CollectorKind,
    ) -> impl Future<Output = ReliaResult<CollectorConfig>> + Send;

    fn save(
        &self,
        update: CollectorConfigUpdate,
    ) -> impl Future<Output = ReliaResult<()>> + Send;
}

/// Resumable-cursor checkpoint store for batch synchronizers.
///
/// One key holds the last-processed source id; a completed pass clears
/// the key so the next pass starts from the beginning.
pub trait CursorStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = ReliaResult<Option<i64>>> + Send;
    fn set(&self, key: &str, value: i64) -> impl Future<Output = ReliaResult<()>> + Send;
    fn clear(&self, key: &str) -> impl Future<Output = ReliaResult<()>> + Send;
}

/// Persistence for synchronized CRM contacts.
pub trait ContactStore: Send + Sync {
    fn find_by_wapro_id(
        &self,
        wapro_id: i64,
    ) -> impl Future<Output = ReliaResult<Option<Contact>>> + Send;

    fn create(&self, input: ContactUpsert) -> impl Future<Output = ReliaResult<Contact>> + Send;

    fn update(
        &self,
        id: Uuid,
        input: ContactUpsert,
    ) -> impl Future<Output = ReliaResult<Contact>> + Send;
}
