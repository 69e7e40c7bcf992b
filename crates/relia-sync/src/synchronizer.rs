//! WAPRO ERP contacts synchronizer.

use relia_core::error::ReliaResult;
use relia_core::store::{ContactStore, CursorStore};
use tracing::{info, warn};

use crate::fields::map_contact;
use crate::source::{ContactSource, SourceContact};

/// Checkpoint key holding the last-processed source contact id.
pub const CONTACTS_CURSOR_KEY: &str = "wapro_contacts_last_id";

const DEFAULT_BATCH_SIZE: usize = 50;

/// Counters for one synchronization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub created: u32,
    pub updated: u32,
    pub skipped: u32,
    pub errors: u32,
}

enum Outcome {
    Created,
    Updated,
    Skipped,
}

/// Paginated upsert loop over the ERP contact table.
///
/// Generic over the source and store implementations so the loop can
/// run against in-memory fixtures in tests.
pub struct ContactSynchronizer<S, C, K>
where
    S: ContactSource,
    C: ContactStore,
    K: CursorStore,
{
    source: S,
    contacts: C,
    cursor: K,
    batch_size: usize,
}

impl<S, C, K> ContactSynchronizer<S, C, K>
where
    S: ContactSource,
    C: ContactStore,
    K: CursorStore,
{
    pub fn new(source: S, contacts: C, cursor: K) -> Self {
        Self {
            source,
            contacts,
            cursor,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Run one synchronization pass.
    ///
    /// Resumes after the stored cursor if a previous pass was
    /// interrupted. The cursor advances once per fully processed batch;
    /// a completed pass clears it so the next pass starts from the
    /// beginning. Row-level failures are counted and logged, never
    /// fatal; source and checkpoint failures abort the pass with the
    /// cursor still in place.
    pub async fn run(&self) -> ReliaResult<SyncSummary> {
        let mut after = self.cursor.get(CONTACTS_CURSOR_KEY).await?;
        let mut summary = SyncSummary::default();

        loop {
            let rows = self.source.fetch_after(after, self.batch_size).await?;
            if rows.is_empty() {
                break;
            }

            let mut last_id = 0;
            for row in &rows {
                match self.import(row).await {
                    Ok(Outcome::Created) => summary.created += 1,
                    Ok(Outcome::Updated) => summary.updated += 1,
                    Ok(Outcome::Skipped) => summary.skipped += 1,
                    Err(err) => {
                        warn!(source_id = row.id, error = %err, "contact import failed");
                        summary.errors += 1;
                    }
                }
                last_id = row.id;
            }

            self.cursor.set(CONTACTS_CURSOR_KEY, last_id).await?;
            after = Some(last_id);
        }

        self.cursor.clear(CONTACTS_CURSOR_KEY).await?;

        info!(
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            errors = summary.errors,
            "contact synchronization finished"
        );

        Ok(summary)
    }

    async fn import(&self, row: &SourceContact) -> ReliaResult<Outcome> {
        let upsert = match map_contact(row) {
            Some(upsert) => upsert,
            None => return Ok(Outcome::Skipped),
        };

        match self.contacts.find_by_wapro_id(row.id).await? {
            Some(existing) => {
                self.contacts.update(existing.id, upsert).await?;
                Ok(Outcome::Updated)
            }
            None => {
                self.contacts.create(upsert).await?;
                Ok(Outcome::Created)
            }
        }
    }
}
