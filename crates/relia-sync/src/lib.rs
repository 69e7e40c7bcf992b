//! Relia Sync — WAPRO ERP contact synchronization.
//!
//! A paginated upsert loop over the ERP contact table with a resumable
//! cursor: an interrupted pass restarts after the last fully processed
//! batch, and a completed pass clears its checkpoint.

pub mod fields;
pub mod source;
pub mod synchronizer;

pub use source::{ContactSource, SourceContact};
pub use synchronizer::{ContactSynchronizer, SyncSummary};
