//! ERP-side contact source.

use relia_core::error::ReliaResult;

/// One raw contact row from the WAPRO `KONTAKT` table.
#[derive(Debug, Clone, Default)]
pub struct SourceContact {
    /// Source primary key (`ID_KONTAKTU`).
    pub id: i64,
    /// Owning counterparty key (`ID_KONTRAHENTA`), when linked.
    pub counterparty_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub secondary_email: Option<String>,
    pub notes: Option<String>,
}

/// Read access to the ERP contact table.
///
/// Implementations page by source id: rows come back ordered by id
/// ascending, strictly greater than `after`.
pub trait ContactSource: Send + Sync {
    fn fetch_after(
        &self,
        after: Option<i64>,
        limit: usize,
    ) -> impl Future<Output = ReliaResult<Vec<SourceContact>>> + Send;
}
