use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{Country, CountryFilter, Result};

/// Aggregate information about the stored set.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStatus {
    /// Number of persisted country records.
    pub total: i64,
    /// Most recent batch timestamp across all records, absent when empty.
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Trait for country record storage.
///
/// Country names match case-insensitively throughout: `get("nigeria")`,
/// `delete("NIGERIA")` and an upsert of `"Nigeria"` all address the same
/// record. `upsert_batch` is atomic — either the whole batch becomes
/// visible or none of it does.
#[async_trait]
pub trait CountryStore: Send + Sync {
    /// Reconciles a refresh batch against the stored set in one atomic unit.
    ///
    /// Records whose name matches an existing country update it in place,
    /// overwriting every field except the stored display name. Unmatched
    /// records are inserted.
    async fn upsert_batch(&self, records: Vec<Country>) -> Result<()>;

    /// Lists countries matching the filter.
    async fn list(&self, filter: CountryFilter) -> Result<Vec<Country>>;

    /// Fetches a single country by name. `None` when absent.
    async fn get(&self, name: &str) -> Result<Option<Country>>;

    /// Deletes at most one country by name. Returns whether a row was
    /// deleted.
    async fn delete(&self, name: &str) -> Result<bool>;

    /// Returns the top `limit` countries by estimated GDP, descending,
    /// records without an estimate last.
    async fn top_by_estimated_gdp(&self, limit: usize) -> Result<Vec<Country>>;

    /// Returns the record count and the latest batch timestamp.
    async fn status(&self) -> Result<StoreStatus>;
}
