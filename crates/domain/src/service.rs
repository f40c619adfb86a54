//! Country service: refresh orchestration and query operations.

use chrono::{DateTime, Utc};

use country_store::{Country, CountryFilter, CountryStore, StoreStatus};
use sources::{CatalogSource, RateSource};

use crate::error::Result;
use crate::merge::merge_country;

/// Result of a completed refresh.
#[derive(Debug, Clone, Copy)]
pub struct RefreshOutcome {
    /// Number of catalog records fetched and reconciled.
    pub fetched: usize,
    /// Timestamp shared by every record in the batch.
    pub refreshed_at: DateTime<Utc>,
}

/// Service joining the two external sources with the country store.
///
/// Provides the refresh pipeline plus the query operations the HTTP surface
/// exposes, all delegating storage access to the [`CountryStore`] behind it.
pub struct CountryService<C, R, S> {
    catalog: C,
    rates: R,
    store: S,
}

impl<C, R, S> CountryService<C, R, S>
where
    C: CatalogSource,
    R: RateSource,
    S: CountryStore,
{
    /// Creates a service over the given sources and store.
    pub fn new(catalog: C, rates: R, store: S) -> Self {
        Self {
            catalog,
            rates,
            store,
        }
    }

    /// Fetches both sources, merges them, and reconciles the batch against
    /// the store.
    ///
    /// The two fetches run concurrently and fail fast: if either source is
    /// unavailable the refresh aborts before any write. The whole batch
    /// shares one timestamp and commits atomically.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        let started = std::time::Instant::now();
        metrics::counter!("refresh_attempts_total").increment(1);

        let (catalog, rates) =
            tokio::try_join!(self.catalog.fetch_catalog(), self.rates.fetch_rates()).map_err(
                |e| {
                    metrics::counter!("refresh_source_failures_total").increment(1);
                    e
                },
            )?;

        let refreshed_at = Utc::now();
        let records: Vec<Country> = catalog
            .iter()
            .map(|raw| merge_country(raw, &rates, refreshed_at))
            .collect();
        let fetched = records.len();

        self.store.upsert_batch(records).await?;

        metrics::counter!("countries_upserted_total").increment(fetched as u64);
        metrics::histogram!("refresh_duration_seconds").record(started.elapsed().as_secs_f64());
        tracing::info!(fetched, "refresh completed");

        Ok(RefreshOutcome {
            fetched,
            refreshed_at,
        })
    }

    /// Lists countries matching the filter.
    #[tracing::instrument(skip(self))]
    pub async fn list_countries(&self, filter: CountryFilter) -> Result<Vec<Country>> {
        Ok(self.store.list(filter).await?)
    }

    /// Fetches a single country by name, case-insensitively.
    #[tracing::instrument(skip(self))]
    pub async fn get_country(&self, name: &str) -> Result<Option<Country>> {
        Ok(self.store.get(name).await?)
    }

    /// Deletes a country by name, case-insensitively. Returns whether a
    /// record was deleted.
    #[tracing::instrument(skip(self))]
    pub async fn delete_country(&self, name: &str) -> Result<bool> {
        Ok(self.store.delete(name).await?)
    }

    /// Returns the top `limit` countries by estimated GDP.
    #[tracing::instrument(skip(self))]
    pub async fn top_by_estimated_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        Ok(self.store.top_by_estimated_gdp(limit).await?)
    }

    /// Returns the record count and latest refresh timestamp.
    #[tracing::instrument(skip(self))]
    pub async fn store_status(&self) -> Result<StoreStatus> {
        Ok(self.store.status().await?)
    }
}
