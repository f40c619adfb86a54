use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Country, CountryFilter, Result, SortOrder,
    store::{CountryStore, StoreStatus},
};

/// In-memory country store implementation for testing.
///
/// Keeps records in a map keyed by the normalized country name and provides
/// the same interface and visible semantics as the PostgreSQL
/// implementation.
#[derive(Clone, Default)]
pub struct InMemoryCountryStore {
    records: Arc<RwLock<HashMap<String, Country>>>,
}

impl InMemoryCountryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

/// Descending by estimated GDP, records without an estimate last.
fn by_estimated_gdp_desc(a: &Country, b: &Country) -> Ordering {
    let a = a.estimated_gdp.unwrap_or(f64::NEG_INFINITY);
    let b = b.estimated_gdp.unwrap_or(f64::NEG_INFINITY);
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[async_trait]
impl CountryStore for InMemoryCountryStore {
    async fn upsert_batch(&self, records: Vec<Country>) -> Result<()> {
        let mut store = self.records.write().await;

        for mut record in records {
            let key = record.name.key();
            if let Some(existing) = store.get(&key) {
                // The stored display casing is the identity; keep it.
                record.name = existing.name.clone();
            }
            store.insert(key, record);
        }

        Ok(())
    }

    async fn list(&self, filter: CountryFilter) -> Result<Vec<Country>> {
        let store = self.records.read().await;
        let mut countries: Vec<_> = store
            .values()
            .filter(|c| {
                if let Some(ref region) = filter.region
                    && c.region.as_deref() != Some(region.as_str())
                {
                    return false;
                }
                if let Some(ref code) = filter.currency_code
                    && c.currency_code.as_deref() != Some(code.as_str())
                {
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        match filter.sort {
            Some(SortOrder::EstimatedGdpDesc) => countries.sort_by(by_estimated_gdp_desc),
            None => countries.sort_by_key(|c| c.name.key()),
        }

        Ok(countries)
    }

    async fn get(&self, name: &str) -> Result<Option<Country>> {
        let store = self.records.read().await;
        Ok(store.get(&name.to_lowercase()).cloned())
    }

    async fn delete(&self, name: &str) -> Result<bool> {
        let mut store = self.records.write().await;
        Ok(store.remove(&name.to_lowercase()).is_some())
    }

    async fn top_by_estimated_gdp(&self, limit: usize) -> Result<Vec<Country>> {
        let store = self.records.read().await;
        let mut countries: Vec<_> = store.values().cloned().collect();
        countries.sort_by(by_estimated_gdp_desc);
        countries.truncate(limit);
        Ok(countries)
    }

    async fn status(&self) -> Result<StoreStatus> {
        let store = self.records.read().await;
        Ok(StoreStatus {
            total: store.len() as i64,
            last_refreshed_at: store.values().map(|c| c.last_refreshed_at).max(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use common::CountryName;

    fn record(name: &str, region: Option<&str>, code: Option<&str>, gdp: Option<f64>) -> Country {
        Country {
            name: CountryName::new(name),
            capital: Some("Capital".to_string()),
            region: region.map(String::from),
            population: 1_000_000,
            currency_code: code.map(String::from),
            exchange_rate: code.map(|_| 1.5),
            estimated_gdp: gdp,
            flag_url: None,
            last_refreshed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn upsert_inserts_new_records() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![
                record("Nigeria", Some("Africa"), Some("NGN"), Some(10.0)),
                record("Ghana", Some("Africa"), Some("GHS"), Some(5.0)),
            ])
            .await
            .unwrap();

        assert_eq!(store.count().await, 2);
    }

    #[tokio::test]
    async fn upsert_matches_case_insensitively() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![record("Nigeria", Some("Africa"), Some("NGN"), Some(10.0))])
            .await
            .unwrap();
        store
            .upsert_batch(vec![record("nigeria", Some("Africa"), Some("NGN"), Some(20.0))])
            .await
            .unwrap();

        assert_eq!(store.count().await, 1);

        let stored = store.get("NIGERIA").await.unwrap().unwrap();
        // Updated fields come from the newer batch, the display casing from
        // the first write.
        assert_eq!(stored.estimated_gdp, Some(20.0));
        assert_eq!(stored.name.as_str(), "Nigeria");
    }

    #[tokio::test]
    async fn get_is_case_insensitive() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![record("Nigeria", Some("Africa"), Some("NGN"), Some(10.0))])
            .await
            .unwrap();

        assert!(store.get("nigeria").await.unwrap().is_some());
        assert!(store.get("NonExistentCountry123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_at_most_one() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![
                record("Nigeria", Some("Africa"), Some("NGN"), Some(10.0)),
                record("Ghana", Some("Africa"), Some("GHS"), Some(5.0)),
            ])
            .await
            .unwrap();

        assert!(store.delete("NIGERIA").await.unwrap());
        assert_eq!(store.count().await, 1);
        assert!(!store.delete("Nigeria").await.unwrap());
    }

    #[tokio::test]
    async fn list_filters_compose() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![
                record("Nigeria", Some("Africa"), Some("NGN"), Some(10.0)),
                record("Ghana", Some("Africa"), Some("GHS"), Some(5.0)),
                record("France", Some("Europe"), Some("EUR"), Some(50.0)),
            ])
            .await
            .unwrap();

        let africa = store
            .list(CountryFilter::new().region("Africa"))
            .await
            .unwrap();
        assert_eq!(africa.len(), 2);

        let ghs_in_africa = store
            .list(CountryFilter::new().region("Africa").currency_code("GHS"))
            .await
            .unwrap();
        assert_eq!(ghs_in_africa.len(), 1);
        assert_eq!(ghs_in_africa[0].name.as_str(), "Ghana");
    }

    #[tokio::test]
    async fn sort_by_gdp_descending_with_missing_estimates_last() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![
                record("Ghana", Some("Africa"), Some("GHS"), Some(5.0)),
                record("Atlantis", None, Some("ATL"), None),
                record("France", Some("Europe"), Some("EUR"), Some(50.0)),
                record("Nigeria", Some("Africa"), Some("NGN"), Some(10.0)),
            ])
            .await
            .unwrap();

        let sorted = store
            .list(CountryFilter::new().sort(SortOrder::EstimatedGdpDesc))
            .await
            .unwrap();

        let names: Vec<_> = sorted.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["France", "Nigeria", "Ghana", "Atlantis"]);
    }

    #[tokio::test]
    async fn unsorted_list_is_ordered_by_name() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![
                record("Nigeria", None, None, None),
                record("Ghana", None, None, None),
            ])
            .await
            .unwrap();

        let listed = store.list(CountryFilter::new()).await.unwrap();
        let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ghana", "Nigeria"]);
    }

    #[tokio::test]
    async fn top_by_estimated_gdp_limits_and_sorts() {
        let store = InMemoryCountryStore::new();
        store
            .upsert_batch(vec![
                record("A", None, Some("AAA"), Some(1.0)),
                record("B", None, Some("BBB"), Some(3.0)),
                record("C", None, Some("CCC"), Some(2.0)),
            ])
            .await
            .unwrap();

        let top = store.top_by_estimated_gdp(2).await.unwrap();
        let names: Vec<_> = top.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[tokio::test]
    async fn status_reports_count_and_latest_timestamp() {
        let store = InMemoryCountryStore::new();

        let empty = store.status().await.unwrap();
        assert_eq!(empty.total, 0);
        assert!(empty.last_refreshed_at.is_none());

        let older: DateTime<Utc> = "2026-08-01T00:00:00Z".parse().unwrap();
        let newer: DateTime<Utc> = "2026-08-06T00:00:00Z".parse().unwrap();

        let mut first = record("Nigeria", None, None, None);
        first.last_refreshed_at = older;
        let mut second = record("Ghana", None, None, None);
        second.last_refreshed_at = newer;

        store.upsert_batch(vec![first, second]).await.unwrap();

        let status = store.status().await.unwrap();
        assert_eq!(status.total, 2);
        assert_eq!(status.last_refreshed_at, Some(newer));
    }
}
