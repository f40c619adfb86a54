//! Static in-memory sources for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::catalog::{CATALOG_SOURCE_NAME, CatalogSource, RawCountry};
use crate::error::{Result, SourceError};
use crate::rates::{RATES_SOURCE_NAME, RateSource, RateTable};

#[derive(Debug, Default)]
struct StaticCatalogState {
    countries: Vec<RawCountry>,
    fail: bool,
}

/// In-memory catalog source serving a fixed set of countries.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    state: Arc<RwLock<StaticCatalogState>>,
}

impl StaticCatalogSource {
    /// Creates a catalog source serving the given countries.
    pub fn new(countries: Vec<RawCountry>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StaticCatalogState {
                countries,
                fail: false,
            })),
        }
    }

    /// Configures the source to fail on the next fetch.
    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch_catalog(&self) -> Result<Vec<RawCountry>> {
        let state = self.state.read().unwrap();
        if state.fail {
            return Err(SourceError::request(
                CATALOG_SOURCE_NAME,
                "connection refused",
            ));
        }
        Ok(state.countries.clone())
    }
}

#[derive(Debug, Default)]
struct StaticRateState {
    rates: RateTable,
    fail: bool,
}

/// In-memory rate source serving a fixed rate table.
#[derive(Debug, Clone, Default)]
pub struct StaticRateSource {
    state: Arc<RwLock<StaticRateState>>,
}

impl StaticRateSource {
    /// Creates a rate source serving the given table.
    pub fn new(rates: RateTable) -> Self {
        Self {
            state: Arc::new(RwLock::new(StaticRateState { rates, fail: false })),
        }
    }

    /// Configures the source to fail on the next fetch.
    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch_rates(&self) -> Result<RateTable> {
        let state = self.state.read().unwrap();
        if state.fail {
            return Err(SourceError::request(RATES_SOURCE_NAME, "connection refused"));
        }
        Ok(state.rates.clone())
    }
}
