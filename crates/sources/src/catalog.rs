//! Country catalog client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::error;

use crate::REQUEST_TIMEOUT;
use crate::error::{Result, SourceError};

/// Display name of the catalog origin, used in error reporting.
pub const CATALOG_SOURCE_NAME: &str = "REST Countries";

/// A currency as listed by the catalog. Only the code is used; the rest of
/// the object is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrency {
    pub code: String,
}

/// A country as delivered by the catalog, before merging.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    pub name: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    pub population: i64,
    #[serde(default)]
    pub currencies: Option<Vec<RawCurrency>>,
    #[serde(default)]
    pub flag: Option<String>,
}

impl RawCountry {
    /// The first listed currency code, if the country lists any.
    pub fn first_currency_code(&self) -> Option<&str> {
        self.currencies
            .as_ref()
            .and_then(|currencies| currencies.first())
            .map(|currency| currency.code.as_str())
    }
}

/// Trait for fetching the country catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches the full country catalog.
    async fn fetch_catalog(&self) -> Result<Vec<RawCountry>>;
}

/// Catalog client backed by the REST Countries HTTP API.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    url: String,
    client: reqwest::Client,
}

impl RestCountriesClient {
    /// Creates a client for the given catalog endpoint.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SourceError::request(CATALOG_SOURCE_NAME, e))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl CatalogSource for RestCountriesClient {
    async fn fetch_catalog(&self) -> Result<Vec<RawCountry>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SourceError::request(CATALOG_SOURCE_NAME, e))?;

        response.json::<Vec<RawCountry>>().await.map_err(|e| {
            error!(error = %e, "failed to parse country catalog response");
            SourceError::invalid_payload(CATALOG_SOURCE_NAME, e)
        })
    }
}
