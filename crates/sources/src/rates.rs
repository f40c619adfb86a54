//! Exchange rate table client.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::error;

use crate::REQUEST_TIMEOUT;
use crate::error::{Result, SourceError};

/// Display name of the rates origin, used in error reporting.
pub const RATES_SOURCE_NAME: &str = "Exchange Rate API";

/// Exchange rates keyed by currency code. Lookups are exact-key; codes are
/// not normalized.
pub type RateTable = HashMap<String, f64>;

#[derive(Debug, Deserialize)]
struct RatesResponse {
    result: String,
    #[serde(default)]
    rates: RateTable,
}

/// Trait for fetching the exchange rate table.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetches the current exchange rate table.
    async fn fetch_rates(&self) -> Result<RateTable>;
}

/// Rate client backed by an exchange rate HTTP API.
#[derive(Debug, Clone)]
pub struct ExchangeRateClient {
    url: String,
    client: reqwest::Client,
}

impl ExchangeRateClient {
    /// Creates a client for the given rates endpoint.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SourceError::request(RATES_SOURCE_NAME, e))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl RateSource for ExchangeRateClient {
    async fn fetch_rates(&self) -> Result<RateTable> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| SourceError::request(RATES_SOURCE_NAME, e))?;

        let payload = response.json::<RatesResponse>().await.map_err(|e| {
            error!(error = %e, "failed to parse exchange rate response");
            SourceError::invalid_payload(RATES_SOURCE_NAME, e)
        })?;

        // The API signals its own failures in-band; anything but an explicit
        // success is an unavailable source, not data.
        if payload.result != "success" {
            return Err(SourceError::invalid_payload(
                RATES_SOURCE_NAME,
                format!("payload result was {:?}", payload.result),
            ));
        }

        Ok(payload.rates)
    }
}
