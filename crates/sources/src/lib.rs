//! Clients for the two external data sources feeding a refresh: the country
//! catalog and the currency exchange rate table.
//!
//! Each source is a trait so the merge pipeline can be exercised without a
//! network; the production implementations sit on `reqwest` with a bounded
//! per-request timeout, and any transport or payload failure surfaces as a
//! [`SourceError`] naming the origin.

pub mod catalog;
pub mod error;
pub mod memory;
pub mod rates;

pub use catalog::{CATALOG_SOURCE_NAME, CatalogSource, RawCountry, RawCurrency, RestCountriesClient};
pub use error::{Result, SourceError};
pub use memory::{StaticCatalogSource, StaticRateSource};
pub use rates::{ExchangeRateClient, RATES_SOURCE_NAME, RateSource, RateTable};

use std::time::Duration;

/// Bound applied independently to each outbound request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
