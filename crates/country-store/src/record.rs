use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::CountryName;

/// A merged country record, the single persisted entity.
///
/// Produced by a refresh batch joining the country catalog with the exchange
/// rate table. `name` is the business key; everything else is overwritten on
/// each refresh that sees the country again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub name: CountryName,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: i64,
    /// First currency listed by the catalog, if any.
    pub currency_code: Option<String>,
    /// Rate resolved from the exchange table; absent when the code is
    /// missing or unlisted.
    pub exchange_rate: Option<f64>,
    /// Derived estimate. Exactly `0.0` for countries without a currency,
    /// absent when a listed currency has no usable rate.
    pub estimated_gdp: Option<f64>,
    pub flag_url: Option<String>,
    /// Shared batch timestamp, identical for every record of one refresh.
    pub last_refreshed_at: DateTime<Utc>,
}
