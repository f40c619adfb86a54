//! Pure merge logic: joins one catalog record with the exchange rate table.

use chrono::{DateTime, Utc};
use rand::Rng;

use common::CountryName;
use country_store::Country;
use sources::{RateTable, RawCountry};

/// Per-record multiplier range applied when estimating GDP.
const GDP_MULTIPLIER_RANGE: std::ops::Range<f64> = 1000.0..2000.0;

/// Derives the estimated GDP for a country.
///
/// A country without a currency gets exactly `0.0` (no tradeable currency:
/// the estimate is knowable and zero, not unknown). A country whose currency
/// has a positive rate gets `population × U[1000, 2000) / rate`; the
/// multiplier is drawn fresh per record, so the estimate is intentionally
/// not a pure function of the other fields and changes on every refresh.
/// Anything else (currency listed, rate absent or non-positive) is unknown.
pub fn estimated_gdp(
    population: i64,
    currency_code: Option<&str>,
    exchange_rate: Option<f64>,
) -> Option<f64> {
    match (currency_code, exchange_rate) {
        (Some(_), Some(rate)) if rate > 0.0 => {
            let multiplier = rand::thread_rng().gen_range(GDP_MULTIPLIER_RANGE);
            Some(population as f64 * multiplier / rate)
        }
        (None, _) => Some(0.0),
        _ => None,
    }
}

/// Merges one raw catalog record with the rate table into a country record
/// carrying the shared batch timestamp.
pub fn merge_country(
    raw: &RawCountry,
    rates: &RateTable,
    batch_timestamp: DateTime<Utc>,
) -> Country {
    let currency_code = raw.first_currency_code().map(String::from);
    let exchange_rate = currency_code
        .as_deref()
        .and_then(|code| rates.get(code))
        .copied();
    let estimated_gdp = estimated_gdp(raw.population, currency_code.as_deref(), exchange_rate);

    Country {
        name: CountryName::new(raw.name.clone()),
        capital: raw.capital.clone(),
        region: raw.region.clone(),
        population: raw.population,
        currency_code,
        exchange_rate,
        estimated_gdp,
        flag_url: raw.flag.clone(),
        last_refreshed_at: batch_timestamp,
    }
}
