//! Domain layer: the refresh/merge pipeline and the query operations over
//! persisted country records.
//!
//! A refresh fetches the country catalog and the exchange rate table
//! concurrently, joins them on currency code, derives an estimated GDP per
//! country, and reconciles the batch against storage in one atomic unit.
//! Either fetch failing aborts the refresh before any write.

pub mod error;
pub mod merge;
pub mod service;

pub use error::DomainError;
pub use merge::{estimated_gdp, merge_country};
pub use service::{CountryService, RefreshOutcome};
