//! Persistence layer for merged country records.
//!
//! A refresh batch is reconciled against the stored set in one atomic unit:
//! records matching an existing country (case-insensitively, by name) update
//! it in place, the rest are inserted. Two implementations are provided:
//! [`PgCountryStore`] backed by PostgreSQL and [`InMemoryCountryStore`] with
//! the same visible semantics for tests and local development.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod record;
pub mod store;

pub use common::CountryName;
pub use error::{Result, StoreError};
pub use memory::InMemoryCountryStore;
pub use postgres::PgCountryStore;
pub use query::{CountryFilter, SortOrder};
pub use record::Country;
pub use store::{CountryStore, StoreStatus};
