//! Shared types for the country exchange service.

pub mod types;

pub use types::CountryName;
