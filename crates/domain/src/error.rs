use thiserror::Error;

use country_store::StoreError;
use sources::SourceError;

/// Errors that can occur in domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An external data source was unavailable.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The country store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, DomainError>;
