use thiserror::Error;

/// Errors raised when an external data source cannot be used.
///
/// Both variants carry the origin's display name so callers can report which
/// upstream dependency was unavailable.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request failed in transport or returned an error status.
    #[error("Request to {origin} failed: {detail}")]
    Request { origin: &'static str, detail: String },

    /// The response arrived but its payload was unusable.
    #[error("Invalid payload from {origin}: {detail}")]
    InvalidPayload { origin: &'static str, detail: String },
}

impl SourceError {
    pub(crate) fn request(source: &'static str, detail: impl ToString) -> Self {
        Self::Request {
            origin: source,
            detail: detail.to_string(),
        }
    }

    pub(crate) fn invalid_payload(source: &'static str, detail: impl ToString) -> Self {
        Self::InvalidPayload {
            origin: source,
            detail: detail.to_string(),
        }
    }

    /// Display name of the origin that failed.
    pub fn source_name(&self) -> &'static str {
        match self {
            Self::Request { origin, .. } | Self::InvalidPayload { origin, .. } => origin,
        }
    }
}

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
