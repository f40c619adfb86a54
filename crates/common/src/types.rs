use serde::{Deserialize, Serialize};

/// A country's name, used as its unique business key.
///
/// Keeps the display casing it was created with, but compares and hashes
/// case-insensitively so that `"Nigeria"` and `"nigeria"` identify the same
/// record. The normalized form is exposed via [`CountryName::key`] and is
/// what persistent stores index on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryName(String);

impl CountryName {
    /// Creates a country name, preserving the given casing for display.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the display form of the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the normalized lookup key (lowercase).
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

impl PartialEq for CountryName {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }
}

impl Eq for CountryName {}

impl std::hash::Hash for CountryName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_lowercase().hash(state);
    }
}

impl std::fmt::Display for CountryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CountryName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for CountryName {
    fn from(name: String) -> Self {
        Self(name)
    }
}
