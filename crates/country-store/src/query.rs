/// Sort modes supported by country listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Descending by estimated GDP, records without an estimate last.
    EstimatedGdpDesc,
}

/// Builder for filtered country listings.
///
/// Filters compose conjunctively; each one is an exact match against the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct CountryFilter {
    /// Filter by region.
    pub region: Option<String>,

    /// Filter by currency code.
    pub currency_code: Option<String>,

    /// Optional sort mode; unsorted listings are ordered by normalized name.
    pub sort: Option<SortOrder>,
}

impl CountryFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Filters by currency code.
    pub fn currency_code(mut self, code: impl Into<String>) -> Self {
        self.currency_code = Some(code.into());
        self
    }

    /// Applies a sort mode.
    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }
}
