//! Validated venue policy

use crate::schema::RawConfig;

/// Tables in a venue when the config does not say
pub const DEFAULT_TABLE_COUNT: u32 = 10;

/// Price per minute when the config does not say
pub const DEFAULT_PRICE_PER_MINUTE: f64 = 5.0;

/// Venue name when the config does not say
pub const DEFAULT_VENUE_NAME: &str = "tabletime";

/// Validated venue settings ready for use by the core
#[derive(Debug, Clone, PartialEq)]
pub struct VenuePolicy {
    pub name: String,
    pub table_count: u32,
    pub price_per_minute: f64,
}

impl VenuePolicy {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        let venue = raw.venue;
        Self {
            name: venue.name.unwrap_or_else(|| DEFAULT_VENUE_NAME.to_string()),
            table_count: venue.table_count.unwrap_or(DEFAULT_TABLE_COUNT),
            price_per_minute: venue.price_per_minute.unwrap_or(DEFAULT_PRICE_PER_MINUTE),
        }
    }

    /// Replace settings given on the command line
    pub fn with_overrides(mut self, table_count: Option<u32>, price_per_minute: Option<f64>) -> Self {
        if let Some(count) = table_count {
            self.table_count = count;
        }
        if let Some(price) = price_per_minute {
            self.price_per_minute = price;
        }
        self
    }
}

impl Default for VenuePolicy {
    fn default() -> Self {
        Self {
            name: DEFAULT_VENUE_NAME.to_string(),
            table_count: DEFAULT_TABLE_COUNT,
            price_per_minute: DEFAULT_PRICE_PER_MINUTE,
        }
    }
}
