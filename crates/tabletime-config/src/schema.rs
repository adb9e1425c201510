//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Venue settings
    #[serde(default)]
    pub venue: RawVenueConfig,
}

/// Venue-level settings. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawVenueConfig {
    /// Display name used in logs and report headers
    pub name: Option<String>,

    /// Number of tables, numbered 1..=table_count
    pub table_count: Option<u32>,

    /// Charge per whole minute of occupancy
    pub price_per_minute: Option<f64>,
}
