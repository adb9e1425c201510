//! Configuration validation
//!
//! The core accepts any rate and any table count. Rejecting nonsense
//! values is the configuration layer's job.

use crate::schema::RawConfig;
use thiserror::Error;

/// Largest venue the configuration accepts
pub const MAX_TABLE_COUNT: u32 = 10_000;

/// Validation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("price_per_minute must be a finite number, got {0}")]
    NonFinitePrice(f64),

    #[error("price_per_minute cannot be negative, got {0}")]
    NegativePrice(f64),

    #[error("table_count {count} exceeds the maximum of {max}")]
    TooManyTables { count: u32, max: u32 },

    #[error("venue name cannot be empty")]
    EmptyVenueName,
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let venue = &config.venue;

    if let Some(price) = venue.price_per_minute {
        if !price.is_finite() {
            errors.push(ValidationError::NonFinitePrice(price));
        } else if price < 0.0 {
            errors.push(ValidationError::NegativePrice(price));
        }
    }

    if let Some(count) = venue.table_count
        && count > MAX_TABLE_COUNT
    {
        errors.push(ValidationError::TooManyTables {
            count,
            max: MAX_TABLE_COUNT,
        });
    }

    if let Some(name) = &venue.name
        && name.trim().is_empty()
    {
        errors.push(ValidationError::EmptyVenueName);
    }

    errors
}
