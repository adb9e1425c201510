//! Shared utilities for tabletime
//!
//! This crate provides:
//! - ID types (TableId, SessionId)
//! - Time utilities (injectable clocks, mock time, billable minutes)
//! - Money and minute formatting
//! - Default path for the venue configuration file

mod format;
mod ids;
mod paths;
mod time;

pub use format::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
