//! Occupancy and billing core for tabletime
//!
//! This crate is the heart of tabletime, containing:
//! - The per-table state machine (Free -> Occupied -> Free)
//! - Billing by whole elapsed minutes
//! - The venue-wide manager and its current/archive reports
//!
//! Nothing here logs or performs I/O. Time comes from an injected
//! [`tabletime_util::Clock`]; mutations return [`CoreEvent`]s for the
//! caller to record.

mod events;
mod manager;
mod shared;
mod table;

pub use events::*;
pub use manager::*;
pub use shared::*;
pub use table::*;
