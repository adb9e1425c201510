//! Boundary types for tabletime
//!
//! This crate defines everything a front-end exchanges with the core:
//! - Table snapshots and reports
//! - Reason codes for rejected occupy/free requests
//! - Front-end commands and their responses

mod commands;
mod types;

pub use commands::*;
pub use types::*;
