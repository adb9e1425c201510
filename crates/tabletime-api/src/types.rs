//! Shared types for the tabletime API

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tabletime_util::TableId;
use thiserror::Error;

/// Point-in-time view of one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub table_id: TableId,
    pub occupied: bool,
    /// Present exactly while the table is occupied
    pub session_start: Option<DateTime<Local>>,
}

/// One table's line in the current (uncommitted) report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentTableLine {
    pub table_id: TableId,
    pub occupied: bool,
    /// Whole minutes of the running session; 0 for free tables
    pub minutes_so_far: u64,
    /// What the guest would pay if they left now; 0 for free tables
    pub owed_so_far: f64,
}

/// What every seated guest owes right now, without releasing anyone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentReport {
    pub generated_at: DateTime<Local>,
    pub per_table: Vec<CurrentTableLine>,
    pub total_owed_if_all_left_now: f64,
}

impl CurrentReport {
    pub fn occupied_count(&self) -> usize {
        self.per_table.iter().filter(|line| line.occupied).count()
    }
}

/// One table's lifetime totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveTableLine {
    pub table_id: TableId,
    pub total_minutes_occupied: u64,
    pub total_earnings: f64,
    pub occupancy_count: u64,
}

/// Lifetime statistics across the venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveReport {
    pub per_table: Vec<ArchiveTableLine>,
    /// Highest occupancy count, first in id order on ties. `None` only for an empty venue.
    pub most_popular_table_id: Option<TableId>,
    /// Highest lifetime earnings, first in id order on ties. `None` only for an empty venue.
    pub highest_earning_table_id: Option<TableId>,
    pub grand_total_earnings: f64,
}

/// Why an occupy or free request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ReasonCode {
    #[error("table {table_id} does not exist")]
    UnknownTable { table_id: TableId },

    #[error("table {table_id} is already occupied")]
    AlreadyOccupied { table_id: TableId },

    #[error("table {table_id} is not occupied")]
    NotOccupied { table_id: TableId },
}

impl ReasonCode {
    pub fn table_id(&self) -> TableId {
        match self {
            ReasonCode::UnknownTable { table_id }
            | ReasonCode::AlreadyOccupied { table_id }
            | ReasonCode::NotOccupied { table_id } => *table_id,
        }
    }
}
