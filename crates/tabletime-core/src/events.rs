//! Core events emitted by the manager

use chrono::{DateTime, Local};
use tabletime_util::{SessionId, TableId};

/// Events emitted by successful occupy/free operations
#[derive(Debug, Clone, PartialEq)]
pub enum CoreEvent {
    /// Guests were seated
    TableOccupied {
        table_id: TableId,
        session_id: SessionId,
        started_at: DateTime<Local>,
    },

    /// Guests left and the session was billed
    TableReleased {
        table_id: TableId,
        session_id: SessionId,
        started_at: DateTime<Local>,
        ended_at: DateTime<Local>,
        minutes: u64,
        charge: f64,
    },
}

impl CoreEvent {
    pub fn table_id(&self) -> TableId {
        match self {
            CoreEvent::TableOccupied { table_id, .. }
            | CoreEvent::TableReleased { table_id, .. } => *table_id,
        }
    }

    pub fn session_id(&self) -> SessionId {
        match self {
            CoreEvent::TableOccupied { session_id, .. }
            | CoreEvent::TableReleased { session_id, .. } => *session_id,
        }
    }
}
