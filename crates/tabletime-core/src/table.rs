//! Table occupancy state machine

use chrono::{DateTime, Local};
use tabletime_api::TableSnapshot;
use tabletime_util::{billable_minutes, SessionId, TableId};

/// The guest session currently running at a table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSession {
    pub session_id: SessionId,

    /// Wall-clock time the guests sat down
    pub started_at: DateTime<Local>,
}

/// Outcome of billing a finished session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub session_id: SessionId,
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,

    /// Whole minutes billed
    pub minutes: u64,

    /// `minutes * price_per_minute`, the amount earned by this session alone
    pub charge: f64,
}

/// One physical table: its occupancy and lifetime counters.
///
/// A table is free when `session` is `None`. Counters only ever grow.
#[derive(Debug, Clone)]
pub struct Table {
    id: TableId,
    session: Option<ActiveSession>,
    total_minutes_occupied: u64,
    total_earnings: f64,
    occupancy_count: u64,
}

impl Table {
    pub fn new(id: TableId) -> Self {
        Self {
            id,
            session: None,
            total_minutes_occupied: 0,
            total_earnings: 0.0,
            occupancy_count: 0,
        }
    }

    pub fn id(&self) -> TableId {
        self.id
    }

    pub fn is_occupied(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        self.session.as_ref()
    }

    pub fn session_start(&self) -> Option<DateTime<Local>> {
        self.session.map(|s| s.started_at)
    }

    pub fn total_minutes_occupied(&self) -> u64 {
        self.total_minutes_occupied
    }

    pub fn total_earnings(&self) -> f64 {
        self.total_earnings
    }

    /// Completed occupy -> release cycles
    pub fn occupancy_count(&self) -> u64 {
        self.occupancy_count
    }

    /// Seat guests and return the new session. Does nothing and returns
    /// `None` if already occupied; the running session keeps its start time.
    pub fn occupy(&mut self, now: DateTime<Local>) -> Option<ActiveSession> {
        if self.session.is_some() {
            return None;
        }

        let session = ActiveSession {
            session_id: SessionId::new(),
            started_at: now,
        };
        self.session = Some(session);
        Some(session)
    }

    /// Bill the running session at `price_per_minute` and free the table.
    /// Returns `None` without touching any counter if the table is free.
    pub fn release(&mut self, price_per_minute: f64, now: DateTime<Local>) -> Option<Release> {
        let session = self.session.take()?;

        let minutes = billable_minutes(session.started_at, now);
        let charge = minutes as f64 * price_per_minute;

        self.total_minutes_occupied += minutes;
        self.total_earnings += charge;
        self.occupancy_count += 1;

        Some(Release {
            session_id: session.session_id,
            started_at: session.started_at,
            ended_at: now,
            minutes,
            charge,
        })
    }

    /// Whole minutes of the running session so far; 0 when free
    pub fn minutes_so_far(&self, now: DateTime<Local>) -> u64 {
        self.session
            .map(|s| billable_minutes(s.started_at, now))
            .unwrap_or(0)
    }

    /// What the guests would pay if they left at `now`; 0 when free
    pub fn owed_so_far(&self, price_per_minute: f64, now: DateTime<Local>) -> f64 {
        self.minutes_so_far(now) as f64 * price_per_minute
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            table_id: self.id,
            occupied: self.is_occupied(),
            session_start: self.session_start(),
        }
    }
}
