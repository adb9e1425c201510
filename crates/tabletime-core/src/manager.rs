//! Venue-wide table manager

use std::sync::Arc;
use tabletime_api::{
    ArchiveReport, ArchiveTableLine, CurrentReport, CurrentTableLine, ReasonCode, TableSnapshot,
};
use tabletime_config::VenuePolicy;
use tabletime_util::{Clock, SystemClock, TableId};

use crate::{CoreEvent, Table};

/// Owns every table of a venue and the price they are billed at.
///
/// Tables are numbered `1..=table_count` and live as long as the manager.
/// Earnings are never kept twice: the venue total is the sum of the
/// tables' lifetime earnings.
#[derive(Debug)]
pub struct TableManager {
    tables: Vec<Table>,
    price_per_minute: f64,
    clock: Arc<dyn Clock>,
}

impl TableManager {
    /// Create a manager reading the system clock.
    ///
    /// Any rate is accepted, including zero or negative ones.
    pub fn new(table_count: u32, price_per_minute: f64) -> Self {
        Self::with_clock(table_count, price_per_minute, Arc::new(SystemClock))
    }

    /// Create a manager with an injected time source
    pub fn with_clock(table_count: u32, price_per_minute: f64, clock: Arc<dyn Clock>) -> Self {
        let tables = (1..=table_count).map(|n| Table::new(TableId::new(n))).collect();

        Self {
            tables,
            price_per_minute,
            clock,
        }
    }

    pub fn from_policy(policy: &VenuePolicy, clock: Arc<dyn Clock>) -> Self {
        Self::with_clock(policy.table_count, policy.price_per_minute, clock)
    }

    pub fn price_per_minute(&self) -> f64 {
        self.price_per_minute
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.tables.iter().filter(|t| t.is_occupied()).count()
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Look up a table. Ids are dense, so this indexes directly.
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.index()?)
    }

    fn table_mut(&mut self, id: TableId) -> Result<&mut Table, ReasonCode> {
        id.index()
            .and_then(|index| self.tables.get_mut(index))
            .ok_or(ReasonCode::UnknownTable { table_id: id })
    }

    /// Seat guests at a free table
    pub fn occupy(&mut self, id: TableId) -> Result<CoreEvent, ReasonCode> {
        let now = self.clock.now();
        let session = self
            .table_mut(id)?
            .occupy(now)
            .ok_or(ReasonCode::AlreadyOccupied { table_id: id })?;

        Ok(CoreEvent::TableOccupied {
            table_id: id,
            session_id: session.session_id,
            started_at: session.started_at,
        })
    }

    /// Bill and free an occupied table
    pub fn free(&mut self, id: TableId) -> Result<CoreEvent, ReasonCode> {
        let now = self.clock.now();
        let price_per_minute = self.price_per_minute;
        let table = self.table_mut(id)?;

        let release = table
            .release(price_per_minute, now)
            .ok_or(ReasonCode::NotOccupied { table_id: id })?;

        Ok(CoreEvent::TableReleased {
            table_id: id,
            session_id: release.session_id,
            started_at: release.started_at,
            ended_at: release.ended_at,
            minutes: release.minutes,
            charge: release.charge,
        })
    }

    /// Free the table if occupied, otherwise occupy it
    pub fn toggle(&mut self, id: TableId) -> Result<CoreEvent, ReasonCode> {
        match self.table(id).map(Table::is_occupied) {
            Some(true) => self.free(id),
            Some(false) => self.occupy(id),
            None => Err(ReasonCode::UnknownTable { table_id: id }),
        }
    }

    /// Returns `true` if the table existed and was free
    pub fn occupy_table(&mut self, id: TableId) -> bool {
        self.occupy(id).is_ok()
    }

    /// Returns `true` if the table existed and was occupied
    pub fn free_table(&mut self, id: TableId) -> bool {
        self.free(id).is_ok()
    }

    /// Sum of every table's lifetime earnings
    pub fn total_earnings(&self) -> f64 {
        self.tables.iter().map(Table::total_earnings).sum()
    }

    pub fn list_tables(&self) -> Vec<TableSnapshot> {
        self.tables.iter().map(Table::snapshot).collect()
    }

    /// What every seated guest owes as of now. Nothing is billed.
    pub fn current_report(&self) -> CurrentReport {
        let now = self.clock.now();

        let per_table: Vec<CurrentTableLine> = self
            .tables
            .iter()
            .map(|table| CurrentTableLine {
                table_id: table.id(),
                occupied: table.is_occupied(),
                minutes_so_far: table.minutes_so_far(now),
                owed_so_far: table.owed_so_far(self.price_per_minute, now),
            })
            .collect();

        let total_owed_if_all_left_now = per_table
            .iter()
            .filter(|line| line.occupied)
            .map(|line| line.owed_so_far)
            .sum();

        CurrentReport {
            generated_at: now,
            per_table,
            total_owed_if_all_left_now,
        }
    }

    /// Lifetime totals per table plus the venue leaders
    pub fn archive_report(&self) -> ArchiveReport {
        let per_table = self
            .tables
            .iter()
            .map(|table| ArchiveTableLine {
                table_id: table.id(),
                total_minutes_occupied: table.total_minutes_occupied(),
                total_earnings: table.total_earnings(),
                occupancy_count: table.occupancy_count(),
            })
            .collect();

        let most_popular_table_id =
            first_max_by(&self.tables, |a, b| a.occupancy_count() > b.occupancy_count());
        let highest_earning_table_id =
            first_max_by(&self.tables, |a, b| a.total_earnings() > b.total_earnings());

        ArchiveReport {
            per_table,
            most_popular_table_id,
            highest_earning_table_id,
            grand_total_earnings: self.total_earnings(),
        }
    }
}

/// Id of the first table no later table strictly beats
fn first_max_by(tables: &[Table], beats: impl Fn(&Table, &Table) -> bool) -> Option<TableId> {
    tables
        .iter()
        .fold(None, |best: Option<&Table>, table| match best {
            Some(current) if !beats(table, current) => Some(current),
            _ => Some(table),
        })
        .map(Table::id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};
    use std::time::Duration;
    use tabletime_util::ManualClock;

    fn manual_clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Local.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
        ))
    }

    fn id(n: u32) -> TableId {
        TableId::new(n)
    }

    fn minutes(n: u64) -> Duration {
        Duration::from_secs(n * 60)
    }

    #[test]
    fn test_new_creates_sequential_free_tables() {
        let manager = TableManager::new(3, 2.0);

        let ids: Vec<u32> = manager.tables().iter().map(|t| t.id().get()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(manager.tables().iter().all(|t| !t.is_occupied()));
        assert_eq!(manager.total_earnings(), 0.0);
        assert_eq!(manager.price_per_minute(), 2.0);
    }

    #[test]
    fn test_occupy_twice_is_rejected() {
        let mut manager = TableManager::new(3, 2.0);

        assert!(manager.occupy_table(id(1)));
        assert!(!manager.occupy_table(id(1)));
        assert_eq!(
            manager.occupy(id(1)),
            Err(ReasonCode::AlreadyOccupied {
                table_id: TableId::new(1)
            })
        );
    }

    #[test]
    fn test_free_immediately_counts_one_cycle() {
        let mut manager = TableManager::new(3, 2.0);

        manager.occupy_table(id(1));
        assert!(manager.free_table(id(1)));

        let table = manager.table(id(1)).unwrap();
        assert_eq!(table.occupancy_count(), 1);
        assert!(!table.is_occupied());
    }

    #[test]
    fn test_free_bills_elapsed_minutes() {
        let clock = manual_clock();
        let mut manager = TableManager::with_clock(1, 5.0, clock.clone());

        manager.occupy_table(id(1));
        clock.advance(minutes(3));

        let event = manager.free(id(1)).unwrap();
        assert!(matches!(
            event,
            CoreEvent::TableReleased { minutes: 3, charge, .. } if charge == 15.0
        ));

        let table = manager.table(id(1)).unwrap();
        assert_eq!(table.total_earnings(), 15.0);
        assert_eq!(table.total_minutes_occupied(), 3);
        assert_eq!(manager.total_earnings(), 15.0);
    }

    #[test]
    fn test_unknown_ids_are_rejected() {
        let mut manager = TableManager::new(3, 1.0);

        for n in [0, 4, 99] {
            assert!(!manager.occupy_table(TableId::new(n)));
            assert!(!manager.free_table(TableId::new(n)));
            assert_eq!(
                manager.toggle(TableId::new(n)),
                Err(ReasonCode::UnknownTable {
                    table_id: TableId::new(n)
                })
            );
        }
        assert_eq!(manager.occupied_count(), 0);
    }

    #[test]
    fn test_free_of_free_table_is_rejected() {
        let mut manager = TableManager::new(2, 1.0);

        assert_eq!(
            manager.free(id(2)),
            Err(ReasonCode::NotOccupied {
                table_id: TableId::new(2)
            })
        );
        assert_eq!(manager.table(id(2)).unwrap().occupancy_count(), 0);
    }

    #[test]
    fn test_toggle_alternates() {
        let clock = manual_clock();
        let mut manager = TableManager::with_clock(2, 1.0, clock.clone());

        let occupied = manager.toggle(id(2)).unwrap();
        assert!(matches!(occupied, CoreEvent::TableOccupied { .. }));

        clock.advance(minutes(4));
        let released = manager.toggle(id(2)).unwrap();
        assert!(matches!(released, CoreEvent::TableReleased { minutes: 4, .. }));
        assert_eq!(occupied.session_id(), released.session_id());
        assert_eq!(released.table_id(), TableId::new(2));
    }

    #[test]
    fn test_current_report_charges_without_billing() {
        let clock = manual_clock();
        let mut manager = TableManager::with_clock(3, 2.0, clock.clone());

        manager.occupy_table(id(1));
        clock.advance(minutes(5));
        manager.occupy_table(id(3));
        clock.advance(Duration::from_secs(2 * 60 + 30));

        let report = manager.current_report();
        assert_eq!(report.generated_at, clock.now());
        assert_eq!(report.per_table[0].minutes_so_far, 7);
        assert_eq!(report.per_table[0].owed_so_far, 14.0);
        assert!(!report.per_table[1].occupied);
        assert_eq!(report.per_table[1].owed_so_far, 0.0);
        assert_eq!(report.per_table[2].owed_so_far, 4.0);
        assert_eq!(report.total_owed_if_all_left_now, 18.0);

        assert_eq!(manager.total_earnings(), 0.0);
        assert_eq!(manager.occupied_count(), 2);
    }

    #[test]
    fn test_archive_report_of_untouched_venue() {
        let manager = TableManager::new(2, 1.0);
        let report = manager.archive_report();

        assert_eq!(report.per_table.len(), 2);
        assert!(report
            .per_table
            .iter()
            .all(|line| line.total_minutes_occupied == 0 && line.total_earnings == 0.0));
        assert_eq!(report.most_popular_table_id, Some(TableId::new(1)));
        assert_eq!(report.highest_earning_table_id, Some(TableId::new(1)));
        assert_eq!(report.grand_total_earnings, 0.0);
    }

    #[test]
    fn test_archive_report_leaders_and_ties() {
        let clock = manual_clock();
        let mut manager = TableManager::with_clock(3, 1.0, clock.clone());

        // Table 2: two short sessions. Table 3: two sessions, one long.
        for _ in 0..2 {
            manager.occupy_table(id(2));
            manager.occupy_table(id(3));
            clock.advance(minutes(1));
            manager.free_table(id(2));
            clock.advance(minutes(9));
            manager.free_table(id(3));
        }

        let report = manager.archive_report();
        assert_eq!(report.most_popular_table_id, Some(TableId::new(2)));
        assert_eq!(report.highest_earning_table_id, Some(TableId::new(3)));
        assert_eq!(report.per_table[1].total_minutes_occupied, 2);
        assert_eq!(report.per_table[2].total_minutes_occupied, 20);
        assert_eq!(report.grand_total_earnings, 22.0);
    }

    #[test]
    fn test_empty_venue_reports() {
        let mut manager = TableManager::new(0, 3.0);

        assert!(!manager.occupy_table(id(1)));
        assert!(manager.list_tables().is_empty());

        let current = manager.current_report();
        assert!(current.per_table.is_empty());
        assert_eq!(current.total_owed_if_all_left_now, 0.0);

        let archive = manager.archive_report();
        assert!(archive.per_table.is_empty());
        assert_eq!(archive.most_popular_table_id, None);
        assert_eq!(archive.highest_earning_table_id, None);
        assert_eq!(archive.grand_total_earnings, 0.0);
    }

    #[test]
    fn test_zero_rate_bills_nothing() {
        let clock = manual_clock();
        let mut manager = TableManager::with_clock(1, 0.0, clock.clone());

        manager.occupy_table(id(1));
        clock.advance(minutes(30));
        manager.free_table(id(1));

        let table = manager.table(id(1)).unwrap();
        assert_eq!(table.total_minutes_occupied(), 30);
        assert_eq!(table.total_earnings(), 0.0);
    }

    #[test]
    fn test_list_tables_shows_session_start() {
        let clock = manual_clock();
        let mut manager = TableManager::with_clock(2, 1.0, clock.clone());
        manager.occupy_table(id(2));

        let tables = manager.list_tables();
        assert_eq!(tables[0].session_start, None);
        assert_eq!(tables[1].session_start, Some(clock.now()));
        assert!(tables[1].occupied);
    }

    #[test]
    fn test_from_policy() {
        let policy = VenuePolicy {
            name: "Test".into(),
            table_count: 4,
            price_per_minute: 1.5,
        };
        let manager = TableManager::from_policy(&policy, manual_clock());

        assert_eq!(manager.table_count(), 4);
        assert_eq!(manager.price_per_minute(), 1.5);
    }
}
