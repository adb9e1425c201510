//! Mutex-guarded handle for driving one manager from several tasks

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tabletime_api::{ArchiveReport, CurrentReport, ReasonCode, TableSnapshot};
use tabletime_util::TableId;

use crate::{CoreEvent, TableManager};

/// Cloneable handle to a [`TableManager`].
///
/// Every operation runs entirely under one lock, so a report never sees a
/// table halfway through being released.
#[derive(Debug, Clone)]
pub struct SharedTableManager {
    inner: Arc<Mutex<TableManager>>,
}

impl SharedTableManager {
    pub fn new(manager: TableManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Run `f` with exclusive access to the manager
    pub fn with<R>(&self, f: impl FnOnce(&mut TableManager) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn occupy(&self, id: TableId) -> Result<CoreEvent, ReasonCode> {
        self.lock().occupy(id)
    }

    pub fn free(&self, id: TableId) -> Result<CoreEvent, ReasonCode> {
        self.lock().free(id)
    }

    pub fn toggle(&self, id: TableId) -> Result<CoreEvent, ReasonCode> {
        self.lock().toggle(id)
    }

    pub fn occupy_table(&self, id: TableId) -> bool {
        self.lock().occupy_table(id)
    }

    pub fn free_table(&self, id: TableId) -> bool {
        self.lock().free_table(id)
    }

    pub fn list_tables(&self) -> Vec<TableSnapshot> {
        self.lock().list_tables()
    }

    pub fn current_report(&self) -> CurrentReport {
        self.lock().current_report()
    }

    pub fn archive_report(&self) -> ArchiveReport {
        self.lock().archive_report()
    }

    pub fn total_earnings(&self) -> f64 {
        self.lock().total_earnings()
    }

    fn lock(&self) -> MutexGuard<'_, TableManager> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_clones_share_state() {
        let shared = SharedTableManager::new(TableManager::new(2, 1.0));
        let other = shared.clone();

        assert!(shared.occupy_table(TableId::new(1)));
        assert!(!other.occupy_table(TableId::new(1)));
        assert!(other.free_table(TableId::new(1)));
        assert_eq!(shared.with(|m| m.table(TableId::new(1)).map(|t| t.occupancy_count())), Some(1));
    }

    #[test]
    fn test_concurrent_toggles_keep_totals_consistent() {
        let shared = SharedTableManager::new(TableManager::new(4, 2.0));

        let handles: Vec<_> = (1..=4u32)
            .map(|n| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        shared.toggle(TableId::new(n)).unwrap();
                        let report = shared.archive_report();
                        let sum: f64 = report.per_table.iter().map(|l| l.total_earnings).sum();
                        assert_eq!(sum, report.grand_total_earnings);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let archive = shared.archive_report();
        assert!(archive.per_table.iter().all(|line| line.occupancy_count == 25));
        assert!(shared.list_tables().iter().all(|t| !t.occupied));
    }
}
