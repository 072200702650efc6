use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bakery_display::DisplayCaseId;

use crate::error::StoreError;

/// Per-case write serialization.
///
/// Regenerations of the same case run one at a time; different cases never
/// wait for each other. Readers do not take these locks.
///
/// Entries are never evicted: the table holds one lock per case id ever
/// seen, which is bounded by the number of registered cases.
#[derive(Debug, Default)]
pub struct CaseLocks {
    locks: Mutex<HashMap<DisplayCaseId, Arc<Mutex<()>>>>,
}

impl CaseLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock handle for `case_id`, created on first use.
    pub fn handle(&self, case_id: DisplayCaseId) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::poisoned("case lock table"))?;
        Ok(Arc::clone(locks.entry(case_id).or_default()))
    }
}

/// Acquire a case lock. The lock guards no data, so poisoning is ignored.
pub fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_case_shares_one_lock() {
        let locks = CaseLocks::new();
        let case = DisplayCaseId::generate();
        let a = locks.handle(case).unwrap();
        let b = locks.handle(case).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        let other = locks.handle(DisplayCaseId::generate()).unwrap();
        assert!(!Arc::ptr_eq(&a, &other));
    }

    #[test]
    fn different_cases_do_not_block_each_other() {
        let locks = CaseLocks::new();
        let a = locks.handle(DisplayCaseId::generate()).unwrap();
        let b = locks.handle(DisplayCaseId::generate()).unwrap();

        let _held = acquire(&a);
        assert!(b.try_lock().is_ok());
        assert!(a.try_lock().is_err());
    }

    #[test]
    fn poisoned_lock_is_still_usable() {
        let locks = CaseLocks::new();
        let handle = locks.handle(DisplayCaseId::generate()).unwrap();

        let poisoner = Arc::clone(&handle);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("writer died");
        })
        .join();

        assert!(handle.is_poisoned());
        drop(acquire(&handle));
    }
}
