//! Memo of resolved months.
//!
//! Resolving a month costs a sunset search, a conjunction scan and an
//! altitude evaluation. For a fixed anchor and observer the result never
//! changes, so descriptors are kept keyed by `(year, month, location)`.
//! Entries are stored without calibration applied.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::month::MonthDescriptor;
use crate::observer::LocationKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
    pub location: LocationKey,
}

/// Thread-safe `(year, month, location) → MonthDescriptor` map.
#[derive(Debug, Default)]
pub struct MonthCache {
    entries: Mutex<HashMap<MonthKey, MonthDescriptor>>,
}

impl MonthCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written entry.
    fn lock(&self) -> MutexGuard<'_, HashMap<MonthKey, MonthDescriptor>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &MonthKey) -> Option<MonthDescriptor> {
        self.lock().get(key).copied()
    }

    pub fn insert(&self, key: MonthKey, descriptor: MonthDescriptor) {
        self.lock().insert(key, descriptor);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
