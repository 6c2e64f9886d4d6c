//! User day-offset used to reconcile the computed calendar with a local
//! sighting announcement.

use serde::Serialize;

/// Smallest accepted offset, in days.
pub const MIN_OFFSET: i32 = -3;
/// Largest accepted offset, in days.
pub const MAX_OFFSET: i32 = 3;

/// A day offset that is always within `MIN_OFFSET..=MAX_OFFSET`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Calibration(i32);

impl Calibration {
    /// Clamp `requested` into range.
    pub fn new(requested: i32) -> Self {
        Self(requested.clamp(MIN_OFFSET, MAX_OFFSET))
    }

    /// Replace the offset, returning the value actually stored.
    pub fn set(&mut self, requested: i32) -> i32 {
        *self = Self::new(requested);
        self.0
    }

    pub fn offset(self) -> i32 {
        self.0
    }
}
