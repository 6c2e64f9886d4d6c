//! Backward event search built from a forward-only event source.
//!
//! Ephemeris providers typically answer "what is the next event after S?".
//! [`EventScan`] turns that into "what is the last matching event before T?"
//! by seeding a fixed distance before `T` and stepping forward past each
//! returned event until the bound is crossed.

use chrono::{DateTime, Duration, Utc};

use crate::ephemeris::MoonQuarterEvent;

/// Anything located at a single instant.
pub trait TimedEvent {
    fn instant(&self) -> DateTime<Utc>;
}

impl TimedEvent for MoonQuarterEvent {
    fn instant(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Scan parameters: how far before the bound to start, and how far past each
/// returned event to re-seed the next search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventScan {
    pub seed_offset: Duration,
    pub step: Duration,
}

impl EventScan {
    pub fn new(seed_offset: Duration, step: Duration) -> Self {
        Self { seed_offset, step }
    }

    /// The latest event accepted by `matches` that lies strictly before `bound`.
    ///
    /// `search(seed)` must return the next event after `seed`. The scan stops
    /// at the first matching event at or after `bound`, when the seed moves
    /// past `bound`, or when `search` comes back empty.
    pub fn last_before<T, S, P>(
        &self,
        bound: DateTime<Utc>,
        mut search: S,
        mut matches: P,
    ) -> Option<T>
    where
        T: TimedEvent,
        S: FnMut(DateTime<Utc>) -> Option<T>,
        P: FnMut(&T) -> bool,
    {
        let mut seed = bound - self.seed_offset;
        let mut candidate = None;

        while let Some(event) = search(seed) {
            let at = event.instant();
            if matches(&event) {
                if at >= bound {
                    break;
                }
                candidate = Some(event);
            }
            seed = at + self.step;
            if seed > bound {
                break;
            }
        }

        candidate
    }
}
