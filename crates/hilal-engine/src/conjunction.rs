//! The most recent New Moon (Sun–Moon conjunction) before a given instant.
//!
//! Lunar-quarter searches only look forward, so the locator seeds a search
//! well before the bound and walks forward through every quarter, keeping
//! the last New Moon that still precedes the bound.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::ephemeris::{Ephemeris, MoonQuarter, MoonQuarterEvent};
use crate::error::{HilalError, Result};
use crate::search::EventScan;

/// How far before the bound the primary search is seeded. Longer than one
/// synodic month so at least one New Moon is always in range.
pub const CONJUNCTION_SEED_DAYS: i64 = 35;

/// Gap between a returned quarter event and the next search seed, in hours.
pub const QUARTER_SEARCH_STEP_HOURS: i64 = 1;

/// Seed of the single fallback search used when the primary scan finds nothing.
pub const FALLBACK_SEED_DAYS: i64 = 4;

/// The scan used by [`find_conjunction_before`].
pub fn conjunction_scan() -> EventScan {
    EventScan::new(
        Duration::days(CONJUNCTION_SEED_DAYS),
        Duration::hours(QUARTER_SEARCH_STEP_HOURS),
    )
}

/// Most recent New Moon strictly before `bound`.
///
/// # Errors
///
/// [`HilalError::NoConjunctionFound`] when neither the primary scan nor the
/// fallback search yields a New Moon before `bound`.
pub fn find_conjunction_before<E: Ephemeris>(
    ephemeris: &E,
    bound: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    let is_new_moon = |q: &MoonQuarterEvent| q.quarter == MoonQuarter::New;

    if let Some(event) =
        conjunction_scan().last_before(bound, |seed| ephemeris.search_moon_quarter(seed), is_new_moon)
    {
        debug!(%bound, conjunction = %event.time, "located conjunction");
        return Ok(event.time);
    }

    warn!(%bound, "primary conjunction scan found nothing, trying fallback");
    let seed = bound - Duration::days(FALLBACK_SEED_DAYS);
    match ephemeris.search_moon_quarter(seed) {
        Some(event) if is_new_moon(&event) && event.time < bound => Ok(event.time),
        _ => Err(HilalError::NoConjunctionFound { bound }),
    }
}
