//! Local sunset for an observer on a civil day.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::debug;

use crate::ephemeris::{Body, Direction, Ephemeris};
use crate::error::{HilalError, Result};
use crate::observer::Observer;

/// How far past local midnight the sunset search looks, in hours.
pub const SUNSET_SEARCH_HOURS: i64 = 24;

/// The first Sun-setting event within 24 hours of local midnight on `date`.
///
/// # Errors
///
/// [`HilalError::MissingEphemerisEvent`] when the Sun does not set in the
/// window (polar day, or a provider failure).
pub fn find_sunset<E: Ephemeris>(
    ephemeris: &E,
    observer: &Observer,
    date: NaiveDate,
) -> Result<DateTime<Utc>> {
    let day_start = observer.local_midnight(date);
    let sunset = ephemeris
        .search_rise_set(
            Body::Sun,
            observer,
            Direction::Set,
            day_start,
            Duration::hours(SUNSET_SEARCH_HOURS),
        )
        .ok_or(HilalError::MissingEphemerisEvent {
            body: Body::Sun,
            date,
        })?;
    debug!(%date, %sunset, "located sunset");
    Ok(sunset)
}
