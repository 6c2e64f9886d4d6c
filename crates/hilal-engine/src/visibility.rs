//! Crescent visibility on the evening of a candidate month-end day.
//!
//! The decision is binary:
//!
//! - the Moon must be at least [`MIN_MOON_AGE_HOURS`] old at local sunset
//!   (measured from the preceding conjunction), and
//! - its refracted topocentric altitude at that sunset must be above 0°.
//!
//! Below the age threshold the altitude is never computed.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{trace, warn};

use crate::conjunction::find_conjunction_before;
use crate::ephemeris::{Body, Ephemeris};
use crate::error::Result;
use crate::observer::Observer;
use crate::sunset::find_sunset;

/// Minimum Moon age at sunset for a crescent to count as visible.
pub const MIN_MOON_AGE_HOURS: f64 = 18.0;

/// The Moon's refracted altitude at sunset must exceed this, in degrees.
pub const MIN_MOON_ALTITUDE_DEG: f64 = 0.0;

/// What the sky looked like at sunset on one civil day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonSnapshot {
    /// Hours between the conjunction and sunset; 0 when either is unknown.
    pub moon_age_hours: f64,
    pub is_visible: bool,
    pub sunset: Option<DateTime<Utc>>,
    pub conjunction: Option<DateTime<Utc>>,
}

impl MoonSnapshot {
    fn not_visible(sunset: Option<DateTime<Utc>>) -> Self {
        Self {
            moon_age_hours: 0.0,
            is_visible: false,
            sunset,
            conjunction: None,
        }
    }
}

/// The visibility rule on its own.
///
/// `altitude_at_sunset` is only called when the age test passes.
pub fn crescent_visible(moon_age_hours: f64, altitude_at_sunset: impl FnOnce() -> f64) -> bool {
    moon_age_hours >= MIN_MOON_AGE_HOURS && altitude_at_sunset() > MIN_MOON_ALTITUDE_DEG
}

fn snapshot<E: Ephemeris>(
    ephemeris: &E,
    observer: &Observer,
    sunset: DateTime<Utc>,
    conjunction: DateTime<Utc>,
) -> MoonSnapshot {
    let moon_age_hours = (sunset - conjunction).num_milliseconds() as f64 / 3_600_000.0;
    let is_visible = crescent_visible(moon_age_hours, || {
        ephemeris.altitude(Body::Moon, sunset, observer)
    });
    trace!(%sunset, %conjunction, moon_age_hours, is_visible, "crescent evaluated");
    MoonSnapshot {
        moon_age_hours,
        is_visible,
        sunset: Some(sunset),
        conjunction: Some(conjunction),
    }
}

/// Evaluate the crescent on the evening of `date`, surfacing locator failures.
///
/// # Errors
///
/// Propagates [`MissingEphemerisEvent`](crate::HilalError::MissingEphemerisEvent)
/// from the sunset search and
/// [`NoConjunctionFound`](crate::HilalError::NoConjunctionFound) from the
/// conjunction search.
pub fn observe_crescent<E: Ephemeris>(
    ephemeris: &E,
    observer: &Observer,
    date: NaiveDate,
) -> Result<MoonSnapshot> {
    let sunset = find_sunset(ephemeris, observer, date)?;
    let conjunction = find_conjunction_before(ephemeris, sunset)?;
    Ok(snapshot(ephemeris, observer, sunset, conjunction))
}

/// Evaluate the crescent on the evening of `date`, treating any locator
/// failure as "not visible".
///
/// Failures are logged at `warn` and the returned snapshot carries whichever
/// instants were found before the failure.
pub fn evaluate_crescent<E: Ephemeris>(
    ephemeris: &E,
    observer: &Observer,
    date: NaiveDate,
) -> MoonSnapshot {
    let sunset = match find_sunset(ephemeris, observer, date) {
        Ok(sunset) => sunset,
        Err(err) => {
            warn!(%date, error = %err, "crescent treated as not visible");
            return MoonSnapshot::not_visible(None);
        }
    };
    match find_conjunction_before(ephemeris, sunset) {
        Ok(conjunction) => snapshot(ephemeris, observer, sunset, conjunction),
        Err(err) => {
            warn!(%date, error = %err, "crescent treated as not visible");
            MoonSnapshot::not_visible(Some(sunset))
        }
    }
}
