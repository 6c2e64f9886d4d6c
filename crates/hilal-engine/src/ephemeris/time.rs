//! Julian dates and the UT → TT correction.

use chrono::{DateTime, Utc};

/// Julian date of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian date (UT) of an instant.
pub fn julian_day(at: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + at.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Instant for a Julian date (UT), rounded to the millisecond.
pub fn from_julian_day(jd: f64) -> DateTime<Utc> {
    let millis = ((jd - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Julian centuries of Terrestrial Time since J2000.0 for a Julian date in UT.
pub fn centuries_tt(jd_ut: f64) -> f64 {
    let jde = jd_ut + delta_t_seconds(jd_ut) / 86_400.0;
    (jde - J2000) / DAYS_PER_CENTURY
}

/// ΔT = TT − UT in seconds (Espenak & Meeus polynomials).
pub fn delta_t_seconds(jd_ut: f64) -> f64 {
    let y = 2000.0 + (jd_ut - J2000) / 365.25;
    if (1986.0..2005.0).contains(&y) {
        let t = y - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t.powi(2)
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if (2005.0..2050.0).contains(&y) {
        let t = y - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else if (2050.0..2150.0).contains(&y) {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
    } else {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    }
}
