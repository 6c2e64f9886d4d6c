//! Built-in analytic ephemeris.
//!
//! Positions come from the classical low-precision solar theory and the
//! truncated lunar series in the sibling modules. Events are located
//! numerically: horizon crossings by coarse bracketing plus bisection, lunar
//! quarters by Newton iteration on the Moon−Sun elongation.

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use super::coords::{self, normalize_degrees, normalize_pm180};
use super::time::{centuries_tt, from_julian_day, julian_day};
use super::{
    earth, moon, sun, Body, Direction, EclipticPosition, Ephemeris, Equatorial, MoonQuarter,
    MoonQuarterEvent,
};
use crate::observer::Observer;

/// Mean rate of the Moon−Sun elongation in degrees per day.
const MEAN_ELONGATION_RATE: f64 = 360.0 / 29.530588853;

/// Refraction at the horizon assumed for rise/set, in degrees (34′).
const HORIZON_REFRACTION_DEG: f64 = 34.0 / 60.0;

const SUN_RADIUS_KM: f64 = 696_000.0;
const MOON_RADIUS_KM: f64 = 1_737.4;

/// Sampling interval used to bracket horizon crossings, in days (30 minutes).
const RISE_SET_SCAN_STEP: f64 = 30.0 / 1440.0;
/// Bisection stops once the bracket is narrower than one second.
const RISE_SET_TOLERANCE: f64 = 1.0 / 86_400.0;

const PHASE_MAX_ITERATIONS: usize = 30;
const PHASE_TOLERANCE: f64 = 1e-6;

/// Analytic Sun/Moon ephemeris; stateless and cheap to copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeeusEphemeris;

impl MeeusEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Geocentric Moon−Sun elongation at `at`, degrees in `[0, 360)`.
    ///
    /// 0° is New Moon, 90° First Quarter, 180° Full Moon, 270° Last Quarter.
    pub fn elongation(&self, at: DateTime<Utc>) -> f64 {
        elongation_at(julian_day(at))
    }

    fn topocentric(&self, body: Body, jd: f64, observer: &Observer) -> (Equatorial, f64) {
        let t = centuries_tt(jd);
        let pos = ecliptic_position(body, t);
        let (ra, dec) =
            coords::ecliptic_to_equatorial(pos.longitude, pos.latitude, earth::true_obliquity(t));
        let lst = earth::local_sidereal_time(jd, t, observer.longitude);
        let (ra, dec) = coords::topocentric(ra, dec, pos.distance_km, observer.latitude, lst);
        let eq = Equatorial {
            right_ascension: ra / 15.0,
            declination: dec,
            distance_km: pos.distance_km,
        };
        (eq, lst)
    }

    /// Height of the body's centre above the standard rise/set altitude.
    ///
    /// Zero when the upper limb touches the refracted horizon.
    fn horizon_clearance(&self, body: Body, observer: &Observer, jd: f64) -> f64 {
        let (eq, lst) = self.topocentric(body, jd, observer);
        let (altitude, _) = coords::equatorial_to_horizontal(
            eq.right_ascension * 15.0,
            eq.declination,
            observer.latitude,
            lst,
        );
        let radius = match body {
            Body::Sun => SUN_RADIUS_KM,
            Body::Moon => MOON_RADIUS_KM,
        };
        let semi_diameter = (radius / eq.distance_km).asin().to_degrees();
        altitude + HORIZON_REFRACTION_DEG + semi_diameter
    }

    fn bisect_crossing(
        &self,
        body: Body,
        observer: &Observer,
        mut lo: f64,
        mut hi: f64,
        mut f_lo: f64,
    ) -> f64 {
        while hi - lo > RISE_SET_TOLERANCE {
            let mid = 0.5 * (lo + hi);
            let f_mid = self.horizon_clearance(body, observer, mid);
            if (f_mid > 0.0) == (f_lo > 0.0) {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}

fn ecliptic_position(body: Body, t: f64) -> EclipticPosition {
    match body {
        Body::Sun => sun::apparent_position(t),
        Body::Moon => moon::apparent_position(t),
    }
}

fn elongation_at(jd: f64) -> f64 {
    let t = centuries_tt(jd);
    normalize_degrees(moon::apparent_position(t).longitude - sun::apparent_position(t).longitude)
}

impl Ephemeris for MeeusEphemeris {
    fn search_rise_set(
        &self,
        body: Body,
        observer: &Observer,
        direction: Direction,
        start: DateTime<Utc>,
        limit: Duration,
    ) -> Option<DateTime<Utc>> {
        let jd_start = julian_day(start);
        let jd_end = jd_start + limit.num_milliseconds() as f64 / 86_400_000.0;
        let crosses = |before: f64, after: f64| match direction {
            Direction::Rise => before <= 0.0 && after > 0.0,
            Direction::Set => before > 0.0 && after <= 0.0,
        };

        let mut lo = jd_start;
        let mut f_lo = self.horizon_clearance(body, observer, lo);
        while lo < jd_end {
            let hi = (lo + RISE_SET_SCAN_STEP).min(jd_end);
            let f_hi = self.horizon_clearance(body, observer, hi);
            if crosses(f_lo, f_hi) {
                let jd = self.bisect_crossing(body, observer, lo, hi, f_lo);
                return Some(from_julian_day(jd));
            }
            lo = hi;
            f_lo = f_hi;
        }
        trace!(%body, ?direction, %start, "no horizon crossing in search window");
        None
    }

    fn search_moon_quarter(&self, after: DateTime<Utc>) -> Option<MoonQuarterEvent> {
        let jd0 = julian_day(after);
        let e0 = elongation_at(jd0);
        let quarter = MoonQuarter::from_index((e0 / 90.0).floor() as u32 + 1);
        let target = quarter.elongation();

        let mut jd = jd0 + normalize_degrees(target - e0) / MEAN_ELONGATION_RATE;
        for _ in 0..PHASE_MAX_ITERATIONS {
            let correction = normalize_pm180(elongation_at(jd) - target) / MEAN_ELONGATION_RATE;
            jd -= correction;
            if correction.abs() < PHASE_TOLERANCE {
                return Some(MoonQuarterEvent {
                    quarter,
                    time: from_julian_day(jd),
                });
            }
        }
        trace!(?quarter, %after, "lunar phase iteration did not converge");
        None
    }

    fn equator(&self, body: Body, at: DateTime<Utc>, observer: &Observer) -> Equatorial {
        self.topocentric(body, julian_day(at), observer).0
    }
}
