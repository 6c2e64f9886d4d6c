//! The ephemeris boundary: everything the calendar needs to know about the sky.
//!
//! [`Ephemeris`] is the narrow provider interface the locators consume. It can
//! be backed by any astronomy library; [`MeeusEphemeris`] is the built-in
//! analytic implementation, accurate to well under a minute for conjunction
//! and sunset instants over the supported era.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::observer::Observer;

mod coords;
mod earth;
mod meeus;
mod moon;
mod sun;
pub mod time;

pub use meeus::MeeusEphemeris;

/// A body the provider can locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Body {
    Sun,
    Moon,
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Sun => f.write_str("Sun"),
            Body::Moon => f.write_str("Moon"),
        }
    }
}

/// Which horizon crossing a rise/set search looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rise,
    Set,
}

/// The four principal lunar phases, numbered by Moon−Sun elongation / 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MoonQuarter {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl MoonQuarter {
    /// Quarter whose elongation is `index * 90°`, taken modulo 4.
    pub fn from_index(index: u32) -> Self {
        match index % 4 {
            0 => MoonQuarter::New,
            1 => MoonQuarter::FirstQuarter,
            2 => MoonQuarter::Full,
            _ => MoonQuarter::LastQuarter,
        }
    }

    /// Moon−Sun elongation at this phase, in degrees.
    pub fn elongation(self) -> f64 {
        match self {
            MoonQuarter::New => 0.0,
            MoonQuarter::FirstQuarter => 90.0,
            MoonQuarter::Full => 180.0,
            MoonQuarter::LastQuarter => 270.0,
        }
    }
}

/// A lunar phase event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoonQuarterEvent {
    pub quarter: MoonQuarter,
    pub time: DateTime<Utc>,
}

/// Apparent topocentric equatorial coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in hours, `[0, 24)`.
    pub right_ascension: f64,
    /// Declination in degrees.
    pub declination: f64,
    /// Geocentric distance in km.
    pub distance_km: f64,
}

/// Horizontal coordinates, refraction included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    pub altitude: f64,
    /// Degrees from north through east.
    pub azimuth: f64,
}

/// Ecliptic-of-date position used internally by the analytic theories.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EclipticPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub distance_km: f64,
}

/// The sky model consumed by the sunset and conjunction locators.
///
/// All instants are UTC. Implementations must be deterministic: the same
/// arguments always produce the same answer.
pub trait Ephemeris {
    /// First rise or set of `body` after `start`, if one occurs within `limit`.
    fn search_rise_set(
        &self,
        body: Body,
        observer: &Observer,
        direction: Direction,
        start: DateTime<Utc>,
        limit: Duration,
    ) -> Option<DateTime<Utc>>;

    /// The next lunar quarter event strictly after `after`.
    fn search_moon_quarter(&self, after: DateTime<Utc>) -> Option<MoonQuarterEvent>;

    /// Apparent topocentric right ascension/declination of `body` at `at`.
    fn equator(&self, body: Body, at: DateTime<Utc>, observer: &Observer) -> Equatorial;

    /// Convert equatorial coordinates to altitude/azimuth with normal refraction.
    fn horizon(&self, at: DateTime<Utc>, observer: &Observer, eq: &Equatorial) -> Horizontal {
        let jd = time::julian_day(at);
        let lst = earth::local_sidereal_time(jd, time::centuries_tt(jd), observer.longitude);
        let (altitude, azimuth) = coords::equatorial_to_horizontal(
            eq.right_ascension * 15.0,
            eq.declination,
            observer.latitude,
            lst,
        );
        Horizontal {
            altitude: altitude + coords::refraction(altitude),
            azimuth,
        }
    }

    /// Refracted topocentric altitude of `body` in degrees.
    fn altitude(&self, body: Body, at: DateTime<Utc>, observer: &Observer) -> f64 {
        let eq = self.equator(body, at, observer);
        self.horizon(at, observer, &eq).altitude
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn search_rise_set(
        &self,
        body: Body,
        observer: &Observer,
        direction: Direction,
        start: DateTime<Utc>,
        limit: Duration,
    ) -> Option<DateTime<Utc>> {
        (**self).search_rise_set(body, observer, direction, start, limit)
    }

    fn search_moon_quarter(&self, after: DateTime<Utc>) -> Option<MoonQuarterEvent> {
        (**self).search_moon_quarter(after)
    }

    fn equator(&self, body: Body, at: DateTime<Utc>, observer: &Observer) -> Equatorial {
        (**self).equator(body, at, observer)
    }

    fn horizon(&self, at: DateTime<Utc>, observer: &Observer, eq: &Equatorial) -> Horizontal {
        (**self).horizon(at, observer, eq)
    }

    fn altitude(&self, body: Body, at: DateTime<Utc>, observer: &Observer) -> f64 {
        (**self).altitude(body, at, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_index_wraps() {
        assert_eq!(MoonQuarter::from_index(0), MoonQuarter::New);
        assert_eq!(MoonQuarter::from_index(3), MoonQuarter::LastQuarter);
        assert_eq!(MoonQuarter::from_index(4), MoonQuarter::New);
        assert_eq!(MoonQuarter::Full.elongation(), 180.0);
    }
}
