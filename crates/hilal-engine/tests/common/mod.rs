//! A deterministic stand-in sky shared by the engine integration tests.
//!
//! Sunsets happen a fixed time after the start of every search window, lunar
//! quarters tick at exactly a quarter of a mean synodic month from a chosen
//! New Moon, and the Moon's altitude is a constant.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use hilal_engine::ephemeris::{
    Body, Direction, Ephemeris, Equatorial, MoonQuarter, MoonQuarterEvent,
};
use hilal_engine::Observer;

/// A quarter of the mean synodic month (29.530588853 days), in milliseconds.
pub const QUARTER_MS: i64 = 637_860_719;

#[derive(Debug)]
pub struct SyntheticSky {
    /// One New Moon; every other quarter follows from it.
    pub epoch: DateTime<Utc>,
    /// Sunset relative to the start of the search window; `None` means the Sun never sets.
    pub sunset_after: Option<Duration>,
    pub moon_altitude: f64,
    /// Quarter searches seeded before this instant come back empty.
    pub quarters_from: Option<DateTime<Utc>>,
    rise_set_calls: AtomicUsize,
}

impl SyntheticSky {
    /// Sunset 18 h after the window start (17:00 UTC for West Africa Time) and
    /// the Moon 5° up.
    pub fn new(epoch: DateTime<Utc>) -> Self {
        Self {
            epoch,
            sunset_after: Some(Duration::hours(18)),
            moon_altitude: 5.0,
            quarters_from: None,
            rise_set_calls: AtomicUsize::new(0),
        }
    }

    pub fn synodic_month() -> Duration {
        Duration::milliseconds(4 * QUARTER_MS)
    }

    pub fn rise_set_calls(&self) -> usize {
        self.rise_set_calls.load(Ordering::SeqCst)
    }
}

impl Ephemeris for SyntheticSky {
    fn search_rise_set(
        &self,
        body: Body,
        _observer: &Observer,
        direction: Direction,
        start: DateTime<Utc>,
        limit: Duration,
    ) -> Option<DateTime<Utc>> {
        self.rise_set_calls.fetch_add(1, Ordering::SeqCst);
        if body != Body::Sun || direction != Direction::Set {
            return None;
        }
        self.sunset_after
            .filter(|offset| *offset <= limit)
            .map(|offset| start + offset)
    }

    fn search_moon_quarter(&self, after: DateTime<Utc>) -> Option<MoonQuarterEvent> {
        if self.quarters_from.is_some_and(|from| after < from) {
            return None;
        }
        let k = (after - self.epoch).num_milliseconds().div_euclid(QUARTER_MS) + 1;
        Some(MoonQuarterEvent {
            quarter: MoonQuarter::from_index(k.rem_euclid(4) as u32),
            time: self.epoch + Duration::milliseconds(k * QUARTER_MS),
        })
    }

    fn equator(&self, _body: Body, _at: DateTime<Utc>, _observer: &Observer) -> Equatorial {
        Equatorial {
            right_ascension: 0.0,
            declination: 0.0,
            distance_km: 384_400.0,
        }
    }

    fn altitude(&self, _body: Body, _at: DateTime<Utc>, _observer: &Observer) -> f64 {
        self.moon_altitude
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}
