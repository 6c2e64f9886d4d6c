//! The fixed observing site whose sky decides every month length.
//!
//! Crescent visibility is a single national decision, so the calendar is
//! computed for one reference point rather than for the end user's position.

use chrono::{DateTime, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

/// Latitude of the canonical reference point (Abuja), degrees north.
pub const ABUJA_LATITUDE: f64 = 9.0765;
/// Longitude of the canonical reference point (Abuja), degrees east.
pub const ABUJA_LONGITUDE: f64 = 7.3986;

/// A ground observer at sea level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    /// Geodetic latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
    /// Civil timezone used to decide where a calendar day begins.
    pub timezone: Tz,
}

/// Hashable identity of an observer, used as part of the month cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocationKey {
    lat_micro_deg: i64,
    lng_micro_deg: i64,
    timezone: Tz,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64, timezone: Tz) -> Self {
        Self {
            latitude,
            longitude,
            timezone,
        }
    }

    /// The national reference point: Abuja, Nigeria (West Africa Time).
    pub fn abuja() -> Self {
        Self::new(ABUJA_LATITUDE, ABUJA_LONGITUDE, chrono_tz::Africa::Lagos)
    }

    /// The UTC instant at which `date` begins in the observer's timezone.
    ///
    /// If local midnight does not exist (a DST gap at 00:00), the first
    /// existing instant of the day is used instead.
    pub fn local_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let mut naive = date.and_time(chrono::NaiveTime::MIN);
        loop {
            match self.timezone.from_local_datetime(&naive) {
                LocalResult::Single(dt) => return dt.with_timezone(&Utc),
                LocalResult::Ambiguous(earliest, _) => return earliest.with_timezone(&Utc),
                LocalResult::None => naive += chrono::Duration::minutes(30),
            }
        }
    }

    /// The civil date of `instant` in the observer's timezone.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// The observer's current civil date.
    pub fn today(&self) -> NaiveDate {
        self.local_date(Utc::now())
    }

    pub fn location_key(&self) -> LocationKey {
        LocationKey {
            lat_micro_deg: (self.latitude * 1e6).round() as i64,
            lng_micro_deg: (self.longitude * 1e6).round() as i64,
            timezone: self.timezone,
        }
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::abuja()
    }
}
