//! Month lengths and month descriptors.

use chrono::{Duration, NaiveDate};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::ephemeris::Ephemeris;
use crate::hijri::month_name;
use crate::observer::Observer;
use crate::visibility::evaluate_crescent;

/// Offset from day 1 to the evening on which the crescent is sought.
pub const CRESCENT_CHECK_OFFSET_DAYS: i64 = 28;

/// A Hijri month is either 29 or 30 days; nothing else is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthLength {
    TwentyNine,
    Thirty,
}

impl MonthLength {
    /// 29 when the crescent was seen on day 29, otherwise 30.
    pub fn from_visibility(crescent_visible: bool) -> Self {
        if crescent_visible {
            MonthLength::TwentyNine
        } else {
            MonthLength::Thirty
        }
    }

    pub fn days(self) -> u32 {
        match self {
            MonthLength::TwentyNine => 29,
            MonthLength::Thirty => 30,
        }
    }
}

impl Serialize for MonthLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.days())
    }
}

/// Decide the length of the month whose first day is `start`.
///
/// The crescent is evaluated at sunset on day 29 (`start + 28 days`); a
/// sighting ends the month that evening. Provider failures count as "not
/// seen", so the result is always defined.
pub fn resolve_month_length<E: Ephemeris>(
    ephemeris: &E,
    observer: &Observer,
    start: NaiveDate,
) -> MonthLength {
    let day29 = start + Duration::days(CRESCENT_CHECK_OFFSET_DAYS);
    let snapshot = evaluate_crescent(ephemeris, observer, day29);
    let length = MonthLength::from_visibility(snapshot.is_visible);
    debug!(
        %start,
        length = length.days(),
        moon_age_hours = snapshot.moon_age_hours,
        "resolved month length"
    );
    length
}

/// One resolved Hijri month and its Gregorian extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthDescriptor {
    pub year: i32,
    /// 1 = Muharram … 12 = Dhu Al-Hijjah.
    pub month: u32,
    pub length: MonthLength,
    /// Gregorian date of day 1.
    pub start: NaiveDate,
    /// Gregorian date of the last day (inclusive).
    pub end: NaiveDate,
}

impl MonthDescriptor {
    pub fn new(year: i32, month: u32, start: NaiveDate, length: MonthLength) -> Self {
        Self {
            year,
            month,
            length,
            start,
            end: start + Duration::days(i64::from(length.days()) - 1),
        }
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month).unwrap_or_default()
    }

    /// Day 1 of the following month.
    pub fn next_start(&self) -> NaiveDate {
        self.end + Duration::days(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every Gregorian date of the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.start.iter_days().take(self.length.days() as usize)
    }

    /// The same month with its Gregorian extent moved by `days`.
    pub fn shifted(self, days: i64) -> Self {
        let delta = Duration::days(days);
        Self {
            start: self.start + delta,
            end: self.end + delta,
            ..self
        }
    }
}
