//! The calendar walker.
//!
//! Every conversion starts at a known anchor (a Gregorian date that is
//! 1 Muharram of some Hijri year) and steps forward one month at a time,
//! resolving each month's length from the sky. Both query directions share
//! the same step function, so they always agree on where months begin.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use hilal_engine::HijriCalendar;
//!
//! let calendar = HijriCalendar::default();
//! let date = NaiveDate::from_ymd_opt(2023, 7, 19).unwrap();
//! assert_eq!(calendar.date_to_hijri(date)?.to_string(), "1 Muharram 1445");
//! # Ok::<(), hilal_engine::HilalError>(())
//! ```

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, trace};

use crate::cache::{MonthCache, MonthKey};
use crate::calibration::Calibration;
use crate::ephemeris::{Ephemeris, MeeusEphemeris};
use crate::error::{HilalError, Result};
use crate::hijri::{next_month, HijriDate};
use crate::month::{resolve_month_length, MonthDescriptor};
use crate::observer::Observer;
use crate::visibility::{observe_crescent, MoonSnapshot};

/// Gregorian date of the default anchor, 1 Muharram 1445.
pub const DEFAULT_ANCHOR_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 7, 19) {
    Some(date) => date,
    None => panic!("invalid anchor date"),
};

/// Hijri year of the default anchor.
pub const DEFAULT_ANCHOR_YEAR: i32 = 1445;

/// The fixed correspondence every walk starts from: `gregorian` is
/// 1 Muharram `hijri_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Anchor {
    pub gregorian: NaiveDate,
    pub hijri_year: i32,
}

impl Anchor {
    pub fn new(gregorian: NaiveDate, hijri_year: i32) -> Self {
        Self {
            gregorian,
            hijri_year,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::new(DEFAULT_ANCHOR_DATE, DEFAULT_ANCHOR_YEAR)
    }
}

/// Hijri calendar for one observer, computed from crescent visibility.
///
/// Queries take `&self`; resolved months are memoised internally.
#[derive(Debug)]
pub struct HijriCalendar<E: Ephemeris = MeeusEphemeris> {
    ephemeris: E,
    observer: Observer,
    anchor: Anchor,
    calibration: Calibration,
    cache: MonthCache,
}

impl Default for HijriCalendar<MeeusEphemeris> {
    fn default() -> Self {
        Self::new(MeeusEphemeris, Observer::abuja(), Anchor::default())
    }
}

impl<E: Ephemeris> HijriCalendar<E> {
    pub fn new(ephemeris: E, observer: Observer, anchor: Anchor) -> Self {
        Self {
            ephemeris,
            observer,
            anchor,
            calibration: Calibration::default(),
            cache: MonthCache::new(),
        }
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Current day offset, always within `-3..=3`.
    pub fn calibration(&self) -> i32 {
        self.calibration.offset()
    }

    /// Set the day offset, clamped to `-3..=3`. Returns the stored value.
    pub fn set_calibration(&mut self, requested: i32) -> i32 {
        let stored = self.calibration.set(requested);
        if stored != requested {
            debug!(requested, stored, "calibration clamped");
        }
        stored
    }

    /// Move the calendar to another observing site. Drops memoised months.
    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = observer;
        self.cache.clear();
    }

    /// Re-anchor the calendar. Drops memoised months.
    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.anchor = anchor;
        self.cache.clear();
    }

    /// Number of months currently memoised.
    pub fn cached_months(&self) -> usize {
        self.cache.len()
    }

    /// Hijri date of a Gregorian civil date, calibration applied.
    ///
    /// # Errors
    ///
    /// [`HilalError::PreAnchorDate`] when the calibrated date precedes the anchor.
    pub fn date_to_hijri(&self, date: NaiveDate) -> Result<HijriDate> {
        let (month, effective) = self.locate(date)?;
        let day = (effective - month.start).num_days() as u32 + 1;
        Ok(HijriDate::new(month.year, month.month, day))
    }

    /// Hijri date of the observer's current civil day.
    pub fn today(&self) -> Result<HijriDate> {
        self.date_to_hijri(self.observer.today())
    }

    /// The month containing `date`, its Gregorian extent calibrated like
    /// [`hijri_month`](Self::hijri_month).
    pub fn month_containing(&self, date: NaiveDate) -> Result<MonthDescriptor> {
        let (month, _) = self.locate(date)?;
        Ok(month.shifted(-i64::from(self.calibration())))
    }

    /// Gregorian extent of Hijri month `month` of `year`.
    ///
    /// With a non-zero calibration the extent is moved so that
    /// `date_to_hijri` of every emitted day lands back in this month.
    ///
    /// # Errors
    ///
    /// [`HilalError::InvalidMonth`] for `month` outside 1..=12 and
    /// [`HilalError::PreAnchorMonth`] for months before the anchor year.
    pub fn hijri_month(&self, year: i32, month: u32) -> Result<MonthDescriptor> {
        if !(1..=12).contains(&month) {
            return Err(HilalError::InvalidMonth(month));
        }
        if year < self.anchor.hijri_year {
            return Err(HilalError::PreAnchorMonth { year, month });
        }
        let found = self.walk_until(|m| m.year == year && m.month == month);
        Ok(found.shifted(-i64::from(self.calibration())))
    }

    /// Every Gregorian date of Hijri month `month` of `year`, in order.
    pub fn gregorian_days(&self, year: i32, month: u32) -> Result<Vec<NaiveDate>> {
        Ok(self.hijri_month(year, month)?.days().collect())
    }

    /// Raw crescent evaluation for the evening of `date` (no calibration).
    ///
    /// # Errors
    ///
    /// Sunset or conjunction search failures are returned rather than
    /// degraded to "not visible".
    pub fn moon_snapshot(&self, date: NaiveDate) -> Result<MoonSnapshot> {
        observe_crescent(&self.ephemeris, &self.observer, date)
    }

    fn locate(&self, date: NaiveDate) -> Result<(MonthDescriptor, NaiveDate)> {
        let effective = date + Duration::days(i64::from(self.calibration()));
        if effective < self.anchor.gregorian {
            return Err(HilalError::PreAnchorDate {
                date,
                anchor: self.anchor.gregorian,
            });
        }
        let month = self.walk_until(|m| m.next_start() > effective);
        Ok((month, effective))
    }

    /// Walk forward from the anchor month until `stop` accepts a month.
    ///
    /// Callers guarantee `stop` eventually holds for a month at or after the anchor.
    fn walk_until(&self, mut stop: impl FnMut(&MonthDescriptor) -> bool) -> MonthDescriptor {
        let mut current = self.resolve(self.anchor.hijri_year, 1, self.anchor.gregorian);
        let mut steps = 0u32;
        while !stop(&current) {
            let (year, month) = next_month(current.year, current.month);
            current = self.resolve(year, month, current.next_start());
            steps += 1;
        }
        trace!(steps, year = current.year, month = current.month, "walk finished");
        current
    }

    fn resolve(&self, year: i32, month: u32, start: NaiveDate) -> MonthDescriptor {
        let key = MonthKey {
            year,
            month,
            location: self.observer.location_key(),
        };
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }
        let length = resolve_month_length(&self.ephemeris, &self.observer, start);
        let descriptor = MonthDescriptor::new(year, month, start, length);
        self.cache.insert(key, descriptor);
        descriptor
    }
}
