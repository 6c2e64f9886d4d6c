//! Hijri month names and the date value returned by conversions.

use std::fmt;

use serde::Serialize;

/// Month names in calendar order, Muharram first.
pub const HIJRI_MONTH_NAMES: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' Al-Awwal",
    "Rabi' Al-Thani",
    "Jumada Al-Awwal",
    "Jumada Al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu Al-Qi'dah",
    "Dhu Al-Hijjah",
];

/// Name of month `month` (1-based), or `None` outside 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month.checked_sub(1)?).ok()?;
    HIJRI_MONTH_NAMES.get(index).copied()
}

/// The month after `(year, month)`, rolling the year after Dhu Al-Hijjah.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// A Hijri calendar date.
///
/// Displays as `"<day> <month name> <year>"`, e.g. `1 Muharram 1445`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HijriDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub month_name: &'static str,
}

impl HijriDate {
    /// Build a date; `month_name` is filled from `month` (empty when out of range).
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self {
            day,
            month,
            year,
            month_name: month_name(month).unwrap_or_default(),
        }
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.day, self.month_name, self.year)
    }
}
