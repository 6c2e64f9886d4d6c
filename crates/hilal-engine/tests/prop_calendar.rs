//! Property-based tests for the calendar walker using proptest.
//!
//! A single calendar is shared across cases so resolved months are reused
//! through the month cache.

use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use hilal_engine::HijriCalendar;
use proptest::prelude::*;

fn calendar() -> &'static HijriCalendar {
    static CALENDAR: OnceLock<HijriCalendar> = OnceLock::new();
    CALENDAR.get_or_init(HijriCalendar::default)
}

fn anchor() -> NaiveDate {
    calendar().anchor().gregorian
}

/// A date within roughly two Hijri years of the anchor.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..700).prop_map(|offset| anchor() + Duration::days(offset))
}

/// A Hijri month within the same range.
fn arb_month() -> impl Strategy<Value = (i32, u32)> {
    (1445i32..=1446, 1u32..=12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn converted_dates_are_in_bounds(d in arb_date()) {
        let h = calendar().date_to_hijri(d).unwrap();
        prop_assert!((1..=12).contains(&h.month));
        let month = calendar().hijri_month(h.year, h.month).unwrap();
        prop_assert!(h.day >= 1 && h.day <= month.length.days());
    }

    #[test]
    fn month_days_round_trip((year, month) in arb_month()) {
        let days = calendar().gregorian_days(year, month).unwrap();
        for (i, d) in days.iter().enumerate() {
            let h = calendar().date_to_hijri(*d).unwrap();
            prop_assert_eq!((h.year, h.month, h.day), (year, month, i as u32 + 1));
        }
    }

    #[test]
    fn consecutive_dates_advance_by_one_day(d in arb_date()) {
        let today = calendar().date_to_hijri(d).unwrap();
        let tomorrow = calendar().date_to_hijri(d + Duration::days(1)).unwrap();
        if tomorrow.day == 1 {
            prop_assert!(today.day == 29 || today.day == 30);
        } else {
            prop_assert_eq!(tomorrow.day, today.day + 1);
            prop_assert_eq!((tomorrow.year, tomorrow.month), (today.year, today.month));
        }
    }
}
