//! Crescent visibility: the age gate, the altitude test and degradation of
//! locator failures, all against a synthetic sky.

mod common;

use chrono::Duration;
use common::{date, utc, SyntheticSky};
use hilal_engine::ephemeris::Body;
use hilal_engine::{
    evaluate_crescent, observe_crescent, resolve_month_length, HilalError, MonthLength, Observer,
};

/// Sky whose only New Moon near 2024-01-10 is `age_hours` before that day's sunset.
fn sky_with_age(age_hours: f64) -> SyntheticSky {
    let sunset = utc(2024, 1, 10, 17, 0);
    let age = Duration::milliseconds((age_hours * 3_600_000.0).round() as i64);
    SyntheticSky::new(sunset - age)
}

#[test]
fn sunset_is_searched_from_local_midnight() {
    let sky = sky_with_age(30.0);
    let snap = observe_crescent(&sky, &Observer::abuja(), date(2024, 1, 10)).unwrap();
    // Lagos midnight is 23:00 UTC the previous day; the synthetic Sun sets 18 h later.
    assert_eq!(snap.sunset, Some(utc(2024, 1, 10, 17, 0)));
}

#[test]
fn moon_age_below_threshold_is_not_visible() {
    let mut sky = sky_with_age(17.9);
    sky.moon_altitude = 40.0;
    let snap = evaluate_crescent(&sky, &Observer::abuja(), date(2024, 1, 10));
    assert!((snap.moon_age_hours - 17.9).abs() < 1e-9);
    assert!(!snap.is_visible);
}

#[test]
fn moon_age_above_threshold_with_positive_altitude_is_visible() {
    let sky = sky_with_age(18.1);
    let snap = evaluate_crescent(&sky, &Observer::abuja(), date(2024, 1, 10));
    assert!((snap.moon_age_hours - 18.1).abs() < 1e-9);
    assert!(snap.is_visible);
    assert_eq!(snap.conjunction, Some(sky.epoch));
}

#[test]
fn moon_below_horizon_is_not_visible() {
    let mut sky = sky_with_age(26.0);
    sky.moon_altitude = -0.5;
    let snap = evaluate_crescent(&sky, &Observer::abuja(), date(2024, 1, 10));
    assert!(!snap.is_visible);
}

#[test]
fn missing_sunset_is_an_error_when_observed() {
    let mut sky = sky_with_age(30.0);
    sky.sunset_after = None;
    let day = date(2024, 1, 10);

    let err = observe_crescent(&sky, &Observer::abuja(), day).unwrap_err();
    assert_eq!(
        err,
        HilalError::MissingEphemerisEvent {
            body: Body::Sun,
            date: day
        }
    );
}

#[test]
fn missing_sunset_degrades_to_not_visible() {
    let mut sky = sky_with_age(30.0);
    sky.sunset_after = None;

    let snap = evaluate_crescent(&sky, &Observer::abuja(), date(2024, 1, 10));
    assert!(!snap.is_visible);
    assert_eq!(snap.moon_age_hours, 0.0);
    assert_eq!(snap.sunset, None);
    assert_eq!(snap.conjunction, None);
}

#[test]
fn missing_conjunction_keeps_the_sunset() {
    let mut sky = sky_with_age(30.0);
    sky.quarters_from = Some(utc(2030, 1, 1, 0, 0));

    let snap = evaluate_crescent(&sky, &Observer::abuja(), date(2024, 1, 10));
    assert!(!snap.is_visible);
    assert_eq!(snap.sunset, Some(utc(2024, 1, 10, 17, 0)));
    assert_eq!(snap.conjunction, None);
}

#[test]
fn month_length_is_decided_on_day_29() {
    // Day 1 on 2023-12-13 puts day 29 on 2024-01-10.
    let start = date(2023, 12, 13);
    let observer = Observer::abuja();

    assert_eq!(
        resolve_month_length(&sky_with_age(20.0), &observer, start),
        MonthLength::TwentyNine
    );
    assert_eq!(
        resolve_month_length(&sky_with_age(12.0), &observer, start),
        MonthLength::Thirty
    );
}

#[test]
fn month_length_resolution_is_idempotent() {
    let sky = sky_with_age(18.5);
    let observer = Observer::abuja();
    let start = date(2023, 12, 13);
    let first = resolve_month_length(&sky, &observer, start);
    let second = resolve_month_length(&sky, &observer, start);
    assert_eq!(first, second);
}

#[test]
fn snapshot_serializes_with_optional_instants() {
    let mut sky = sky_with_age(30.0);
    sky.sunset_after = None;
    let snap = evaluate_crescent(&sky, &Observer::abuja(), date(2024, 1, 10));
    let json = serde_json::to_value(snap).unwrap();
    assert_eq!(json["is_visible"], false);
    assert!(json["sunset"].is_null());
}
