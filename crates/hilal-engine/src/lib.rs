//! # hilal-engine
//!
//! Gregorian ↔ Hijri conversion driven by astronomical crescent visibility.
//!
//! Instead of an arithmetic (tabular) Hijri calendar, every month length is
//! decided from the sky over a single reference observer: a month ends after
//! 29 days if, at sunset on day 29, the Moon is at least 18 hours past
//! conjunction and above the horizon; otherwise it runs to 30 days.
//!
//! ## Modules
//!
//! - [`ephemeris`] — the sky model trait plus a built-in analytic implementation
//! - [`search`] — "last event before a bound" scan over a forward-only source
//! - [`sunset`] — local sunset for a civil day
//! - [`conjunction`] — most recent New Moon before an instant
//! - [`visibility`] — the age + altitude crescent rule
//! - [`month`] — 29/30-day resolution and month descriptors
//! - [`calendar`] — the anchor-based walker behind both query directions
//! - [`cache`] — memo of resolved months per observer
//! - [`observer`] — the reference site and its civil timezone
//! - [`calibration`] — the bounded user day offset
//! - [`hijri`] — month names and the `HijriDate` value
//! - [`error`] — Error types

pub mod cache;
pub mod calendar;
pub mod calibration;
pub mod conjunction;
pub mod ephemeris;
pub mod error;
pub mod hijri;
pub mod month;
pub mod observer;
pub mod search;
pub mod sunset;
pub mod visibility;

pub use calendar::{Anchor, HijriCalendar};
pub use calibration::Calibration;
pub use conjunction::find_conjunction_before;
pub use ephemeris::{Ephemeris, MeeusEphemeris};
pub use error::HilalError;
pub use hijri::{month_name, HijriDate, HIJRI_MONTH_NAMES};
pub use month::{resolve_month_length, MonthDescriptor, MonthLength};
pub use observer::Observer;
pub use sunset::find_sunset;
pub use visibility::{evaluate_crescent, observe_crescent, MoonSnapshot};
