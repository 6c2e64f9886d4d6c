//! Optional TOML configuration file.
//!
//! Every section and key may be omitted; omitted values fall back to the
//! engine defaults (the Abuja reference point, the 1 Muharram 1445 anchor,
//! no calibration).
//!
//! ```toml
//! [observer]
//! latitude = 9.0765
//! longitude = 7.3986
//! timezone = "Africa/Lagos"
//!
//! [anchor]
//! gregorian = "2023-07-19"
//! hijri_year = 1445
//!
//! [calibration]
//! offset = 0
//! ```

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use hilal_engine::calendar::{DEFAULT_ANCHOR_DATE, DEFAULT_ANCHOR_YEAR};
use hilal_engine::observer::{ABUJA_LATITUDE, ABUJA_LONGITUDE};
use hilal_engine::{Anchor, Observer};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HilalConfig {
    #[serde(default)]
    pub observer: ObserverToml,

    #[serde(default)]
    pub anchor: AnchorToml,

    #[serde(default)]
    pub calibration: CalibrationToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObserverToml {
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ObserverToml {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
        }
    }
}

fn default_latitude() -> f64 {
    ABUJA_LATITUDE
}
fn default_longitude() -> f64 {
    ABUJA_LONGITUDE
}
fn default_timezone() -> String {
    "Africa/Lagos".to_string()
}

/// Dates are written as quoted ISO strings (`"2023-07-19"`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnchorToml {
    #[serde(default = "default_anchor_date")]
    pub gregorian: NaiveDate,
    #[serde(default = "default_anchor_year")]
    pub hijri_year: i32,
}

impl Default for AnchorToml {
    fn default() -> Self {
        Self {
            gregorian: default_anchor_date(),
            hijri_year: default_anchor_year(),
        }
    }
}

fn default_anchor_date() -> NaiveDate {
    DEFAULT_ANCHOR_DATE
}
fn default_anchor_year() -> i32 {
    DEFAULT_ANCHOR_YEAR
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationToml {
    #[serde(default)]
    pub offset: i32,
}

impl HilalConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config {}", path.display()))
    }

    pub fn observer(&self) -> Result<Observer> {
        let timezone = parse_timezone(&self.observer.timezone)?;
        build_observer(self.observer.latitude, self.observer.longitude, timezone)
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::new(self.anchor.gregorian, self.anchor.hijri_year)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| anyhow!("unknown timezone '{name}' (expected an IANA name such as Africa/Lagos)"))
}

/// An observer with range-checked coordinates.
pub fn build_observer(latitude: f64, longitude: f64, timezone: Tz) -> Result<Observer> {
    if !(-90.0..=90.0).contains(&latitude) {
        bail!("latitude {latitude} is outside -90..=90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        bail!("longitude {longitude} is outside -180..=180");
    }
    Ok(Observer::new(latitude, longitude, timezone))
}
