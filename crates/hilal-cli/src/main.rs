//! `hilal` CLI — Hijri dates from astronomical crescent visibility.
//!
//! ## Usage
//!
//! ```sh
//! # Today's Hijri date at the reference observer
//! hilal date
//!
//! # A specific Gregorian date, shifted one day by calibration
//! hilal date 2024-03-11 --offset 1
//!
//! # Every Gregorian date of Ramadan 1445, as JSON
//! hilal month 1445 9 --json
//!
//! # Moon age and visibility at sunset
//! hilal moon 2023-07-19 -vv
//!
//! # Observer and anchor from a config file
//! hilal --config hilal.toml date
//! ```

mod config;
mod logging;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand};
use hilal_engine::{HijriCalendar, HijriDate, MeeusEphemeris, MonthDescriptor, MoonSnapshot};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{build_observer, parse_timezone, HilalConfig};

#[derive(Parser)]
#[command(
    name = "hilal",
    version,
    about = "Hijri calendar computed from crescent visibility"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML config file (observer, anchor, calibration)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Calibration offset in days, clamped to -3..=3
    #[arg(long, global = true, allow_hyphen_values = true)]
    offset: Option<i32>,

    /// Observer latitude in degrees (north positive)
    #[arg(long, global = true, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees (east positive)
    #[arg(long, global = true, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Observer IANA timezone, e.g. Africa/Lagos
    #[arg(long, global = true)]
    tz: Option<String>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a Gregorian date (today when omitted) to a Hijri date
    Date {
        /// Gregorian date, YYYY-MM-DD
        date: Option<NaiveDate>,
    },
    /// List every Gregorian date of a Hijri month
    Month {
        /// Hijri year, e.g. 1445
        year: i32,
        /// Hijri month, 1 (Muharram) to 12 (Dhu Al-Hijjah)
        month: u32,
    },
    /// Show moon age and crescent visibility at sunset on a Gregorian date
    Moon {
        /// Gregorian date, YYYY-MM-DD
        date: NaiveDate,
    },
}

#[derive(Serialize)]
struct DateOutput {
    gregorian: NaiveDate,
    #[serde(flatten)]
    hijri: HijriDate,
    calibration: i32,
}

#[derive(Serialize)]
struct MonthOutput {
    #[serde(flatten)]
    month: MonthDescriptor,
    month_name: &'static str,
    days: Vec<NaiveDate>,
    calibration: i32,
}

#[derive(Serialize)]
struct MoonOutput {
    date: NaiveDate,
    #[serde(flatten)]
    snapshot: MoonSnapshot,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let calendar = build_calendar(&cli)?;

    match cli.command {
        Commands::Date { date } => {
            let date = date.unwrap_or_else(|| calendar.observer().today());
            let hijri = calendar
                .date_to_hijri(date)
                .with_context(|| format!("Failed to convert {date}"))?;
            if cli.json {
                print_json(&DateOutput {
                    gregorian: date,
                    hijri,
                    calibration: calendar.calibration(),
                })?;
            } else {
                println!("{hijri}");
            }
        }
        Commands::Month { year, month } => {
            let descriptor = calendar
                .hijri_month(year, month)
                .with_context(|| format!("Failed to resolve Hijri month {month}/{year}"))?;
            let days: Vec<NaiveDate> = descriptor.days().collect();
            if cli.json {
                print_json(&MonthOutput {
                    month: descriptor,
                    month_name: descriptor.month_name(),
                    days,
                    calibration: calendar.calibration(),
                })?;
            } else {
                for day in days {
                    println!("{day}");
                }
            }
        }
        Commands::Moon { date } => {
            let snapshot = calendar
                .moon_snapshot(date)
                .with_context(|| format!("Failed to evaluate the crescent on {date}"))?;
            if cli.json {
                print_json(&MoonOutput { date, snapshot })?;
            } else {
                print_moon(date, &snapshot);
            }
        }
    }

    Ok(())
}

/// Assemble the calendar: config file first, then command-line overrides.
fn build_calendar(cli: &Cli) -> Result<HijriCalendar> {
    let config = match &cli.config {
        Some(path) => HilalConfig::load(path)?,
        None => HilalConfig::default(),
    };

    let configured = config.observer()?;
    let timezone = match &cli.tz {
        Some(name) => parse_timezone(name)?,
        None => configured.timezone,
    };
    let observer = build_observer(
        cli.lat.unwrap_or(configured.latitude),
        cli.lng.unwrap_or(configured.longitude),
        timezone,
    )?;
    info!(
        latitude = observer.latitude,
        longitude = observer.longitude,
        timezone = %observer.timezone,
        "observer"
    );

    let mut calendar = HijriCalendar::new(MeeusEphemeris, observer, config.anchor());
    let requested = cli.offset.unwrap_or(config.calibration.offset);
    let stored = calendar.set_calibration(requested);
    if stored != requested {
        warn!(requested, stored, "calibration offset clamped");
    }
    Ok(calendar)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}

fn format_instant(instant: Option<DateTime<Utc>>) -> String {
    instant
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_moon(date: NaiveDate, snapshot: &MoonSnapshot) {
    println!("Date:         {date}");
    println!("Sunset:       {}", format_instant(snapshot.sunset));
    println!("Conjunction:  {}", format_instant(snapshot.conjunction));
    println!("Moon age:     {:.1} hours", snapshot.moon_age_hours);
    println!(
        "Visible:      {}",
        if snapshot.is_visible { "yes" } else { "no" }
    );
}
