#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Shooting incident record types shared across the shotmap system.
//!
//! This crate defines the raw CSV row shape produced by the upstream
//! open-data export, the enriched in-memory record the analytics engine
//! reads, and the year/district filter selections with their "ALL"
//! sentinel semantics.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// District code imputed for records with a missing district under
/// [`DistrictPolicy::Impute`]. No real police district uses code 0.
pub const SENTINEL_DISTRICT: u16 = 0;

/// English month name for a 1-based month number.
///
/// # Panics
///
/// Panics if `month` is outside 1-12. Callers derive the value from a
/// parsed calendar date, which cannot produce an out-of-range month.
#[must_use]
pub const fn month_name(month: u8) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => panic!("month out of range"),
    }
}

/// English day name for a weekday number (Monday = 0).
///
/// # Panics
///
/// Panics if `weekday` is outside 0-6.
#[must_use]
pub const fn day_name(weekday: u8) -> &'static str {
    match weekday {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        6 => "Sunday",
        _ => panic!("weekday out of range"),
    }
}

/// Whether the victim of a shooting survived.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum VictimOutcome {
    /// The victim died (`fatal == 1` in the source data).
    Fatal,
    /// The victim survived.
    #[serde(rename = "Non-fatal")]
    #[strum(serialize = "Non-fatal")]
    NonFatal,
}

impl VictimOutcome {
    /// Maps the source data's 0/1 fatality flag to an outcome.
    ///
    /// Anything other than an exact 1 (including a missing flag) is
    /// non-fatal, matching the upstream export's semantics.
    #[must_use]
    pub fn from_fatal_flag(fatal: Option<f64>) -> Self {
        if fatal == Some(1.0) {
            Self::Fatal
        } else {
            Self::NonFatal
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Fatal, Self::NonFatal]
    }
}

/// How the pipeline treats records whose district field is missing.
///
/// A null district cannot be mapped to a choropleth boundary, so one
/// deployment drops such records while another retains them under the
/// sentinel code. The choice is part of the deployment configuration,
/// not an implementation detail.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum DistrictPolicy {
    /// Drop records with a missing district.
    #[default]
    Drop,
    /// Retain records with a missing district under [`SENTINEL_DISTRICT`].
    Impute,
}

/// One row of the upstream shooting-incident CSV export.
///
/// Only the columns the analytics core reads are modeled; the export's
/// remaining descriptive columns are ignored during decode. Numeric
/// columns are float-typed because the upstream database stores them as
/// nullable floats (a district arrives as `"22.0"`, not `"22"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawIncident {
    /// Unique incident identifier (primary key upstream).
    pub objectid: i64,
    /// Incident calendar date as exported (`YYYY-MM-DD`, sometimes with
    /// a trailing time component).
    #[serde(rename = "date_")]
    pub date: String,
    /// Incident time of day, `HH:MM:SS`.
    pub time: String,
    /// Police district code. `None` when the record was not attributed
    /// to a district.
    pub dist: Option<f64>,
    /// Victim age in years.
    pub age: Option<f64>,
    /// Latitude (WGS84).
    pub lat: Option<f64>,
    /// Longitude (WGS84).
    pub lng: Option<f64>,
    /// Fatality flag, 0 or 1.
    pub fatal: Option<f64>,
}

impl RawIncident {
    /// Column names that must be present in the CSV header for decode
    /// to be meaningful. Checked before deserialization so a missing
    /// column surfaces as a schema error, not a per-row decode failure.
    pub const REQUIRED_COLUMNS: &'static [&'static str] = &[
        "objectid", "date_", "time", "dist", "age", "lat", "lng", "fatal",
    ];
}

/// A shooting incident after feature enrichment.
///
/// Every derived field is a pure function of the raw record. Instances
/// are built once at startup (or batch refresh) and never mutated;
/// filtering and aggregation only ever read them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedIncident {
    /// Unique incident identifier.
    pub objectid: i64,
    /// Incident date, timezone-naive.
    pub date: NaiveDate,
    /// Incident time of day.
    pub time: NaiveTime,
    /// Police district code. [`SENTINEL_DISTRICT`] when imputed.
    pub dist: u16,
    /// Victim age in years.
    pub age: Option<f64>,
    /// Latitude (WGS84).
    pub lat: Option<f64>,
    /// Longitude (WGS84).
    pub lng: Option<f64>,
    /// Calendar year of the incident.
    pub year: i32,
    /// Day of week, Monday = 0 through Sunday = 6.
    pub weekday: u8,
    /// ISO week number (1-53).
    pub week_no: u8,
    /// Month number, 1-12.
    pub month: u8,
    /// English month name ("January" .. "December").
    pub month_name: &'static str,
    /// English day name ("Monday" .. "Sunday").
    pub day_name: &'static str,
    /// Day of month, 1-31.
    pub day: u8,
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Victim outcome derived from the fatality flag.
    pub victim_outcome: VictimOutcome,
    /// 1 when the shooting was non-fatal, else 0.
    pub non_fatal: u8,
    /// Constant 1 counting unit, so that a sum over any grouping equals
    /// the record count in that group.
    pub shooting_incidents: u32,
}

/// Year filter selection. `All` is a sentinel meaning "do not restrict
/// on year" and is never compared as a literal year value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YearSelection {
    /// No year restriction.
    #[default]
    All,
    /// Restrict to one calendar year.
    Year(i32),
}

impl YearSelection {
    /// Parses a dropdown value. The UI only ever supplies "ALL" (or the
    /// legacy "All Years" label) and years present in the data, so
    /// anything unrecognized clamps to `All` rather than erroring.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("all years") {
            return Self::All;
        }
        trimmed.parse::<i32>().map_or(Self::All, Self::Year)
    }
}

impl std::fmt::Display for YearSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::Year(year) => write!(f, "{year}"),
        }
    }
}

/// Police district filter selection. `All` is a sentinel meaning "do
/// not restrict on district".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistrictSelection {
    /// No district restriction.
    #[default]
    All,
    /// Restrict to one district code.
    District(u16),
}

impl DistrictSelection {
    /// Parses a dropdown value, clamping anything unrecognized to `All`.
    ///
    /// Accepts both integer codes and the float form the upstream export
    /// uses (`"22"` and `"22.0"` both select district 22).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("all districts") {
            return Self::All;
        }
        if let Ok(code) = trimmed.parse::<u16>() {
            return Self::District(code);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u16::MAX) => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Self::District(f as u16)
            }
            _ => Self::All,
        }
    }
}

impl std::fmt::Display for DistrictSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "ALL"),
            Self::District(code) => write!(f, "{code}"),
        }
    }
}
