#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Feature enrichment pipeline for shooting incident records.
//!
//! Converts raw CSV rows into [`EnrichedIncident`]s through a fixed
//! sequence of pure stages: date/time normalization, time-derived
//! feature computation, outcome/indicator features, and the configurable
//! missing-district policy. The pipeline is all-or-nothing: a single
//! unparseable date or time aborts enrichment, because a silently
//! skipped record would distort every downstream aggregation.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use shotmap_models::{
    DistrictPolicy, EnrichedIncident, RawIncident, SENTINEL_DISTRICT, VictimOutcome, day_name,
    month_name,
};
use thiserror::Error;

/// Errors that can occur during enrichment.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A record's date or time field could not be parsed.
    #[error("record {objectid}: could not parse {field} value '{value}'")]
    Parse {
        /// Primary key of the offending record.
        objectid: i64,
        /// Name of the unparseable field.
        field: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// Parses an incident date as a timezone-naive calendar date.
///
/// The upstream export has emitted several shapes over time: a bare
/// date, an ISO datetime with optional fractional seconds, and an RFC
/// 3339 datetime with a `Z` suffix. Any timezone information is
/// discarded.
#[must_use]
pub fn parse_incident_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc().date());
    }
    None
}

/// Parses an incident time of day from the export's fixed `HH:MM:SS`
/// pattern.
#[must_use]
pub fn parse_incident_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S").ok()
}

/// Converts the export's float-typed district code to an integer code.
/// Returns `None` for missing, non-integral, or out-of-range values.
fn district_code(dist: Option<f64>) -> Option<u16> {
    let code = dist?;
    if code.is_finite() && code >= 0.0 && code.fract() == 0.0 && code <= f64::from(u16::MAX) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(code as u16)
    } else {
        None
    }
}

/// Enriches one raw record. Fails if the date or time cannot be parsed;
/// returns `Ok(None)` when the record has no district and the policy is
/// [`DistrictPolicy::Drop`].
fn enrich_one(
    raw: &RawIncident,
    policy: DistrictPolicy,
) -> Result<Option<EnrichedIncident>, PipelineError> {
    let date = parse_incident_date(&raw.date).ok_or_else(|| PipelineError::Parse {
        objectid: raw.objectid,
        field: "date_",
        value: raw.date.clone(),
    })?;
    let time = parse_incident_time(&raw.time).ok_or_else(|| PipelineError::Parse {
        objectid: raw.objectid,
        field: "time",
        value: raw.time.clone(),
    })?;

    let dist = match district_code(raw.dist) {
        Some(code) => code,
        None => match policy {
            DistrictPolicy::Drop => return Ok(None),
            DistrictPolicy::Impute => SENTINEL_DISTRICT,
        },
    };

    let outcome = VictimOutcome::from_fatal_flag(raw.fatal);

    #[allow(clippy::cast_possible_truncation)]
    Ok(Some(EnrichedIncident {
        objectid: raw.objectid,
        date,
        time,
        dist,
        age: raw.age,
        lat: raw.lat,
        lng: raw.lng,
        year: date.year(),
        weekday: date.weekday().num_days_from_monday() as u8,
        week_no: date.iso_week().week() as u8,
        month: date.month() as u8,
        month_name: month_name(date.month() as u8),
        day_name: day_name(date.weekday().num_days_from_monday() as u8),
        day: date.day() as u8,
        hour: time.hour() as u8,
        victim_outcome: outcome,
        non_fatal: u8::from(outcome == VictimOutcome::NonFatal),
        shooting_incidents: 1,
    }))
}

/// Runs the full enrichment pipeline over a raw record set.
///
/// Output row count is at most the input count, and exactly equal under
/// [`DistrictPolicy::Impute`]. The returned records are never mutated
/// again; filter and aggregation layers only read them.
///
/// # Errors
///
/// Returns [`PipelineError::Parse`] if any record's date or time cannot
/// be parsed. There is no valid enriched state to serve queries from a
/// partially parsed dataset, so the whole pipeline aborts.
pub fn enrich_incidents(
    rows: Vec<RawIncident>,
    policy: DistrictPolicy,
) -> Result<Vec<EnrichedIncident>, PipelineError> {
    let input_count = rows.len();
    let mut enriched = Vec::with_capacity(input_count);

    for raw in &rows {
        if let Some(record) = enrich_one(raw, policy)? {
            enriched.push(record);
        }
    }

    let dropped = input_count - enriched.len();
    if dropped > 0 {
        log::info!("enrichment dropped {dropped} of {input_count} records with missing district");
    }
    log::info!("enriched {} incident records (policy: {policy})", enriched.len());

    Ok(enriched)
}
