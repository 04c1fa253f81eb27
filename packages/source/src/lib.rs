#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! External data-source collaborators: the shooting-incident CSV export
//! and the police-district boundary `GeoJSON`.
//!
//! The CSV header is schema-checked before decode so a missing required
//! column fails fast as a [`SourceError::Schema`] at startup rather
//! than as a cryptic per-row deserialization error.

pub mod boundaries;

use shotmap_models::RawIncident;
use thiserror::Error;

/// Default URL of the city's shooting-incident CSV export.
pub const DEFAULT_SHOOTINGS_CSV_URL: &str = "https://phl.carto.com/api/v2/sql?q=SELECT+*,+ST_Y(the_geom)+AS+lat,+ST_X(the_geom)+AS+lng+FROM+shootings&filename=shootings&format=csv&skipfields=cartodb_id";

/// Default URL of the police-district boundary `GeoJSON`.
pub const DEFAULT_BOUNDARIES_URL: &str =
    "https://opendata.arcgis.com/datasets/62ec63afb8824a15953399b1fa819df2_0.geojson";

/// Errors that can occur while fetching or decoding source data.
#[derive(Debug, Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the CSV header.
    #[error("missing required column '{column}' in CSV header")]
    Schema {
        /// Name of the first missing column.
        column: &'static str,
    },

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}

/// Decodes shooting incident records from CSV bytes.
///
/// The export carries many descriptive columns beyond the ones the
/// analytics core reads; unknown columns are ignored.
///
/// # Errors
///
/// Returns [`SourceError::Schema`] if a required column is missing from
/// the header, or [`SourceError::Csv`] if any row fails to decode.
pub fn decode_shootings_csv<R: std::io::Read>(reader: R) -> Result<Vec<RawIncident>, SourceError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for &column in RawIncident::REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(SourceError::Schema { column });
        }
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }

    log::info!("decoded {} raw incident records", records.len());
    Ok(records)
}

/// Fetches and decodes the shooting incident CSV export.
///
/// # Errors
///
/// Returns [`SourceError`] if the download fails, the header is missing
/// a required column, or a row fails to decode.
pub async fn fetch_shootings_csv(url: &str) -> Result<Vec<RawIncident>, SourceError> {
    log::info!("downloading shootings CSV from {url}");
    let body = reqwest::get(url).await?.error_for_status()?.text().await?;
    decode_shootings_csv(body.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_SNIPPET: &str = "\
objectid,year,dc_key,date_,time,race,age,dist,fatal,lat,lng
10001,2021,202101000001,2021-07-04,23:05:09,B,24.0,22.0,1.0,40.0123,-75.1456
10002,2021,202101000002,2021-07-05,01:15:00,W,31.0,,0.0,,
";

    #[test]
    fn decodes_export_snippet_ignoring_extra_columns() {
        let records = decode_shootings_csv(CSV_SNIPPET.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].objectid, 10001);
        assert_eq!(records[0].date, "2021-07-04");
        assert_eq!(records[0].time, "23:05:09");
        assert_eq!(records[0].dist, Some(22.0));
        assert_eq!(records[0].fatal, Some(1.0));
        // Empty cells decode as None
        assert_eq!(records[1].dist, None);
        assert_eq!(records[1].lat, None);
    }

    #[test]
    fn missing_required_column_is_a_schema_error() {
        let csv = "objectid,date_,time,age,lat,lng,fatal\n1,2021-01-01,00:00:00,20.0,40.0,-75.0,0.0\n";
        let err = decode_shootings_csv(csv.as_bytes()).unwrap_err();
        match err {
            SourceError::Schema { column } => assert_eq!(column, "dist"),
            other => panic!("expected schema error, got {other}"),
        }
    }
}
