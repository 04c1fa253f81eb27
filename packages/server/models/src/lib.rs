#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the shotmap server.
//!
//! These types are serialized to JSON for the REST API. The chart
//! tables themselves are defined in `shotmap_analytics_models` and
//! serialized directly.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Number of enriched records currently served.
    pub record_count: usize,
}

/// Dropdown value domains for the two filters. Each list starts with
/// the "ALL" sentinel followed by the sorted distinct values present in
/// the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFilterDomains {
    /// Year dropdown values.
    pub years: Vec<String>,
    /// Police district dropdown values.
    pub districts: Vec<String>,
}

/// Query parameters for the charts endpoint. Absent parameters mean
/// "ALL"; malformed values are clamped to "ALL" rather than rejected,
/// since the UI only ever supplies the enumerated dropdown values.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQueryParams {
    /// Year selection ("ALL" or a year present in the data).
    pub year: Option<String>,
    /// District selection ("ALL" or a district code present in the data).
    pub district: Option<String>,
}
