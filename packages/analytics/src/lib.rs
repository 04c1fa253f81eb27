#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter resolution and chart aggregation for the shooting dashboard.
//!
//! The enriched record set is read-only shared state; every filter
//! change resolves the active scope once and feeds it to the five
//! aggregation routines, which together produce the atomic
//! [`shotmap_analytics_models::ChartBundle`] for the renderers.

pub mod aggregate;
pub mod scope;

mod dashboard;

pub use dashboard::Dashboard;

use thiserror::Error;

/// Errors that can occur during an update.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// An aggregation routine observed data that violates its internal
    /// invariants. The whole update fails; no partial bundle is
    /// returned.
    #[error("aggregation invariant violation: {message}")]
    Invariant {
        /// Description of what went wrong.
        message: String,
    },
}
