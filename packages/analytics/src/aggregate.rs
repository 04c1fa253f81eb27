//! The five aggregation routines, one per chart.
//!
//! Each routine consumes the resolved scope and produces one table.
//! Grouping uses `BTreeMap` keys so rows come out in the exact order
//! each chart requires: years ascending, months by number (never by
//! name), hours 0-23 with outcome as tie-break. An empty scope yields
//! an empty table (or an all-zero grid), never an error; "no incidents
//! in this slice" is a valid, displayable state.

use std::collections::BTreeMap;

use shotmap_analytics_models::{
    DistrictCount, HeatmapGrid, HourlyCount, MonthlyCount, YearlyCount,
};
use shotmap_models::{EnrichedIncident, VictimOutcome, month_name};

use crate::AnalyticsError;

/// Incident counts grouped by (year, victim outcome), year ascending.
#[must_use]
pub fn yearly(scope: &[&EnrichedIncident]) -> Vec<YearlyCount> {
    let mut groups: BTreeMap<(i32, VictimOutcome), u64> = BTreeMap::new();
    for record in scope {
        *groups.entry((record.year, record.victim_outcome)).or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|((year, victim_outcome), shootings)| YearlyCount {
            year,
            victim_outcome,
            shootings,
        })
        .collect()
}

/// Incident counts grouped by (month, victim outcome), month number
/// ascending. Month names are attached for chart labels but play no
/// part in the ordering.
#[must_use]
pub fn monthly(scope: &[&EnrichedIncident]) -> Vec<MonthlyCount> {
    let mut groups: BTreeMap<(u8, VictimOutcome), u64> = BTreeMap::new();
    for record in scope {
        *groups
            .entry((record.month, record.victim_outcome))
            .or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|((month, victim_outcome), shootings)| MonthlyCount {
            month,
            month_name: month_name(month),
            victim_outcome,
            shootings,
        })
        .collect()
}

/// Dense 12 × 31 daily-distribution grid: cell (month, day) holds the
/// sum of `shooting_incidents` for that calendar day across all years
/// in scope.
///
/// # Errors
///
/// Returns [`AnalyticsError::Invariant`] if a record carries a month or
/// day outside the grid, which the enrichment pipeline guarantees
/// cannot happen for well-formed dates.
pub fn daily_heatmap(scope: &[&EnrichedIncident]) -> Result<HeatmapGrid, AnalyticsError> {
    let mut grid = HeatmapGrid::zeroed();
    for record in scope {
        if !grid.add(record.month, record.day, u64::from(record.shooting_incidents)) {
            return Err(AnalyticsError::Invariant {
                message: format!(
                    "record {} has month {} day {} outside the heatmap grid",
                    record.objectid, record.month, record.day
                ),
            });
        }
    }
    Ok(grid)
}

/// Incident counts grouped by (hour, victim outcome), ordered by hour
/// then outcome so the x-axis shows the hours in order even when some
/// have no incidents for a given outcome.
#[must_use]
pub fn hourly(scope: &[&EnrichedIncident]) -> Vec<HourlyCount> {
    let mut groups: BTreeMap<(u8, VictimOutcome), u64> = BTreeMap::new();
    for record in scope {
        *groups
            .entry((record.hour, record.victim_outcome))
            .or_insert(0) += 1;
    }
    groups
        .into_iter()
        .map(|((hour, victim_outcome), count)| HourlyCount {
            hour,
            victim_outcome,
            count,
        })
        .collect()
}

/// Total `shooting_incidents` per district for the choropleth.
#[must_use]
pub fn district_totals(scope: &[&EnrichedIncident]) -> Vec<DistrictCount> {
    let mut groups: BTreeMap<u16, u64> = BTreeMap::new();
    for record in scope {
        *groups.entry(record.dist).or_insert(0) += u64::from(record.shooting_incidents);
    }
    groups
        .into_iter()
        .map(|(dist, shooting_incidents)| DistrictCount {
            dist,
            shooting_incidents,
        })
        .collect()
}
