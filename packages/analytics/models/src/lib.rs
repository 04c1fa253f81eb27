#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregated table types consumed by the chart renderers.
//!
//! Each chart consumes one table shape: the bar charts take ordered row
//! vectors, the heatmap takes a dense grid, and the choropleth takes
//! per-district totals keyed by district code. All five are bundled into
//! a [`ChartBundle`] so a filter change either updates every chart or
//! none of them.

use serde::Serialize;
use shotmap_models::VictimOutcome;

/// Number of rows (months) in the daily heatmap grid.
pub const HEATMAP_MONTHS: usize = 12;
/// Number of columns (days of month) in the daily heatmap grid.
pub const HEATMAP_DAYS: usize = 31;

/// One row of the per-year bar chart table, ordered by year ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyCount {
    /// Calendar year.
    pub year: i32,
    /// Victim outcome group.
    pub victim_outcome: VictimOutcome,
    /// Number of incidents in this (year, outcome) group.
    pub shootings: u64,
}

/// One row of the per-month bar chart table, ordered by month number
/// ascending. Month names are carried alongside the number because the
/// chart labels by name but must never be ordered by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Month number, 1-12.
    pub month: u8,
    /// English month name.
    pub month_name: &'static str,
    /// Victim outcome group.
    pub victim_outcome: VictimOutcome,
    /// Number of incidents in this (month, outcome) group.
    pub shootings: u64,
}

/// One row of the per-hour bar chart table, ordered by (hour, outcome)
/// ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyCount {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Victim outcome group.
    pub victim_outcome: VictimOutcome,
    /// Number of incidents in this (hour, outcome) group.
    pub count: u64,
}

/// One row of the choropleth table: total incidents for one district.
/// The map renderer joins on the district code, so no row order is
/// contracted; rows are emitted district-ascending for determinism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictCount {
    /// Police district code.
    pub dist: u16,
    /// Total incidents in this district within the filtered scope.
    pub shooting_incidents: u64,
}

/// Dense month × day-of-month incident grid for the calendar heatmap.
///
/// Always exactly 12 × 31; cells with no incidents hold 0 rather than
/// being omitted, because the heatmap renderer requires a rectangular
/// grid. Non-existent dates (February 30th) are structurally zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeatmapGrid {
    /// `cells[month - 1][day - 1]` = incident count for that month/day
    /// across all years in the filtered scope.
    pub cells: Vec<Vec<u64>>,
}

impl HeatmapGrid {
    /// Creates an all-zero 12 × 31 grid.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            cells: vec![vec![0; HEATMAP_DAYS]; HEATMAP_MONTHS],
        }
    }

    /// Cell value for a 1-based (month, day) pair.
    ///
    /// # Panics
    ///
    /// Panics if `month` is outside 1-12 or `day` outside 1-31.
    #[must_use]
    pub fn get(&self, month: u8, day: u8) -> u64 {
        self.cells[month as usize - 1][day as usize - 1]
    }

    /// Adds to the cell for a 1-based (month, day) pair. Returns `false`
    /// when the pair is out of range instead of panicking, so the caller
    /// can surface an invariant violation.
    pub fn add(&mut self, month: u8, day: u8, value: u64) -> bool {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return false;
        }
        self.cells[month as usize - 1][day as usize - 1] += value;
        true
    }
}

impl Default for HeatmapGrid {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// The atomic result of one filter-change update: every chart's table,
/// all computed from the same filtered scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    /// Per-year bar chart table.
    pub yearly: Vec<YearlyCount>,
    /// Per-month bar chart table.
    pub monthly: Vec<MonthlyCount>,
    /// Daily-distribution heatmap grid.
    pub heatmap: HeatmapGrid,
    /// Per-hour bar chart table.
    pub hourly: Vec<HourlyCount>,
    /// Per-district totals for the choropleth.
    pub districts: Vec<DistrictCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_grid_is_dense_12_by_31() {
        let grid = HeatmapGrid::zeroed();
        assert_eq!(grid.cells.len(), HEATMAP_MONTHS);
        assert!(grid.cells.iter().all(|row| row.len() == HEATMAP_DAYS));
        assert!(grid.cells.iter().flatten().all(|&c| c == 0));
    }

    #[test]
    fn grid_add_accumulates_and_bounds_checks() {
        let mut grid = HeatmapGrid::zeroed();
        assert!(grid.add(7, 4, 2));
        assert!(grid.add(7, 4, 1));
        assert_eq!(grid.get(7, 4), 3);
        assert!(!grid.add(13, 1, 1));
        assert!(!grid.add(1, 32, 1));
        assert!(!grid.add(0, 1, 1));
    }
}
