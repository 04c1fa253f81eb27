//! The update orchestrator: one entry point per filter change.

use std::sync::Arc;

use shotmap_analytics_models::ChartBundle;
use shotmap_models::{DistrictSelection, EnrichedIncident, YearSelection};

use crate::{AnalyticsError, aggregate, scope};

/// Read-only view over the enriched record set plus the single update
/// entry point the UI shell calls on every filter change.
///
/// The record set is dependency-injected at construction and held
/// behind an `Arc`; it is never mutated. A data refresh builds a new
/// enriched set and swaps it in via [`Dashboard::rebuild`], so readers
/// can never observe partially updated rows mid-aggregation.
#[derive(Debug, Clone)]
pub struct Dashboard {
    data: Arc<[EnrichedIncident]>,
}

impl Dashboard {
    /// Creates a dashboard over an enriched record set.
    #[must_use]
    pub fn new(data: impl Into<Arc<[EnrichedIncident]>>) -> Self {
        Self { data: data.into() }
    }

    /// Replaces the record set wholesale with a freshly enriched one.
    pub fn rebuild(&mut self, data: impl Into<Arc<[EnrichedIncident]>>) {
        self.data = data.into();
        log::info!("dashboard rebuilt over {} records", self.data.len());
    }

    /// Number of enriched records currently served.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.data.len()
    }

    /// Sorted distinct years present in the data (the year dropdown's
    /// domain, minus the "ALL" sentinel the UI prepends).
    #[must_use]
    pub fn year_domain(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.data.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Sorted distinct district codes present in the data.
    #[must_use]
    pub fn district_domain(&self) -> Vec<u16> {
        let mut districts: Vec<u16> = self.data.iter().map(|r| r.dist).collect();
        districts.sort_unstable();
        districts.dedup();
        districts
    }

    /// Computes all five chart tables for a filter pair.
    ///
    /// The scope is resolved once and every aggregation consumes that
    /// same subset. The bundle is atomic: if any aggregation fails, the
    /// whole update fails and no partial bundle is returned — the
    /// caller keeps its previous chart state rather than rendering a
    /// mixture of old and new tables. An empty scope (including an
    /// out-of-domain selection) is not a failure; it produces empty
    /// tables.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError`] if an aggregation observes an
    /// internal invariant violation.
    pub fn update(
        &self,
        year: YearSelection,
        district: DistrictSelection,
    ) -> Result<ChartBundle, AnalyticsError> {
        let scoped = scope::resolve(&self.data, year, district);
        log::debug!(
            "update year={year} district={district}: {} of {} records in scope",
            scoped.len(),
            self.data.len()
        );

        Ok(ChartBundle {
            yearly: aggregate::yearly(&scoped),
            monthly: aggregate::monthly(&scoped),
            heatmap: aggregate::daily_heatmap(&scoped)?,
            hourly: aggregate::hourly(&scoped),
            districts: aggregate::district_totals(&scoped),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotmap_models::{DistrictPolicy, RawIncident, VictimOutcome};
    use shotmap_pipeline::enrich_incidents;

    fn incident(objectid: i64, date: &str, dist: f64, fatal: f64) -> RawIncident {
        RawIncident {
            objectid,
            date: date.to_string(),
            time: "12:30:00".to_string(),
            dist: Some(dist),
            age: None,
            lat: None,
            lng: None,
            fatal: Some(fatal),
        }
    }

    fn dashboard(rows: Vec<RawIncident>) -> Dashboard {
        Dashboard::new(enrich_incidents(rows, DistrictPolicy::Drop).unwrap())
    }

    /// 3 years × 2 districts, one record per combination plus one extra
    /// in (2020, 1) so per-cell counts are distinguishable.
    fn grid_dashboard() -> Dashboard {
        let mut rows = Vec::new();
        let mut id = 0;
        for year in [2019, 2020, 2021] {
            for dist in [1.0, 2.0] {
                id += 1;
                rows.push(incident(id, &format!("{year}-06-01"), dist, 0.0));
            }
        }
        id += 1;
        rows.push(incident(id, "2020-06-02", 1.0, 0.0));
        dashboard(rows)
    }

    fn total(bundle: &ChartBundle) -> u64 {
        bundle.yearly.iter().map(|row| row.shootings).sum()
    }

    #[test]
    fn all_twelve_filter_combinations_match_expected_counts() {
        let dash = grid_dashboard();

        // Expected record count per (year, dist); 2020/1 has the extra.
        let expected = |year: i32, dist: u16| -> u64 {
            if (year, dist) == (2020, 1) { 2 } else { 1 }
        };

        // 3×2 fully specific combinations
        for year in [2019, 2020, 2021] {
            for dist in [1u16, 2] {
                let bundle = dash
                    .update(YearSelection::Year(year), DistrictSelection::District(dist))
                    .unwrap();
                assert_eq!(total(&bundle), expected(year, dist), "year={year} dist={dist}");
            }
        }

        // 3 year-only combinations
        for year in [2019, 2020, 2021] {
            let bundle = dash
                .update(YearSelection::Year(year), DistrictSelection::All)
                .unwrap();
            assert_eq!(total(&bundle), expected(year, 1) + expected(year, 2));
        }

        // 2 district-only combinations
        for dist in [1u16, 2] {
            let bundle = dash
                .update(YearSelection::All, DistrictSelection::District(dist))
                .unwrap();
            let want: u64 = [2019, 2020, 2021].iter().map(|&y| expected(y, dist)).sum();
            assert_eq!(total(&bundle), want);
        }

        // 1 both-ALL combination
        let bundle = dash.update(YearSelection::All, DistrictSelection::All).unwrap();
        assert_eq!(total(&bundle), 7);
    }

    #[test]
    fn worked_three_record_example() {
        let dash = dashboard(vec![
            incident(1, "2020-02-01", 1.0, 1.0),
            incident(2, "2020-02-02", 1.0, 0.0),
            incident(3, "2021-02-03", 2.0, 1.0),
        ]);

        let all = dash.update(YearSelection::All, DistrictSelection::All).unwrap();
        let rows: Vec<(i32, VictimOutcome, u64)> = all
            .yearly
            .iter()
            .map(|r| (r.year, r.victim_outcome, r.shootings))
            .collect();
        assert_eq!(
            rows,
            vec![
                (2020, VictimOutcome::Fatal, 1),
                (2020, VictimOutcome::NonFatal, 1),
                (2021, VictimOutcome::Fatal, 1),
            ]
        );

        let y2020 = dash
            .update(YearSelection::Year(2020), DistrictSelection::All)
            .unwrap();
        assert_eq!(y2020.yearly.len(), 2);
        assert!(y2020.yearly.iter().all(|r| r.year == 2020));

        let d2 = dash
            .update(YearSelection::All, DistrictSelection::District(2))
            .unwrap();
        let rows: Vec<(i32, VictimOutcome, u64)> = d2
            .yearly
            .iter()
            .map(|r| (r.year, r.victim_outcome, r.shootings))
            .collect();
        assert_eq!(rows, vec![(2021, VictimOutcome::Fatal, 1)]);
    }

    #[test]
    fn hourly_uses_the_doubly_filtered_scope() {
        // Two districts with incidents at different hours; with both
        // filters active the hourly table must only see district 1's
        // hour, not the global set.
        let dash = dashboard(vec![
            incident(1, "2020-01-01", 1.0, 0.0),
            RawIncident {
                time: "03:00:00".to_string(),
                ..incident(2, "2020-01-01", 2.0, 0.0)
            },
        ]);
        let bundle = dash
            .update(YearSelection::Year(2020), DistrictSelection::District(1))
            .unwrap();
        assert_eq!(bundle.hourly.len(), 1);
        assert_eq!(bundle.hourly[0].hour, 12);
        assert_eq!(bundle.hourly[0].count, 1);
    }

    #[test]
    fn update_is_idempotent() {
        let dash = grid_dashboard();
        let first = dash.update(YearSelection::All, DistrictSelection::All).unwrap();
        let second = dash.update(YearSelection::All, DistrictSelection::All).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn out_of_domain_selection_returns_empty_bundle() {
        let dash = grid_dashboard();
        let bundle = dash
            .update(YearSelection::Year(1900), DistrictSelection::District(77))
            .unwrap();
        assert!(bundle.yearly.is_empty());
        assert!(bundle.monthly.is_empty());
        assert!(bundle.hourly.is_empty());
        assert!(bundle.districts.is_empty());
        assert!(bundle.heatmap.cells.iter().flatten().all(|&c| c == 0));
    }

    #[test]
    fn dropdown_domains_are_sorted_distinct() {
        let dash = grid_dashboard();
        assert_eq!(dash.year_domain(), vec![2019, 2020, 2021]);
        assert_eq!(dash.district_domain(), vec![1, 2]);
    }

    #[test]
    fn rebuild_swaps_the_record_set() {
        let mut dash = dashboard(vec![incident(1, "2020-01-01", 1.0, 0.0)]);
        assert_eq!(dash.record_count(), 1);
        dash.rebuild(
            enrich_incidents(
                vec![
                    incident(1, "2020-01-01", 1.0, 0.0),
                    incident(2, "2022-01-01", 3.0, 1.0),
                ],
                DistrictPolicy::Drop,
            )
            .unwrap(),
        );
        assert_eq!(dash.record_count(), 2);
        assert_eq!(dash.year_domain(), vec![2020, 2022]);
    }
}
