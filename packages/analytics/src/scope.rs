//! Filter resolution: selecting the record subset for the active
//! year/district filter pair.
//!
//! One resolver serves every aggregation. Repeating a four-way filter
//! branch per chart invites the branches to diverge over time, so the
//! scope is resolved in exactly one place and every chart consumes the
//! same subset.

use shotmap_models::{DistrictSelection, EnrichedIncident, YearSelection};

/// Returns whether a record falls inside the selected scope.
///
/// `All` is a sentinel bypassing the corresponding predicate entirely;
/// it is never compared as a literal value. With both filters specific,
/// the predicates combine with logical AND.
#[must_use]
pub fn in_scope(
    record: &EnrichedIncident,
    year: YearSelection,
    district: DistrictSelection,
) -> bool {
    let year_ok = match year {
        YearSelection::All => true,
        YearSelection::Year(y) => record.year == y,
    };
    let district_ok = match district {
        DistrictSelection::All => true,
        DistrictSelection::District(d) => record.dist == d,
    };
    year_ok && district_ok
}

/// Resolves the scope for a filter pair: the subset of records every
/// aggregation routine will consume for this update.
#[must_use]
pub fn resolve<'a>(
    data: &'a [EnrichedIncident],
    year: YearSelection,
    district: DistrictSelection,
) -> Vec<&'a EnrichedIncident> {
    data.iter()
        .filter(|record| in_scope(record, year, district))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotmap_models::{DistrictPolicy, RawIncident};
    use shotmap_pipeline::enrich_incidents;

    fn dataset() -> Vec<EnrichedIncident> {
        let rows = vec![
            ("2020-01-01", 1.0),
            ("2020-06-15", 2.0),
            ("2021-03-10", 1.0),
            ("2021-11-30", 2.0),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (date, dist))| RawIncident {
            objectid: i64::try_from(i).unwrap() + 1,
            date: date.to_string(),
            time: "12:00:00".to_string(),
            dist: Some(dist),
            age: None,
            lat: None,
            lng: None,
            fatal: Some(0.0),
        })
        .collect();
        enrich_incidents(rows, DistrictPolicy::Drop).unwrap()
    }

    #[test]
    fn both_all_returns_full_set() {
        let data = dataset();
        let scope = resolve(&data, YearSelection::All, DistrictSelection::All);
        assert_eq!(scope.len(), data.len());
    }

    #[test]
    fn district_only_filter() {
        let data = dataset();
        let scope = resolve(&data, YearSelection::All, DistrictSelection::District(1));
        assert_eq!(scope.len(), 2);
        assert!(scope.iter().all(|r| r.dist == 1));
    }

    #[test]
    fn year_only_filter() {
        let data = dataset();
        let scope = resolve(&data, YearSelection::Year(2021), DistrictSelection::All);
        assert_eq!(scope.len(), 2);
        assert!(scope.iter().all(|r| r.year == 2021));
    }

    #[test]
    fn both_filters_are_logical_and() {
        let data = dataset();
        let scope = resolve(
            &data,
            YearSelection::Year(2020),
            DistrictSelection::District(2),
        );
        assert_eq!(scope.len(), 1);
        assert_eq!(scope[0].objectid, 2);
    }

    #[test]
    fn out_of_domain_selection_yields_empty_scope() {
        let data = dataset();
        assert!(resolve(&data, YearSelection::Year(1999), DistrictSelection::All).is_empty());
        assert!(resolve(&data, YearSelection::All, DistrictSelection::District(99)).is_empty());
    }
}
