//! Generic "top N by metric" machinery shared by all four record families.
//!
//! The source system carried a near-identical copy of this logic per feature
//! page; here each family declares its leaderboard metrics as a table of
//! [`MetricSpec`]s and the building is done once, generically. Ties preserve
//! original input order (stable sort), so output is deterministic.

use std::collections::BTreeMap;

use im::Vector;

use crate::pipeline::{apply_sort, SortDirection};

/// A named metric extractor declaring one leaderboard for a record family.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec<T> {
    /// Logical metric name, used as the leaderboard key.
    pub name: &'static str,
    /// `Desc` for "biggest first" metrics, `Asc` for closeness metrics such
    /// as rank position.
    pub direction: SortDirection,
    pub extract: fn(&T) -> f64,
}

/// The `n` best records by one metric, sort-then-slice.
pub fn top_n_by<T: Clone>(
    records: &[T],
    n: usize,
    direction: SortDirection,
    extract: impl Fn(&T) -> f64,
) -> Vector<T> {
    apply_sort(records, extract, direction)
        .into_iter()
        .take(n)
        .collect()
}

/// Build every declared leaderboard for a family in one call.
pub fn build_leaderboards<T: Clone>(
    records: &[T],
    specs: &[MetricSpec<T>],
    n: usize,
) -> BTreeMap<String, Vector<T>> {
    specs
        .iter()
        .map(|spec| {
            let board = top_n_by(records, n, spec.direction, spec.extract);
            (spec.name.to_string(), board)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: usize,
        value: f64,
    }

    fn rows(values: &[f64]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(id, &value)| Row { id, value })
            .collect()
    }

    #[test]
    fn top_n_takes_the_largest_descending() {
        let records = rows(&[5.0, 9.0, 1.0, 7.0]);
        let top = top_n_by(&records, 2, SortDirection::Desc, |r| r.value);
        let ids: Vec<usize> = top.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn ties_keep_original_input_order() {
        let records = rows(&[4.0, 8.0, 4.0, 4.0]);
        let top = top_n_by(&records, 4, SortDirection::Desc, |r| r.value);
        let ids: Vec<usize> = top.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 0, 2, 3]);
    }

    #[test]
    fn empty_input_yields_empty_leaderboard() {
        let records: Vec<Row> = vec![];
        let top = top_n_by(&records, 10, SortDirection::Desc, |r| r.value);
        assert!(top.is_empty());
    }

    #[test]
    fn limit_larger_than_input_returns_everything() {
        let records = rows(&[1.0, 2.0]);
        let top = top_n_by(&records, 10, SortDirection::Asc, |r| r.value);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn build_leaderboards_keys_by_metric_name() {
        let records = rows(&[3.0, 1.0, 2.0]);
        let specs = [
            MetricSpec {
                name: "value",
                direction: SortDirection::Desc,
                extract: |r: &Row| r.value,
            },
            MetricSpec {
                name: "closeness",
                direction: SortDirection::Asc,
                extract: |r: &Row| r.value,
            },
        ];
        let boards = build_leaderboards(&records, &specs, 1);
        assert_eq!(boards["value"][0].id, 0);
        assert_eq!(boards["closeness"][0].id, 1);
    }
}
