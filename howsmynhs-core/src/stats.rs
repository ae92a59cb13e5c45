//! Corpus-wide statistics over every reportable trust.

use std::collections::HashSet;

use crate::timeseries::merge::reconcile;
use crate::{Availability, Cell, ChangeDistribution, MergerRegistry, Metric, NhsError, RowLabel};

/// Absolute bed change below which a trust counts as unchanged.
pub const BED_CHANGE_THRESHOLD: f64 = 50.0;

/// Which rows take part in a change distribution and how they are bucketed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeOptions {
    /// National rollup row, never counted as a trust.
    pub national_entity: String,
    /// Absolute change below which a trust counts as unchanged.
    pub threshold: f64,
    /// Presentable periods of a reconciled successor series.
    pub availability: Availability,
}

impl Default for ChangeOptions {
    fn default() -> Self {
        Self {
            national_entity: "England".to_string(),
            threshold: BED_CHANGE_THRESHOLD,
            availability: Availability::AnySource,
        }
    }
}

/// Share of trusts whose `metric` rose, held or fell between their earliest
/// and latest recorded values.
///
/// Every distinct entity name takes part except metadata rows, the national
/// rollup, retired predecessors and trusts with fewer than two recorded
/// values. Successors are measured on their reconciled series.
///
/// With `change = earliest - latest`: `change >= threshold` counts as fewer,
/// `change <= -threshold` as more, anything else as the same.
///
/// # Errors
/// - `InvalidArg` for a negative or non-finite threshold.
/// - `InvalidTable` if `names` and `grid` disagree in length.
/// - `PredecessorNotFound` if a successor's reconciliation fails.
/// - `NoQualifyingEntities` if no trust qualifies.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "howsmynhs_core::stats::change_distribution",
        skip(names, grid, registry, opts),
        fields(metric = %metric, threshold = opts.threshold),
        err,
    )
)]
pub fn change_distribution(
    metric: Metric,
    names: &[RowLabel],
    grid: &[Vec<Cell>],
    registry: &MergerRegistry,
    opts: &ChangeOptions,
) -> Result<ChangeDistribution, NhsError> {
    if !opts.threshold.is_finite() || opts.threshold < 0.0 {
        return Err(NhsError::InvalidArg(format!(
            "change threshold must be a non-negative number, got {}",
            opts.threshold
        )));
    }
    if names.len() != grid.len() {
        return Err(NhsError::InvalidTable(format!(
            "{} names for {} grid rows",
            names.len(),
            grid.len()
        )));
    }

    let (mut more, mut same, mut fewer) = (0_usize, 0_usize, 0_usize);
    let mut seen = HashSet::new();
    for (idx, label) in names.iter().enumerate() {
        let Some(name) = label.entity() else { continue };
        if !seen.insert(name)
            || name == opts.national_entity
            || registry.is_retired(name)
        {
            continue;
        }
        let recorded: Vec<f64> = if registry.is_successor(name) {
            reconcile(grid, names, name, registry, opts.availability)?.present_values()
        } else {
            grid[idx].iter().filter_map(|c| c.value()).collect()
        };
        let (Some(earliest), Some(latest)) = (recorded.first(), recorded.last()) else {
            continue;
        };
        if recorded.len() < 2 {
            #[cfg(feature = "tracing")]
            tracing::debug!(entity = name, "single recorded value; skipped");
            continue;
        }
        let change = earliest - latest;
        if change >= opts.threshold {
            fewer += 1;
        } else if change <= -opts.threshold {
            more += 1;
        } else {
            same += 1;
        }
    }

    let entities = more + same + fewer;
    if entities == 0 {
        return Err(NhsError::no_qualifying(format!("{metric} change distribution")));
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = |n: usize| 100.0 * n as f64 / entities as f64;
    Ok(ChangeDistribution {
        more: pct(more),
        same: pct(same),
        fewer: pct(fewer),
        entities,
    })
}

/// Percentages of trusts with more, the same and fewer beds.
///
/// See [`change_distribution`]; the national rollup is `"England"`.
///
/// # Errors
/// Same as [`change_distribution`].
pub fn bed_change_distribution(
    names: &[RowLabel],
    grid: &[Vec<Cell>],
    registry: &MergerRegistry,
    threshold: f64,
) -> Result<(f64, f64, f64), NhsError> {
    let opts = ChangeOptions {
        threshold,
        ..ChangeOptions::default()
    };
    change_distribution(Metric::Beds, names, grid, registry, &opts).map(|d| d.as_tuple())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[Option<f64>]) -> Vec<Cell> {
        cells.iter().copied().map(Cell::from).collect()
    }

    #[test]
    fn buckets_by_direction_and_magnitude() {
        let names: Vec<RowLabel> = ["England", "Up", "Flat", "Down", "Down"]
            .into_iter()
            .map(RowLabel::from)
            .collect();
        let grid = vec![
            row(&[Some(1000.0), Some(10.0)]),
            row(&[Some(100.0), Some(200.0)]),
            row(&[Some(100.0), Some(140.0)]),
            row(&[Some(300.0), Some(250.0)]),
            row(&[Some(0.0), Some(0.0)]),
        ];
        let reg = MergerRegistry::default();
        let (more, same, fewer) =
            bed_change_distribution(&names, &grid, &reg, BED_CHANGE_THRESHOLD).unwrap();
        let third = 100.0 / 3.0;
        assert!((more - third).abs() < 1e-9);
        assert!((same - third).abs() < 1e-9);
        assert!((fewer - third).abs() < 1e-9);
    }

    #[test]
    fn retired_and_sparse_rows_do_not_count() {
        let names: Vec<RowLabel> = ["A", "B", "AB", "C"].into_iter().map(RowLabel::from).collect();
        let grid = vec![
            row(&[Some(100.0), None, None]),
            row(&[Some(100.0), None, None]),
            row(&[None, None, Some(300.0)]),
            row(&[Some(5.0), None, None]),
        ];
        let reg = MergerRegistry::new([("AB", ["A", "B"])]).unwrap();
        let d = change_distribution(Metric::Beds, &names, &grid, &reg, &ChangeOptions::default())
            .unwrap();
        // AB: 200 then 300; C has one value
        assert_eq!(d.entities, 1);
        assert_eq!(d.more, 100.0);
    }

    #[test]
    fn nothing_qualifies() {
        let names = vec![RowLabel::from("England"), RowLabel::Metadata("note".into())];
        let grid = vec![row(&[Some(1.0), Some(2.0)]), row(&[None, None])];
        let err = bed_change_distribution(&names, &grid, &MergerRegistry::default(), 50.0)
            .unwrap_err();
        assert!(matches!(err, NhsError::NoQualifyingEntities { .. }));
    }

    #[test]
    fn negative_threshold_is_rejected() {
        let err = bed_change_distribution(&[], &[], &MergerRegistry::default(), -1.0).unwrap_err();
        assert!(matches!(err, NhsError::InvalidArg(_)));
    }
}
