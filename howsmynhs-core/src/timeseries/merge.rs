use crate::{Availability, Cell, MergerRegistry, NhsError, ReconciledSeries, RowLabel};

/// Build the continuous series of a merger successor.
///
/// - Starts from the successor's own row; a successor without a row yet
///   contributes nothing.
/// - Each predecessor's recorded values are added to the running total of
///   their period.
/// - `availability` decides which periods are presentable:
///   [`Availability::AnySource`] keeps every period where the successor or
///   any predecessor has data; [`Availability::AllPredecessors`] keeps periods
///   where the successor has data or every predecessor does.
/// - Values outside the mask are `Missing`, whatever partial sum was built.
///
/// Rows are matched by the first entity row with the given name; metadata
/// rows are never matched.
///
/// # Errors
/// - `UnknownSuccessor` if `successor` is not a registry key.
/// - `PredecessorNotFound` naming the first listed predecessor that has no
///   row. Every predecessor is resolved before any summing happens.
/// - `InvalidTable` if `names` and `grid` disagree in length or a used row
///   does not span every period.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "howsmynhs_core::timeseries::merge::reconcile",
        skip(grid, names, registry),
        fields(rows = grid.len(), availability = ?availability),
        err,
    )
)]
pub fn reconcile(
    grid: &[Vec<Cell>],
    names: &[RowLabel],
    successor: &str,
    registry: &MergerRegistry,
    availability: Availability,
) -> Result<ReconciledSeries, NhsError> {
    if grid.len() != names.len() {
        return Err(NhsError::InvalidTable(format!(
            "{} names for {} grid rows",
            names.len(),
            grid.len()
        )));
    }
    let predecessors = registry
        .predecessors(successor)
        .ok_or_else(|| NhsError::UnknownSuccessor {
            name: successor.to_string(),
        })?;

    let find = |name: &str| names.iter().position(|r| r.entity() == Some(name));
    let pred_rows = predecessors
        .iter()
        .map(|p| find(p).ok_or_else(|| NhsError::predecessor_not_found(successor, p)))
        .collect::<Result<Vec<_>, _>>()?;
    let own_row = find(successor);

    let periods = grid.first().map_or(0, Vec::len);
    let row_at = |idx: usize| -> Result<&[Cell], NhsError> {
        let row = &grid[idx];
        if row.len() == periods {
            Ok(row.as_slice())
        } else {
            Err(NhsError::InvalidTable(format!(
                "row {idx} has {} cells, expected {periods}",
                row.len()
            )))
        }
    };

    let mut totals = vec![0.0_f64; periods];
    let mut own_present = vec![false; periods];
    let mut any_present = vec![false; periods];
    let mut all_preds_present = vec![true; periods];

    if let Some(idx) = own_row {
        for (i, cell) in row_at(idx)?.iter().enumerate() {
            if let Some(v) = cell.value() {
                totals[i] = v;
                own_present[i] = true;
                any_present[i] = true;
            }
        }
    } else {
        #[cfg(feature = "tracing")]
        tracing::debug!(successor, "successor has no own row; using predecessors only");
    }

    for idx in pred_rows {
        for (i, cell) in row_at(idx)?.iter().enumerate() {
            match cell.value() {
                Some(v) => {
                    totals[i] += v;
                    any_present[i] = true;
                }
                None => all_preds_present[i] = false,
            }
        }
    }

    let mask: Vec<bool> = match availability {
        Availability::AnySource => any_present,
        Availability::AllPredecessors => own_present
            .iter()
            .zip(&all_preds_present)
            .map(|(own, all)| *own || *all)
            .collect(),
    };
    let values = totals
        .into_iter()
        .zip(&mask)
        .map(|(v, keep)| if *keep { Cell::Present(v) } else { Cell::Missing })
        .collect();

    Ok(ReconciledSeries {
        successor: successor.to_string(),
        values,
        mask,
        availability,
    })
}

/// Reconcile an additive count (A&E attendance, waiting, deaths).
///
/// Every period where any source has data is presentable; use [`reconcile`]
/// with [`Availability::AllPredecessors`] to drop partial sums instead.
///
/// # Errors
/// Same as [`reconcile`].
pub fn reconcile_additive(
    grid: &[Vec<Cell>],
    names: &[RowLabel],
    successor: &str,
    registry: &MergerRegistry,
) -> Result<ReconciledSeries, NhsError> {
    reconcile(grid, names, successor, registry, Availability::AnySource)
}

/// Reconcile overnight bed counts.
///
/// Beds are reported quarterly and predecessors stop reporting the quarter
/// they merge, so any source counts.
///
/// # Errors
/// Same as [`reconcile`].
pub fn reconcile_beds(
    grid: &[Vec<Cell>],
    names: &[RowLabel],
    successor: &str,
    registry: &MergerRegistry,
) -> Result<ReconciledSeries, NhsError> {
    reconcile(grid, names, successor, registry, Availability::AnySource)
}
