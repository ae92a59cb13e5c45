//! Tabular statistics as published per trust and period.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::error::NhsError;

/// A single value grid, indexed `[row][period]`.
pub type Grid = Vec<Vec<Cell>>;

/// Statistic carried by a value grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Metric {
    /// Monthly A&E attendances.
    Attendance,
    /// Monthly count of patients waiting over four hours at A&E.
    Waiting,
    /// Available overnight beds.
    Beds,
    /// Daily pandemic deaths in hospital.
    Deaths,
}

/// How a change in a metric should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// A rising value is good news (beds).
    IncreaseIsBetter,
    /// A rising value is bad news (waiting counts, deaths).
    IncreaseIsWorse,
}

impl Metric {
    /// Stable, kebab-case identifier for logs/errors and figure names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attendance => "attendance",
            Self::Waiting => "waiting",
            Self::Beds => "beds",
            Self::Deaths => "covid",
        }
    }

    /// Sign convention used when bucketing changes as better or worse.
    #[must_use]
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Beds => Polarity::IncreaseIsBetter,
            Self::Attendance | Self::Waiting | Self::Deaths => Polarity::IncreaseIsWorse,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell of a value grid.
///
/// Source spreadsheets mark absent data with a dash; `Missing` is that
/// marker and is never confused with a number.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Cell {
    /// No data published for this trust and period.
    #[default]
    Missing,
    /// A recorded value.
    Present(f64),
}

impl Cell {
    /// Textual marker used for missing cells in the published tables.
    pub const MISSING_MARKER: &'static str = "-";

    /// Parse a published cell: the dash marker or a number.
    ///
    /// Thousands separators are accepted.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the text is neither the marker nor a number.
    pub fn parse(text: &str) -> Result<Self, NhsError> {
        let t = text.trim();
        if t == Self::MISSING_MARKER || t.is_empty() {
            return Ok(Self::Missing);
        }
        t.replace(',', "")
            .parse::<f64>()
            .map(Self::Present)
            .map_err(|e| NhsError::InvalidArg(format!("cell '{text}': {e}")))
    }

    /// The recorded value, if any.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Missing => None,
            Self::Present(v) => Some(v),
        }
    }

    /// True when the cell holds a recorded value.
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl From<Option<f64>> for Cell {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Missing, Self::Present)
    }
}

impl From<Cell> for Option<f64> {
    fn from(c: Cell) -> Self {
        c.value()
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Self::Present(v)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str(Self::MISSING_MARKER),
            Self::Present(v) => write!(f, "{v}"),
        }
    }
}

/// Label of a table row.
///
/// Published tables end with a free-text footnote row; it is typed as
/// `Metadata` when the table is built so name-based lookups never see it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowLabel {
    /// A trust, or the national rollup.
    Entity(String),
    /// A non-entity row such as a source footnote.
    Metadata(String),
}

impl RowLabel {
    /// Entity name, or `None` for metadata rows.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        match self {
            Self::Entity(name) => Some(name),
            Self::Metadata(_) => None,
        }
    }
}

impl From<&str> for RowLabel {
    fn from(name: &str) -> Self {
        Self::Entity(name.to_string())
    }
}

/// Shape-checked fields used to deserialize a [`MetricTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MetricTableParts {
    rows: Vec<RowLabel>,
    periods: Vec<String>,
    grids: Vec<(Metric, Grid)>,
}

/// A rectangular table of statistics: rows, a shared period axis and one or
/// more value grids aligned to both.
///
/// Period labels are kept verbatim; converting them to a numeric timeline is
/// the caller's choice (monthly and daily tables use different formats).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MetricTableParts", into = "MetricTableParts")]
pub struct MetricTable {
    rows: Vec<RowLabel>,
    periods: Vec<String>,
    grids: Vec<(Metric, Grid)>,
}

impl MetricTable {
    /// Build a table and check that every grid is `rows x periods`.
    ///
    /// # Errors
    /// Returns `InvalidTable` when a grid is ragged, has the wrong number of
    /// rows, or when the same metric appears twice.
    pub fn new(
        rows: Vec<RowLabel>,
        periods: Vec<String>,
        grids: Vec<(Metric, Grid)>,
    ) -> Result<Self, NhsError> {
        for (i, (metric, grid)) in grids.iter().enumerate() {
            if grids[..i].iter().any(|(m, _)| m == metric) {
                return Err(NhsError::InvalidTable(format!("duplicate {metric} grid")));
            }
            if grid.len() != rows.len() {
                return Err(NhsError::InvalidTable(format!(
                    "{metric} grid has {} rows, expected {}",
                    grid.len(),
                    rows.len()
                )));
            }
            if let Some((r, row)) = grid
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() != periods.len())
            {
                return Err(NhsError::InvalidTable(format!(
                    "{metric} row {r} has {} cells, expected {}",
                    row.len(),
                    periods.len()
                )));
            }
        }
        Ok(Self {
            rows,
            periods,
            grids,
        })
    }

    /// Row labels in table order.
    #[must_use]
    pub fn rows(&self) -> &[RowLabel] {
        &self.rows
    }

    /// Period labels in column order.
    #[must_use]
    pub fn periods(&self) -> &[String] {
        &self.periods
    }

    /// The value grid for `metric`.
    ///
    /// # Errors
    /// Returns `InvalidTable` if the table does not carry that metric.
    pub fn grid(&self, metric: Metric) -> Result<&Grid, NhsError> {
        self.grids
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, g)| g)
            .ok_or_else(|| NhsError::InvalidTable(format!("no {metric} grid in table")))
    }

    /// Entity names in table order, metadata rows skipped.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().filter_map(RowLabel::entity)
    }

    /// Index of the first entity row called `name`.
    #[must_use]
    pub fn row_index(&self, name: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.entity() == Some(name))
    }

    /// True when an entity row called `name` exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.row_index(name).is_some()
    }

    /// Cells of `metric` for the first entity row called `name`.
    #[must_use]
    pub fn row(&self, metric: Metric, name: &str) -> Option<&[Cell]> {
        let idx = self.row_index(name)?;
        self.grid(metric).ok().map(|g| g[idx].as_slice())
    }

    /// Number of recorded cells of `metric` for `name` (0 when absent).
    #[must_use]
    pub fn present_count(&self, metric: Metric, name: &str) -> usize {
        self.row(metric, name)
            .map_or(0, |cells| cells.iter().filter(|c| c.is_present()).count())
    }

    /// Replace the row labels, keeping grids and periods.
    ///
    /// # Errors
    /// Returns `InvalidTable` if the new label count differs from the old one.
    pub fn with_rows(mut self, rows: Vec<RowLabel>) -> Result<Self, NhsError> {
        if rows.len() != self.rows.len() {
            return Err(NhsError::InvalidTable(format!(
                "relabel with {} rows, table has {}",
                rows.len(),
                self.rows.len()
            )));
        }
        self.rows = rows;
        Ok(self)
    }

    /// Rewrite every row label in place, keeping grids and periods.
    #[must_use]
    pub fn map_rows<F>(mut self, f: F) -> Self
    where
        F: FnMut(RowLabel) -> RowLabel,
    {
        self.rows = self.rows.into_iter().map(f).collect();
        self
    }

    /// Number of rows, metadata included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TryFrom<MetricTableParts> for MetricTable {
    type Error = NhsError;

    fn try_from(p: MetricTableParts) -> Result<Self, Self::Error> {
        Self::new(p.rows, p.periods, p.grids)
    }
}

impl From<MetricTable> for MetricTableParts {
    fn from(t: MetricTable) -> Self {
        Self {
            rows: t.rows,
            periods: t.periods,
            grids: t.grids,
        }
    }
}

/// Ordered union of the entity names of several tables.
///
/// Names keep the position of their first appearance; metadata rows are
/// dropped.
pub fn combine_names<'a, I>(tables: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a MetricTable>,
{
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for t in tables {
        for name in t.entity_names() {
            if seen.insert(name) {
                out.push(name.to_string());
            }
        }
    }
    out
}
