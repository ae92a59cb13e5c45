use async_trait::async_trait;

use crate::{MergerRegistry, MetricTable, NhsError};

/// Supplier of the published tables the site is built from.
///
/// Implementations may read spreadsheets, fetch from the network or serve
/// fixtures. The engine loads every table once, up front, and never calls a
/// source again during a build.
#[async_trait]
pub trait TableSource: Send + Sync {
    /// Stable identifier used in errors and logs (e.g. "nhs-england").
    fn name(&self) -> &'static str;

    /// Monthly A&E table carrying the [`Metric::Attendance`] and
    /// [`Metric::Waiting`] grids, periods labelled `month/year`.
    ///
    /// [`Metric::Attendance`]: crate::Metric::Attendance
    /// [`Metric::Waiting`]: crate::Metric::Waiting
    async fn waiting(&self) -> Result<MetricTable, NhsError>;

    /// Overnight bed table carrying the [`Metric::Beds`] grid in
    /// chronological order, periods labelled `month/year`.
    ///
    /// [`Metric::Beds`]: crate::Metric::Beds
    async fn beds(&self) -> Result<MetricTable, NhsError>;

    /// Daily deaths table carrying the [`Metric::Deaths`] grid, periods
    /// labelled `YYYY-MM-DD`. Sources without one return `Ok(None)`.
    ///
    /// [`Metric::Deaths`]: crate::Metric::Deaths
    async fn deaths(&self) -> Result<Option<MetricTable>, NhsError> {
        Ok(None)
    }

    /// Mergers to reconcile against.
    async fn registry(&self) -> Result<MergerRegistry, NhsError> {
        Ok(MergerRegistry::known_mergers())
    }
}
