//! Series, statistics and report envelopes produced by the engine.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::config::Availability;
use crate::error::NhsError;
use crate::table::{Cell, Polarity};

/// A continuous series for a merger successor.
///
/// `values` and `mask` have one entry per period of the source table;
/// `values[i]` is `Missing` exactly where `mask[i]` is false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledSeries {
    /// Successor the series was built for.
    pub successor: String,
    /// Own value plus predecessor values per period.
    pub values: Vec<Cell>,
    /// Periods with a presentable value.
    pub mask: Vec<bool>,
    /// Rule that produced `mask`.
    pub availability: Availability,
}

impl ReconciledSeries {
    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the source table had no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(period index, value)` for every presentable period.
    pub fn present(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.value().map(|v| (i, v)))
    }

    /// Presentable values in period order.
    #[must_use]
    pub fn present_values(&self) -> Vec<f64> {
        self.present().map(|(_, v)| v).collect()
    }

    /// Split into the `(series, mask)` pair.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Cell>, Vec<bool>) {
        (self.values, self.mask)
    }
}

/// Share of trusts whose metric rose, stayed put or fell.
///
/// Percentages are over `entities` and sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChangeDistribution {
    /// Percentage of trusts where the metric rose by at least the threshold.
    pub more: f64,
    /// Percentage of trusts where the metric moved less than the threshold.
    pub same: f64,
    /// Percentage of trusts where the metric fell by at least the threshold.
    pub fewer: f64,
    /// Number of qualifying trusts.
    pub entities: usize,
}

impl ChangeDistribution {
    /// Percentage of trusts that improved under `polarity`.
    #[must_use]
    pub const fn better(&self, polarity: Polarity) -> f64 {
        match polarity {
            Polarity::IncreaseIsBetter => self.more,
            Polarity::IncreaseIsWorse => self.fewer,
        }
    }

    /// Percentage of trusts that got worse under `polarity`.
    #[must_use]
    pub const fn worse(&self, polarity: Polarity) -> f64 {
        match polarity {
            Polarity::IncreaseIsBetter => self.fewer,
            Polarity::IncreaseIsWorse => self.more,
        }
    }

    /// The `(more, same, fewer)` triple.
    #[must_use]
    pub const fn as_tuple(&self) -> (f64, f64, f64) {
        (self.more, self.same, self.fewer)
    }
}

bitflags! {
    /// Content blocks a trust page carries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PageBlocks: u8 {
        /// A&E four-hour waiting block.
        const WAITING = 1;
        /// Overnight beds block.
        const BEDS = 1 << 1;
        /// Pandemic deaths block.
        const DEATHS = 1 << 2;
    }
}

/// How a trust's A&E waiting count has moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum WaitingTrend {
    /// Smoothed count never got high enough to matter.
    Minimal {
        /// Mean monthly attendance is below the small-trust threshold.
        low_attendance: bool,
    },
    /// More people wait over four hours than at the start of the record.
    Worse,
    /// Fewer people wait over four hours than at the start of the record.
    Better,
}

/// A&E summary for one trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingSummary {
    /// Trust name.
    pub entity: String,
    /// Numeric timeline of the recorded waiting months.
    pub times: Vec<f64>,
    /// Recorded waiting counts.
    pub waiting: Vec<f64>,
    /// Timeline trimmed to match `smoothed`.
    pub smoothed_times: Vec<f64>,
    /// Trailing moving average of `waiting`.
    pub smoothed: Vec<f64>,
    /// Mean recorded monthly attendance.
    pub mean_attendance: f64,
    /// Latest smoothed value minus the first one (positive: more waiting).
    pub rise: f64,
    /// Highest smoothed value.
    pub peak: f64,
    /// Calendar year of the first recorded month.
    pub first_year: i32,
    /// Classification of `rise`.
    pub trend: WaitingTrend,
}

/// How a trust's bed count has moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum BedTrend {
    /// Every bed has gone.
    AllGone,
    /// Fewer beds, beyond the configured ratio.
    Fewer,
    /// More beds, beyond the configured ratio.
    More,
    /// Within the configured ratio either way.
    LittleChange,
}

/// Bed summary for one trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedSummary {
    /// Trust name.
    pub entity: String,
    /// Earliest recorded count.
    pub earliest: f64,
    /// Latest recorded count.
    pub latest: f64,
    /// `latest - earliest`.
    pub change: f64,
    /// `change / earliest`; `None` when the trust started with no beds.
    pub ratio: Option<f64>,
    /// Calendar year of the earliest recorded period.
    pub first_year: i32,
    /// Classification of `ratio`.
    pub trend: BedTrend,
}

/// Pandemic deaths summary for one trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathsSummary {
    /// Trust name.
    pub entity: String,
    /// Deaths over the whole record.
    pub total: f64,
    /// Deaths over the trailing recent window.
    pub recent: f64,
    /// Deaths in the latest recorded period.
    pub latest: Option<f64>,
}

/// National rollup figures quoted on every beds block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalSummary {
    /// Name of the national entity.
    pub entity: String,
    /// Latest minus earliest national bed count.
    pub bed_change: f64,
    /// `bed_change` as a percentage of the earliest count.
    pub bed_change_pct: f64,
    /// Distribution of bed changes across trusts.
    pub distribution: ChangeDistribution,
}

/// Everything the site needs to render one trust page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustPage {
    /// Canonical trust name.
    pub name: String,
    /// Site-relative page URL.
    pub url: String,
    /// Blocks the page carries.
    pub blocks: PageBlocks,
    /// True when the trust is a merger successor.
    pub merged: bool,
    /// A&E block content.
    pub waiting: Option<WaitingSummary>,
    /// Beds block content.
    pub beds: Option<BedSummary>,
    /// Deaths block content.
    pub deaths: Option<DeathsSummary>,
}

/// Link shown in the homepage search list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageEntry {
    /// Trust name.
    pub name: String,
    /// Site-relative page URL.
    pub url: String,
}

/// A failure while building one trust's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityWarning {
    /// Trust the failure belongs to.
    pub entity: String,
    /// What went wrong.
    pub error: NhsError,
}

/// Outcome of a whole site build.
///
/// One trust failing does not stop the others; its error lands in
/// `warnings` and its page is left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BuildReport {
    /// Pages built successfully, in entity order.
    pub pages: Vec<TrustPage>,
    /// Per-trust failures.
    pub warnings: Vec<EntityWarning>,
}
