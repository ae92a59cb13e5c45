//! Data model, configuration primitives and report envelopes shared by the
//! howsmynhs crates.
#![warn(missing_docs)]

mod config;
mod error;
mod registry;
mod reports;
mod table;

pub use config::{Availability, EligibilityConfig, EngineConfig, WaitingTrendConfig};
pub use error::NhsError;
pub use registry::MergerRegistry;
pub use reports::{
    BedSummary, BedTrend, BuildReport, ChangeDistribution, DeathsSummary, EntityWarning,
    HomepageEntry, NationalSummary, PageBlocks, ReconciledSeries, TrustPage, WaitingSummary,
    WaitingTrend,
};
pub use table::{Cell, Grid, Metric, MetricTable, Polarity, RowLabel, combine_names};
