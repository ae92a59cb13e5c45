//! Re-export of the data model from `howsmynhs-types`.
// Consolidated re-exports so downstream crates can depend on `howsmynhs-core` only

pub use howsmynhs_types::{
    Availability, EligibilityConfig, EngineConfig, MergerRegistry, NhsError, WaitingTrendConfig,
};

pub use howsmynhs_types::{Cell, Grid, Metric, MetricTable, Polarity, RowLabel, combine_names};

pub use howsmynhs_types::{
    BedSummary, BedTrend, BuildReport, ChangeDistribution, DeathsSummary, EntityWarning,
    HomepageEntry, NationalSummary, PageBlocks, ReconciledSeries, TrustPage, WaitingSummary,
    WaitingTrend,
};
