//! howsmynhs-core
//!
//! Pure engine behind the howsmynhs site: turns published NHS tables into
//! continuous per-trust series and corpus-wide statistics.
//!
//! - `types`: the shared data model (tables, registry, config, reports).
//! - `timeseries`: period timelines, smoothing and merger reconciliation.
//! - `names`: canonical entity names.
//! - `stats`: change distributions across every reportable trust.
//! - `source`: the `TableSource` trait the orchestrator loads tables from.
//!
//! Everything here is synchronous and side-effect free apart from
//! `TableSource`, whose async methods assume a Tokio 1.x runtime in the
//! orchestrator.
#![warn(missing_docs)]

/// Canonical entity names.
pub mod names;
/// Async table supplier trait.
pub mod source;
/// Change distributions across trusts.
pub mod stats;
/// Timeline, smoothing and merge utilities.
pub mod timeseries;
pub mod types;

pub use names::{normalize_name, normalize_names, normalize_table};
pub use source::TableSource;
pub use stats::{BED_CHANGE_THRESHOLD, ChangeOptions, bed_change_distribution, change_distribution};
pub use timeseries::merge::{reconcile, reconcile_additive, reconcile_beds};
pub use timeseries::smoothing::{DEFAULT_WINDOW, moving_average, smooth_aligned};
pub use timeseries::timeline::{
    parse_month_label, period_value, to_daily_timeline, to_numeric_timeline,
};
pub use types::*;
