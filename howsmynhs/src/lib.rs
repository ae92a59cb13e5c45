//! howsmynhs builds the "how's my NHS" site data from published NHS tables.
//!
//! Overview
//! - Loads the monthly A&E table, the overnight bed table and (optionally) the
//!   daily pandemic deaths table from a `TableSource`, or takes them in memory.
//! - Folds the history of trusts that merged into their successor, so every
//!   page shows one continuous series.
//! - Decides which blocks each trust page carries and computes the figures
//!   quoted in them.
//! - Builds every page concurrently; one bad trust never stops the rest.
//!
//! Key behaviors and trade-offs
//! - Availability: merged A&E series drop months where only some predecessors
//!   reported (`AllPredecessors`), while bed and death series keep any month
//!   with data (`AnySource`). Both are configurable per metric.
//! - Period labels are parsed once when the engine is built; a malformed label
//!   fails the build rather than a single page.
//! - Retired trusts never get a page; their numbers live on in their
//!   successor's series.
//!
//! Examples
//! Building from in-memory tables:
//! ```rust,ignore
//! use howsmynhs::{Engine, MergerRegistry};
//!
//! let engine = Engine::builder()
//!     .waiting_table(ae)
//!     .beds_table(beds)
//!     .registry(MergerRegistry::known_mergers())
//!     .build()?;
//! let national = engine.national_summary()?;
//! ```
//!
//! Building the whole site from a source:
//! ```rust,ignore
//! let engine = Engine::from_source(&source, EngineConfig::default()).await?;
//! let report = engine.build_pages().await;
//! for w in &report.warnings {
//!     eprintln!("{}: {}", w.entity, w.error);
//! }
//! ```
//!
//! See `howsmynhs/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod site;

pub use core::{Engine, EngineBuilder, Observed, tag_err};
pub use site::labels;

// Re-export core types for convenience
pub use howsmynhs_core::{
    Availability, BedSummary, BedTrend, BuildReport, Cell, ChangeDistribution, ChangeOptions,
    DeathsSummary, EligibilityConfig, EngineConfig, EntityWarning, HomepageEntry, MergerRegistry,
    Metric, MetricTable, NationalSummary, NhsError, PageBlocks, Polarity, ReconciledSeries,
    RowLabel, TableSource, TrustPage, WaitingSummary, WaitingTrend, WaitingTrendConfig,
};
