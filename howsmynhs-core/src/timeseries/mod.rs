//! Time-series utilities shared by the engine and the site builder.
//!
//! Modules include:
//! - `timeline`: convert period labels to a numeric axis
//! - `smoothing`: trailing moving averages with aligned time axes
//! - `merge`: reconcile a merger successor's series from its predecessors
/// Merger reconciliation.
pub mod merge;
/// Trailing moving averages.
pub mod smoothing;
/// Period label parsing.
pub mod timeline;
