use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the howsmynhs workspace.
///
/// Hard failures (malformed period labels, registries that reference absent
/// trusts, statistics without a denominator) abort the unit of work that hit
/// them. The orchestrator collects them per trust as warnings, so the enum is
/// serializable and comparable.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[non_exhaustive]
pub enum NhsError {
    /// A period label could not be converted to a point on the timeline.
    #[error("malformed period label '{label}': {reason}")]
    Format {
        /// The offending label, verbatim.
        label: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A merger lists a predecessor that has no row in the table being reconciled.
    #[error("predecessor '{predecessor}' of '{successor}' not found in table")]
    PredecessorNotFound {
        /// Successor whose reconciliation failed.
        successor: String,
        /// Predecessor that is missing from the table.
        predecessor: String,
    },

    /// An aggregate statistic had no qualifying entity to divide by.
    #[error("no qualifying entities for {statistic}")]
    NoQualifyingEntities {
        /// Label of the statistic, e.g. "bed change distribution".
        statistic: String,
    },

    /// Reconciliation was requested for a name that is not a merger successor.
    #[error("'{name}' is not a merger successor")]
    UnknownSuccessor {
        /// Name that was looked up in the registry.
        name: String,
    },

    /// The merger registry violates one of its structural rules.
    #[error("invalid merger registry: {0}")]
    InvalidRegistry(String),

    /// A metric table is not rectangular or misses a required grid.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An entity or resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "beds row for X".
        what: String,
    },

    /// Too few recorded values to compute a summary.
    #[error("insufficient data for {what}: need {needed}, found {found}")]
    InsufficientData {
        /// What was being summarised.
        what: String,
        /// Minimum number of recorded values required.
        needed: usize,
        /// Number of recorded values available.
        found: usize,
    },

    /// A table source failed to deliver a table.
    #[error("{source_name} failed: {msg}")]
    Source {
        /// Name of the source that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A per-trust worker task panicked or was cancelled.
    #[error("task for '{entity}' failed: {msg}")]
    Task {
        /// Entity the task was building.
        entity: String,
        /// Join error description.
        msg: String,
    },
}

impl NhsError {
    /// Helper: build a `Format` error for a label.
    pub fn format(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            label: label.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build a `PredecessorNotFound` error.
    pub fn predecessor_not_found(
        successor: impl Into<String>,
        predecessor: impl Into<String>,
    ) -> Self {
        Self::PredecessorNotFound {
            successor: successor.into(),
            predecessor: predecessor.into(),
        }
    }

    /// Helper: build a `NoQualifyingEntities` error for a statistic label.
    pub fn no_qualifying(statistic: impl Into<String>) -> Self {
        Self::NoQualifyingEntities {
            statistic: statistic.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `Source` error with the source name and message.
    pub fn source_failed(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Returns true if this error points at broken input data rather than at
    /// an entity that simply has nothing to show.
    ///
    /// `NotFound` and `InsufficientData` are expected for small trusts and do
    /// not need a human to look at them.
    #[must_use]
    pub const fn is_integrity_failure(&self) -> bool {
        !matches!(
            self,
            Self::NotFound { .. } | Self::InsufficientData { .. }
        )
    }
}

impl From<serde_json::Error> for NhsError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidArg(e.to_string())
    }
}
