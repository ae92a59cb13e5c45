//! Configuration types shared by the engine and the site builder.

use serde::{Deserialize, Serialize};

use crate::error::NhsError;

/// Which periods of a reconciled series are presentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Availability {
    /// Any source (the successor or one of its predecessors) has data.
    #[default]
    AnySource,
    /// The successor has data, or every predecessor has data.
    ///
    /// Partial sums over only some predecessors are dropped.
    AllPredecessors,
}

/// Minimum number of recorded values before a page block is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    /// Recorded attendance months needed for the A&E block.
    pub min_waiting_points: usize,
    /// Recorded bed periods needed for the beds block.
    pub min_bed_points: usize,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            min_waiting_points: 10,
            min_bed_points: 4,
        }
    }
}

/// Thresholds used to classify a trust's A&E waiting trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaitingTrendConfig {
    /// Below this smoothed peak the trust has seen minimal change.
    pub minimal_peak: f64,
    /// Mean monthly attendance under which a trust counts as small.
    pub low_attendance: f64,
    /// Rise in the smoothed count beyond which things are reported as worse.
    pub significant_rise: f64,
}

impl Default for WaitingTrendConfig {
    fn default() -> Self {
        Self {
            minimal_peak: 15.0,
            low_attendance: 2000.0,
            significant_rise: 100.0,
        }
    }
}

/// Global configuration for the site build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name of the national rollup row; excluded from corpus statistics.
    pub national_entity: String,
    /// Absolute change below which a trust counts as unchanged.
    pub change_threshold: f64,
    /// Window of the trailing moving average.
    pub smoothing_window: usize,
    /// Presentable periods for merged A&E series (attendance, waiting).
    pub waiting_availability: Availability,
    /// Presentable periods for merged bed series.
    pub beds_availability: Availability,
    /// Fractional bed change beyond which a trust has more or fewer beds.
    pub bed_change_ratio: f64,
    /// Number of trailing periods summed for the recent-deaths figure.
    pub recent_deaths_periods: usize,
    /// Page block minimums.
    pub eligibility: EligibilityConfig,
    /// Waiting-trend thresholds.
    pub waiting_trend: WaitingTrendConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            national_entity: "England".to_string(),
            change_threshold: 50.0,
            smoothing_window: 3,
            waiting_availability: Availability::AllPredecessors,
            beds_availability: Availability::AnySource,
            bed_change_ratio: 0.05,
            recent_deaths_periods: 7,
            eligibility: EligibilityConfig::default(),
            waiting_trend: WaitingTrendConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON; absent fields take their defaults.
    ///
    /// # Errors
    /// Returns `InvalidArg` for malformed JSON or for values that fail
    /// [`EngineConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, NhsError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the knobs that have a valid range.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a zero smoothing window, a negative or
    /// non-finite threshold, or a zero recent-deaths window.
    pub fn validate(&self) -> Result<(), NhsError> {
        if self.smoothing_window == 0 {
            return Err(NhsError::InvalidArg("smoothing_window must be >= 1".into()));
        }
        if !self.change_threshold.is_finite() || self.change_threshold < 0.0 {
            return Err(NhsError::InvalidArg(format!(
                "change_threshold must be a non-negative number, got {}",
                self.change_threshold
            )));
        }
        if !self.bed_change_ratio.is_finite() || self.bed_change_ratio < 0.0 {
            return Err(NhsError::InvalidArg(format!(
                "bed_change_ratio must be a non-negative number, got {}",
                self.bed_change_ratio
            )));
        }
        if self.recent_deaths_periods == 0 {
            return Err(NhsError::InvalidArg(
                "recent_deaths_periods must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
