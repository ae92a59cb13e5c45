//! Per-trust and national figures quoted on the site.

use howsmynhs_core::{
    BedSummary, BedTrend, ChangeOptions, DeathsSummary, Metric, NationalSummary, NhsError,
    WaitingSummary, WaitingTrend, change_distribution, parse_month_label, smooth_aligned,
};

use crate::Engine;

impl Engine {
    /// A&E waiting summary for `name`.
    ///
    /// - `smoothed` is the trailing moving average of the recorded waiting
    ///   counts; `rise` is its last value minus its first.
    /// - Trend: `Minimal` when the smoothed peak stays under the configured
    ///   floor, `Worse` when a busy A&E rose beyond the significant rise,
    ///   `Better` when the count fell, `Worse` otherwise.
    ///
    /// # Errors
    /// - `NotFound` when the trust has no A&E row.
    /// - `InsufficientData` when there are fewer recorded months than the
    ///   smoothing window.
    /// - Any reconciliation error for a merger successor.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "howsmynhs::summary::waiting", skip(self), err)
    )]
    pub fn waiting_summary(&self, name: &str) -> Result<WaitingSummary, NhsError> {
        let cfg = self.config();
        let waiting = self.observed(Metric::Waiting, name)?;
        let attendance = self.observed(Metric::Attendance, name)?;

        let window = cfg.smoothing_window;
        let insufficient = || NhsError::InsufficientData {
            what: format!("waiting for {name}"),
            needed: window,
            found: waiting.len(),
        };
        let (smoothed_times, smoothed) = smooth_aligned(&waiting.times, &waiting.values, window)?;
        let (Some(first), Some(last), Some(first_label)) =
            (smoothed.first(), smoothed.last(), waiting.periods.first())
        else {
            return Err(insufficient());
        };
        let rise = last - first;
        let first_year = parse_month_label(first_label)?.1;
        let peak = smoothed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean_attendance = mean(&attendance.values).unwrap_or(0.0);

        let t = &cfg.waiting_trend;
        let trend = if peak < t.minimal_peak {
            WaitingTrend::Minimal {
                low_attendance: mean_attendance < t.low_attendance,
            }
        } else if mean_attendance > t.low_attendance && rise > t.significant_rise {
            WaitingTrend::Worse
        } else if rise < 0.0 {
            WaitingTrend::Better
        } else {
            WaitingTrend::Worse
        };

        Ok(WaitingSummary {
            entity: name.to_string(),
            times: waiting.times,
            waiting: waiting.values,
            smoothed_times,
            smoothed,
            mean_attendance,
            rise,
            peak,
            first_year,
            trend,
        })
    }

    /// Overnight bed summary for `name`.
    ///
    /// `change` is the latest recorded count minus the earliest and `ratio`
    /// is that change over the earliest count.
    ///
    /// # Errors
    /// - `NotFound` when the trust has no bed row.
    /// - `InsufficientData` when nothing was recorded.
    /// - Any reconciliation error for a merger successor.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "howsmynhs::summary::beds", skip(self), err)
    )]
    pub fn bed_summary(&self, name: &str) -> Result<BedSummary, NhsError> {
        let beds = self.observed(Metric::Beds, name)?;
        let (Some(&earliest), Some(&latest), Some(first_period)) =
            (beds.values.first(), beds.values.last(), beds.periods.first())
        else {
            return Err(NhsError::InsufficientData {
                what: format!("beds for {name}"),
                needed: 1,
                found: 0,
            });
        };
        let change = latest - earliest;
        let ratio = (earliest != 0.0).then(|| change / earliest);
        let bound = self.config().bed_change_ratio;
        let trend = match ratio {
            Some(r) if latest == 0.0 && r < 0.0 => BedTrend::AllGone,
            Some(r) if r < -bound => BedTrend::Fewer,
            Some(r) if r > bound => BedTrend::More,
            None if latest > 0.0 => BedTrend::More,
            _ => BedTrend::LittleChange,
        };
        Ok(BedSummary {
            entity: name.to_string(),
            earliest,
            latest,
            change,
            ratio,
            first_year: parse_month_label(first_period)?.1,
            trend,
        })
    }

    /// Pandemic deaths summary for `name`.
    ///
    /// `recent` sums the trailing configured number of periods, skipping
    /// days with nothing published; `latest` is the last period's value.
    ///
    /// # Errors
    /// - `NotFound` when no deaths table was loaded or the trust has no row.
    /// - Any reconciliation error for a merger successor.
    pub fn deaths_summary(&self, name: &str) -> Result<DeathsSummary, NhsError> {
        let cells = self.cells(Metric::Deaths, name)?;
        let recent_from = cells
            .len()
            .saturating_sub(self.config().recent_deaths_periods);
        let total: f64 = cells.iter().filter_map(|c| c.value()).sum();
        let recent: f64 = cells[recent_from..].iter().filter_map(|c| c.value()).sum();
        Ok(DeathsSummary {
            entity: name.to_string(),
            total,
            recent,
            latest: cells.last().and_then(|c| c.value()),
        })
    }

    /// National bed change and the distribution of bed changes across trusts.
    ///
    /// # Errors
    /// - `NotFound` when the bed table has no national row.
    /// - `InsufficientData` when the national row has fewer than two values.
    /// - `InvalidTable` when the national count starts at zero.
    /// - Any error of [`change_distribution`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "howsmynhs::summary::national", skip(self), err)
    )]
    pub fn national_summary(&self) -> Result<NationalSummary, NhsError> {
        let cfg = self.config();
        let (table, _) = self.table(Metric::Beds)?;
        let national = &cfg.national_entity;
        let row = table
            .row(Metric::Beds, national)
            .ok_or_else(|| NhsError::not_found(format!("beds row for {national}")))?;
        let recorded: Vec<f64> = row.iter().filter_map(|c| c.value()).collect();
        if recorded.len() < 2 {
            return Err(NhsError::InsufficientData {
                what: format!("beds for {national}"),
                needed: 2,
                found: recorded.len(),
            });
        }
        let (earliest, latest) = (recorded[0], recorded[recorded.len() - 1]);
        if earliest == 0.0 {
            return Err(NhsError::InvalidTable(format!(
                "national bed count for {national} starts at zero"
            )));
        }
        let bed_change = latest - earliest;

        let opts = ChangeOptions {
            national_entity: national.clone(),
            threshold: cfg.change_threshold,
            availability: cfg.beds_availability,
        };
        let distribution = change_distribution(
            Metric::Beds,
            table.rows(),
            table.grid(Metric::Beds)?,
            self.registry(),
            &opts,
        )?;

        Ok(NationalSummary {
            entity: national.clone(),
            bed_change,
            bed_change_pct: bed_change / earliest * 100.0,
            distribution,
        })
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    Some(values.iter().sum::<f64>() / n)
}

