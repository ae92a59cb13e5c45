use std::sync::Arc;

use howsmynhs_core::{
    Availability, Cell, EngineConfig, MergerRegistry, Metric, MetricTable, NhsError,
    TableSource, normalize_table, reconcile, to_daily_timeline, to_numeric_timeline,
};

/// Site builder over a fixed set of published tables.
///
/// Cloning is cheap: tables, timelines and registry are shared behind an
/// `Arc`, so clones can be moved into per-trust worker tasks.
#[derive(Clone)]
pub struct Engine {
    pub(crate) inner: Arc<EngineInner>,
}

pub(crate) struct EngineInner {
    pub(crate) waiting: MetricTable,
    pub(crate) waiting_times: Vec<f64>,
    pub(crate) beds: MetricTable,
    pub(crate) bed_times: Vec<f64>,
    pub(crate) deaths: Option<(MetricTable, Vec<f64>)>,
    pub(crate) registry: MergerRegistry,
    pub(crate) cfg: EngineConfig,
}

/// Recorded values of one trust's series, paired with their timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Observed {
    /// Period labels of the recorded values.
    pub periods: Vec<String>,
    /// Numeric timeline of the recorded values.
    pub times: Vec<f64>,
    /// Recorded values, in period order.
    pub values: Vec<f64>,
}

impl Observed {
    /// Number of recorded values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builder for constructing an [`Engine`] from in-memory tables.
pub struct EngineBuilder {
    waiting: Option<MetricTable>,
    beds: Option<MetricTable>,
    deaths: Option<MetricTable>,
    registry: MergerRegistry,
    cfg: EngineConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    /// Create a builder with the published site's defaults.
    ///
    /// - No tables yet; A&E and bed tables are required by [`build`](Self::build).
    /// - The registry starts as [`MergerRegistry::known_mergers`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            waiting: None,
            beds: None,
            deaths: None,
            registry: MergerRegistry::known_mergers(),
            cfg: EngineConfig::default(),
        }
    }

    /// Monthly A&E table with attendance and waiting grids.
    #[must_use]
    pub fn waiting_table(mut self, table: MetricTable) -> Self {
        self.waiting = Some(table);
        self
    }

    /// Overnight bed table. Row names are normalised on build.
    #[must_use]
    pub fn beds_table(mut self, table: MetricTable) -> Self {
        self.beds = Some(table);
        self
    }

    /// Daily deaths table. Row names are normalised on build.
    #[must_use]
    pub fn deaths_table(mut self, table: MetricTable) -> Self {
        self.deaths = Some(table);
        self
    }

    /// Replace the merger registry.
    #[must_use]
    pub fn registry(mut self, registry: MergerRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: EngineConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Name of the national rollup row.
    #[must_use]
    pub fn national_entity(mut self, name: impl Into<String>) -> Self {
        self.cfg.national_entity = name.into();
        self
    }

    /// Absolute change below which a trust counts as unchanged.
    #[must_use]
    pub const fn change_threshold(mut self, threshold: f64) -> Self {
        self.cfg.change_threshold = threshold;
        self
    }

    /// Window of the trailing moving average.
    #[must_use]
    pub const fn smoothing_window(mut self, window: usize) -> Self {
        self.cfg.smoothing_window = window;
        self
    }

    /// Presentable periods of merged A&E series.
    #[must_use]
    pub const fn waiting_availability(mut self, availability: Availability) -> Self {
        self.cfg.waiting_availability = availability;
        self
    }

    /// Presentable periods of merged bed series.
    #[must_use]
    pub const fn beds_availability(mut self, availability: Availability) -> Self {
        self.cfg.beds_availability = availability;
        self
    }

    /// Build the engine.
    ///
    /// Period labels of every table are converted up front, so a malformed
    /// label fails the build instead of individual pages.
    ///
    /// # Errors
    /// - `InvalidArg` if the A&E or bed table is missing, or a config knob is
    ///   out of range.
    /// - `InvalidTable` if a table lacks the grid it is used for.
    /// - `Format` for the first malformed period label.
    pub fn build(self) -> Result<Engine, NhsError> {
        self.cfg.validate()?;
        let waiting = self
            .waiting
            .ok_or_else(|| NhsError::InvalidArg("no A&E table; add one via waiting_table(...)".into()))?;
        let beds = self
            .beds
            .ok_or_else(|| NhsError::InvalidArg("no bed table; add one via beds_table(...)".into()))?;

        waiting.grid(Metric::Attendance)?;
        waiting.grid(Metric::Waiting)?;
        beds.grid(Metric::Beds)?;
        let waiting_times = to_numeric_timeline(waiting.periods())?;
        let beds = normalize_table(beds);
        let bed_times = to_numeric_timeline(beds.periods())?;

        let deaths = match self.deaths {
            Some(table) => {
                table.grid(Metric::Deaths)?;
                let table = normalize_table(table);
                let times = to_daily_timeline(table.periods())?;
                Some((table, times))
            }
            None => None,
        };

        Ok(Engine {
            inner: Arc::new(EngineInner {
                waiting,
                waiting_times,
                beds,
                bed_times,
                deaths,
                registry: self.registry,
                cfg: self.cfg,
            }),
        })
    }
}

/// Tag a source failure with the source name, keeping data-shape errors as is.
pub fn tag_err(source: &str, e: NhsError) -> NhsError {
    match e {
        e @ (NhsError::Format { .. }
        | NhsError::InvalidTable(_)
        | NhsError::InvalidRegistry(_)
        | NhsError::Source { .. }) => e,
        other => NhsError::source_failed(source, other.to_string()),
    }
}

impl Engine {
    /// Start building a new `Engine` from in-memory tables.
    ///
    /// ```rust,ignore
    /// let engine = Engine::builder()
    ///     .waiting_table(ae)
    ///     .beds_table(beds)
    ///     .registry(MergerRegistry::known_mergers())
    ///     .change_threshold(50.0)
    ///     .build()?;
    /// let report = engine.build_pages().await;
    /// ```
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Load every table from `source` concurrently and build an engine.
    ///
    /// # Errors
    /// The first failing table load, tagged with the source name, or any
    /// error of [`EngineBuilder::build`].
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "howsmynhs::core::from_source",
            skip(source, cfg),
            fields(source = source.name()),
            err,
        )
    )]
    pub async fn from_source(source: &dyn TableSource, cfg: EngineConfig) -> Result<Self, NhsError> {
        let name = source.name();
        let (waiting, beds, deaths, registry) = futures::join!(
            source.waiting(),
            source.beds(),
            source.deaths(),
            source.registry(),
        );
        let mut builder = EngineBuilder::new()
            .config(cfg)
            .waiting_table(waiting.map_err(|e| tag_err(name, e))?)
            .beds_table(beds.map_err(|e| tag_err(name, e))?)
            .registry(registry.map_err(|e| tag_err(name, e))?);
        if let Some(table) = deaths.map_err(|e| tag_err(name, e))? {
            builder = builder.deaths_table(table);
        }
        builder.build()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.inner.cfg
    }

    /// Active merger registry.
    #[must_use]
    pub fn registry(&self) -> &MergerRegistry {
        &self.inner.registry
    }

    /// Table carrying `metric`, with its numeric timeline.
    ///
    /// # Errors
    /// Returns `NotFound` for deaths when no deaths table was loaded.
    pub fn table(&self, metric: Metric) -> Result<(&MetricTable, &[f64]), NhsError> {
        let inner = &*self.inner;
        match metric {
            Metric::Beds => Ok((&inner.beds, &inner.bed_times)),
            Metric::Deaths => inner
                .deaths
                .as_ref()
                .map(|(t, times)| (t, times.as_slice()))
                .ok_or_else(|| NhsError::not_found("deaths table")),
            _ => Ok((&inner.waiting, &inner.waiting_times)),
        }
    }

    /// Availability rule applied to merged series of `metric`.
    ///
    /// `None` for deaths: they are published per current trust only, so a
    /// successor's own row is its whole history.
    #[must_use]
    pub fn availability(&self, metric: Metric) -> Option<Availability> {
        let cfg = &self.inner.cfg;
        match metric {
            Metric::Beds => Some(cfg.beds_availability),
            Metric::Deaths => None,
            _ => Some(cfg.waiting_availability),
        }
    }

    /// Per-period cells of `name` for `metric`: reconciled for a merger
    /// successor of a merged metric, the trust's own row otherwise.
    ///
    /// # Errors
    /// `NotFound` when the trust has no row and is not reconciled, plus any
    /// reconciliation error.
    pub fn cells(&self, metric: Metric, name: &str) -> Result<Vec<Cell>, NhsError> {
        let (table, _) = self.table(metric)?;
        let grid = table.grid(metric)?;
        if let Some(availability) = self.availability(metric)
            && self.inner.registry.is_successor(name)
        {
            let series = reconcile(grid, table.rows(), name, &self.inner.registry, availability)?;
            return Ok(series.values);
        }
        table
            .row(metric, name)
            .map(<[Cell]>::to_vec)
            .ok_or_else(|| NhsError::not_found(format!("{metric} row for {name}")))
    }

    /// Recorded values of `name` for `metric`, with their periods and times.
    ///
    /// # Errors
    /// Same as [`Engine::cells`].
    pub fn observed(&self, metric: Metric, name: &str) -> Result<Observed, NhsError> {
        let (table, times) = self.table(metric)?;
        let cells = self.cells(metric, name)?;
        let mut out = Observed {
            periods: Vec::new(),
            times: Vec::new(),
            values: Vec::new(),
        };
        for ((cell, period), t) in cells.iter().zip(table.periods()).zip(times) {
            if let Some(v) = cell.value() {
                out.periods.push(period.clone());
                out.times.push(*t);
                out.values.push(v);
            }
        }
        Ok(out)
    }

    /// Number of recorded cells of `metric` for `name` or, for a successor,
    /// the best of its own row and each predecessor's row.
    #[must_use]
    pub fn recorded_points(&self, metric: Metric, name: &str) -> usize {
        let Ok((table, _)) = self.table(metric) else {
            return 0;
        };
        let own = table.present_count(metric, name);
        self.inner
            .registry
            .predecessors(name)
            .into_iter()
            .flatten()
            .map(|p| table.present_count(metric, p))
            .fold(own, usize::max)
    }

    /// Every entity that can get a page: names from all tables in first-seen
    /// order, then successors without a row whose predecessors have one,
    /// retired names left out.
    #[must_use]
    pub fn entities(&self) -> Vec<String> {
        let inner = &*self.inner;
        let mut tables = vec![&inner.waiting, &inner.beds];
        if let Some((t, _)) = &inner.deaths {
            tables.push(t);
        }
        let mut names = howsmynhs_core::combine_names(tables);
        let listed = names.len();
        for succ in inner.registry.successors() {
            let has_history = inner
                .registry
                .predecessors(succ)
                .into_iter()
                .flatten()
                .any(|p| names[..listed].contains(p));
            if has_history && !names.iter().any(|n| n == succ) {
                names.push(succ.to_string());
            }
        }
        names.retain(|n| !inner.registry.is_retired(n));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_err_keeps_shape_errors() {
        let e = tag_err("nhs", NhsError::InvalidTable("ragged".into()));
        assert!(matches!(e, NhsError::InvalidTable(_)));
        let e = tag_err("nhs", NhsError::InvalidArg("io".into()));
        assert!(matches!(e, NhsError::Source { source_name, .. } if source_name == "nhs"));
    }

    #[test]
    fn build_requires_both_monthly_tables() {
        let err = EngineBuilder::new().build().err().unwrap();
        assert!(matches!(err, NhsError::InvalidArg(_)));
    }
}
