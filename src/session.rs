//! Session: the loaded rows and the current filter state.
//!
//! The session owns an immutable [`Snapshot`] of typed rows. Reloading
//! builds a complete new snapshot and swaps it in; a failed load leaves the
//! previous snapshot installed and only sets a status message. Filter
//! changes never touch the rows.

use crate::chart::{ApproxTextMeasure, ChartContext, SurfaceSize, TextMeasure, no_data};
use crate::constants::LOAD_WARN_MS;
use crate::dashboard::{ChartFrame, Dashboard, PassContext, PassOutput};
use crate::data::{DataError, DataResult, DEFAULT_DELIMITER, parse_table_with};
use crate::dataset::{Dataset, FacetDef};
use crate::facet::{
    CategoryIndex, FacetSelection, FilterState, SelectionMode, YearRange, distinct_values,
    filter_rows, year_domain,
};
use crate::perf::{PipelineMonitor, ScopedTimer, measure};
use crate::settings::Settings;
use anyhow::Context as _;
use parking_lot::Mutex;
use std::fmt::Display;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a successful load.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadSummary {
    pub source: String,
    /// Rows kept by the normalizer
    pub rows: usize,
    /// Records the normalizer dropped
    pub rejected: usize,
    /// Span of the loaded years
    pub years: Option<YearRange>,
    pub elapsed_ms: f64,
}

/// Immutable working set of typed rows with their derived domains.
#[derive(Debug)]
pub struct Snapshot<R> {
    rows: Vec<R>,
    years: Vec<i32>,
    categories: CategoryIndex,
    rejected: usize,
    source: String,
}

impl<R> Default for Snapshot<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            years: Vec::new(),
            categories: CategoryIndex::default(),
            rejected: 0,
            source: String::new(),
        }
    }
}

impl<R> Snapshot<R> {
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// Sorted distinct years.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last loaded year.
    pub fn year_span(&self) -> Option<YearRange> {
        match (self.years.first(), self.years.last()) {
            (Some(&min), Some(&max)) => Some(YearRange::new(min, max)),
            _ => None,
        }
    }
}

/// One dataset's rows, filters and settings.
pub struct Session<D: Dataset> {
    dataset: D,
    snapshot: Arc<Snapshot<D::Row>>,
    filters: FilterState,
    status: Option<String>,
    settings: Settings,
    measure: Box<dyn TextMeasure + Send + Sync>,
    monitor: Mutex<PipelineMonitor>,
}

impl<D: Dataset> Session<D> {
    pub fn new(dataset: D) -> Self {
        Self::with_settings(dataset, Settings::default())
    }

    pub fn with_settings(dataset: D, settings: Settings) -> Self {
        Self {
            dataset,
            snapshot: Arc::new(Snapshot::default()),
            filters: FilterState::default(),
            status: None,
            settings,
            measure: Box::new(ApproxTextMeasure::default()),
            monitor: Mutex::new(PipelineMonitor::new()),
        }
    }

    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Replace the text width estimate used for label overflow decisions.
    pub fn set_text_measure(&mut self, measure: Box<dyn TextMeasure + Send + Sync>) {
        self.measure = measure;
    }

    /// The installed snapshot. Holding it keeps it alive across reloads.
    pub fn snapshot(&self) -> Arc<Snapshot<D::Row>> {
        Arc::clone(&self.snapshot)
    }

    pub fn rows(&self) -> &[D::Row] {
        self.snapshot.rows()
    }

    /// Sorted distinct years of the loaded rows.
    pub fn years(&self) -> &[i32] {
        self.snapshot.years()
    }

    /// Categories of a facet in canonical display order.
    pub fn categories(&self, key: &str) -> &[String] {
        self.snapshot.categories().get(key)
    }

    pub fn facets(&self) -> &[FacetDef<D::Row>] {
        self.dataset.facets()
    }

    /// Human-readable outcome of the last load attempt.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Parse and normalize `text`, then install it as the working set.
    ///
    /// On error the previous snapshot and filters stay in place.
    pub fn load_text(&mut self, text: &str, source: &str) -> DataResult<LoadSummary> {
        let _timer = ScopedTimer::new("load", LOAD_WARN_MS);
        let (built, elapsed_ms) = measure(|| self.build_snapshot(text, source));
        let snapshot = match built {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.record_load_failure(source, &e);
                return Err(e);
            }
        };

        let summary = LoadSummary {
            source: source.to_string(),
            rows: snapshot.rows.len(),
            rejected: snapshot.rejected,
            years: snapshot.year_span(),
            elapsed_ms,
        };
        self.snapshot = Arc::new(snapshot);
        self.filters = self.default_filters();
        self.status = Some(format!(
            "Loaded {}: {} rows ({} rejected).",
            source, summary.rows, summary.rejected
        ));
        info!(
            dataset = self.dataset.name(),
            source,
            rows = summary.rows,
            rejected = summary.rejected,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            "Loaded dataset"
        );
        Ok(summary)
    }

    /// Load raw bytes; invalid UTF-8 is replaced rather than rejected.
    pub fn load_bytes(&mut self, bytes: &[u8], source: &str) -> DataResult<LoadSummary> {
        let text = String::from_utf8_lossy(bytes);
        self.load_text(&text, source)
    }

    /// Read and load a file.
    pub fn load_file(&mut self, path: &Path) -> anyhow::Result<LoadSummary> {
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.record_load_failure(&source, &e);
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        let summary = self
            .load_bytes(&bytes, &source)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(summary)
    }

    /// Report a load that failed before or outside the session (for example
    /// a fetch the host performed). The installed snapshot is kept.
    pub fn record_load_failure(&mut self, source: &str, error: &dyn Display) {
        warn!(dataset = self.dataset.name(), source, error = %error, "Load failed");
        self.status = Some(format!("Could not load {}: {}", source, error));
    }

    fn build_snapshot(&self, text: &str, source: &str) -> DataResult<Snapshot<D::Row>> {
        if text.trim().is_empty() {
            return Err(DataError::EmptyFile);
        }
        let table = parse_table_with(text, DEFAULT_DELIMITER);
        if table.headers.iter().all(|h| h.trim().is_empty()) {
            return Err(DataError::NoColumns);
        }
        if let Some(missing) = self
            .dataset
            .required_columns()
            .iter()
            .find(|c| !table.has_column(c))
        {
            return Err(DataError::MissingColumn(missing.to_string()));
        }

        let rows: Vec<D::Row> = table
            .records
            .iter()
            .filter_map(|record| self.dataset.normalize(record))
            .collect();
        let rejected = table.records.len() - rows.len();
        if rows.is_empty() {
            return Err(DataError::NoRows { rejected });
        }
        let rows = self.dataset.finish_rows(rows);

        let years = year_domain(rows.iter().map(|r| self.dataset.temporal(r)));
        let mut categories = CategoryIndex::default();
        for facet in self.dataset.facets() {
            let values = distinct_values(rows.iter().map(|r| (facet.value)(r)));
            categories.insert(facet.key, facet.order.arrange(values));
        }

        Ok(Snapshot {
            rows,
            years,
            categories,
            rejected,
            source: source.to_string(),
        })
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Replace the whole filter state, as supplied by the host.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
    }

    /// Full year span, every required facet fully selected, every optional
    /// facet empty.
    pub fn default_filters(&self) -> FilterState {
        let years = self.snapshot.year_span().unwrap_or_default();
        let mut filters = FilterState::new(years);
        for facet in self.dataset.facets() {
            let selection = match facet.mode {
                SelectionMode::Required => FacetSelection::with_values(
                    SelectionMode::Required,
                    self.categories(facet.key).iter().cloned(),
                ),
                SelectionMode::Optional => FacetSelection::new(SelectionMode::Optional),
            };
            filters.set_facet(facet.key, selection);
        }
        filters
    }

    pub fn reset_filters(&mut self) {
        self.filters = self.default_filters();
    }

    /// Move the lower year bound, clamped to the loaded years and never
    /// past the upper bound.
    pub fn set_year_min(&mut self, year: i32) {
        let year = self.clamp_year(year).min(self.filters.years.max);
        self.filters.years.min = year;
    }

    /// Move the upper year bound, clamped to the loaded years and never
    /// below the lower bound.
    pub fn set_year_max(&mut self, year: i32) {
        let year = self.clamp_year(year).max(self.filters.years.min);
        self.filters.years.max = year;
    }

    /// Set both bounds as given. An inverted range selects nothing.
    pub fn set_year_range(&mut self, min: i32, max: i32) {
        self.filters.set_years(min, max);
    }

    fn clamp_year(&self, year: i32) -> i32 {
        match self.snapshot.year_span() {
            Some(span) => year.clamp(span.min, span.max),
            None => year,
        }
    }

    /// Replace a facet's selection. `false` for unknown facets.
    pub fn select<I, S>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.select(key, values)
    }

    /// Toggle one value of a facet. `false` for unknown facets.
    pub fn toggle(&mut self, key: &str, value: &str) -> bool {
        self.filters.toggle(key, value)
    }

    /// Rows passing the current filters, in load order.
    pub fn filtered(&self) -> Vec<&D::Row> {
        filter_rows(
            self.snapshot.rows(),
            |r| self.dataset.temporal(r),
            self.dataset.facets(),
            &self.filters,
        )
    }

    // ------------------------------------------------------------------
    // Monitoring
    // ------------------------------------------------------------------

    /// Inspect pipeline timing statistics.
    pub fn with_monitor<T>(&self, f: impl FnOnce(&PipelineMonitor) -> T) -> T {
        f(&self.monitor.lock())
    }
}

impl<D: Dashboard> Session<D> {
    /// Run one filter → aggregate → draw pass.
    ///
    /// `surfaces` names the charts to draw and their sizes; unknown chart
    /// ids are skipped.
    pub fn run_pass(&self, surfaces: &[(&str, SurfaceSize)]) -> PassOutput {
        let mut monitor = self.monitor.lock();
        monitor.begin_pass();

        let rows = monitor.stage("filter", || self.filtered());
        let ctx = PassContext {
            rows: &rows,
            filters: &self.filters,
            categories: self.snapshot.categories(),
            years: self.snapshot.years(),
            format: &self.settings.format,
            chart: ChartContext::new(&self.settings.chart, &self.settings.format, self.measure.as_ref()),
        };

        let kpis = monitor.stage("kpis", || self.dataset.kpis(&ctx));
        let charts = monitor.stage("draw", || {
            surfaces
                .iter()
                .filter_map(|(id, size)| {
                    let Some(&id) = self.dataset.chart_ids().iter().find(|c| *c == id) else {
                        debug!(chart = *id, "Unknown chart id");
                        return None;
                    };
                    let commands = if rows.is_empty() {
                        no_data(*size, &ctx.chart)
                    } else {
                        self.dataset.draw(id, *size, &ctx)?
                    };
                    Some(ChartFrame {
                        id,
                        size: *size,
                        commands,
                    })
                })
                .collect::<Vec<_>>()
        });
        let highlights = monitor.stage("highlights", || self.dataset.highlights(&ctx));

        monitor.end_pass();
        debug!(
            dataset = self.dataset.name(),
            rows = rows.len(),
            charts = charts.len(),
            "Pipeline pass"
        );

        PassOutput {
            row_count: rows.len(),
            kpis,
            charts,
            highlights,
        }
    }

    /// Draw every chart of the dashboard at one size.
    pub fn run_pass_uniform(&self, size: SurfaceSize) -> PassOutput {
        let surfaces: Vec<(&str, SurfaceSize)> = self
            .dataset
            .chart_ids()
            .iter()
            .map(|id| (*id, size))
            .collect();
        self.run_pass(&surfaces)
    }
}
