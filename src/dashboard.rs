//! KPI board and chart output of one pipeline pass.
//!
//! A [`Dashboard`] is a [`Dataset`] that also knows which KPIs and charts to
//! derive from the filtered rows. The session runs the pass; the dashboard
//! only maps a [`PassContext`] to display values and draw lists.

use crate::chart::{ChartContext, DrawList, SurfaceSize};
use crate::dataset::Dataset;
use crate::facet::{CategoryIndex, FilterState, contiguous_years};
use crate::format::NumberFormat;
use serde::Serialize;

/// One labelled, formatted key figure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
}

impl Kpi {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Draw commands for one chart surface.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartFrame {
    pub id: &'static str,
    pub size: SurfaceSize,
    pub commands: DrawList,
}

/// Everything the host displays after one filter change.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PassOutput {
    /// Rows passing the current filters
    pub row_count: usize,
    pub kpis: Vec<Kpi>,
    pub charts: Vec<ChartFrame>,
    /// Short plain-text observations about the current slice
    pub highlights: Vec<String>,
}

impl PassOutput {
    pub fn kpi(&self, label: &str) -> Option<&str> {
        self.kpis
            .iter()
            .find(|k| k.label == label)
            .map(|k| k.value.as_str())
    }

    pub fn chart(&self, id: &str) -> Option<&ChartFrame> {
        self.charts.iter().find(|c| c.id == id)
    }
}

/// Inputs shared by every KPI and chart of one pass.
pub struct PassContext<'a, R> {
    /// Filtered rows, in load order
    pub rows: &'a [&'a R],
    pub filters: &'a FilterState,
    pub categories: &'a CategoryIndex,
    /// Sorted distinct years of the loaded rows
    pub years: &'a [i32],
    pub format: &'a NumberFormat,
    pub chart: ChartContext<'a>,
}

impl<'a, R> PassContext<'a, R> {
    /// Every year of the selected range that lies within the loaded data,
    /// including years with no rows.
    pub fn visible_years(&self) -> Vec<i32> {
        match (self.years.first(), self.years.last()) {
            (Some(&first), Some(&last)) => contiguous_years(
                self.filters.years.min.max(first),
                self.filters.years.max.min(last),
            ),
            _ => Vec::new(),
        }
    }

    /// Visible years as axis labels.
    pub fn year_labels(&self) -> Vec<String> {
        self.visible_years().iter().map(i32::to_string).collect()
    }

    /// Iterate the filtered rows.
    pub fn iter(&self) -> impl Iterator<Item = &'a R> + '_ {
        self.rows.iter().copied()
    }
}

/// KPI and chart definitions of one dataset.
pub trait Dashboard: Dataset {
    /// Chart ids, in display order.
    fn chart_ids(&self) -> &'static [&'static str];

    /// Key figures over the filtered rows.
    fn kpis(&self, ctx: &PassContext<'_, Self::Row>) -> Vec<Kpi>;

    /// Draw one chart. `None` for unknown ids.
    ///
    /// Only called with at least one filtered row; an empty pass draws the
    /// "no data" marker for every chart.
    fn draw(
        &self,
        chart: &str,
        size: SurfaceSize,
        ctx: &PassContext<'_, Self::Row>,
    ) -> Option<DrawList>;

    /// Plain-text observations; empty by default.
    fn highlights(&self, _ctx: &PassContext<'_, Self::Row>) -> Vec<String> {
        Vec::new()
    }
}
