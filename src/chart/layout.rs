//! Plot area, scales, ticks and gridlines shared by every chart kind.

use super::command::{DrawList, Point, SurfaceSize};
use super::ChartContext;
use crate::constants::{
    GRID_DIVISIONS, GRID_LABEL_DY, GRID_LABEL_X, MIN_SCALE_MAX, NO_DATA_X, NO_DATA_Y,
};
use crate::format::round_half_up;

/// Space reserved around the plot area for labels and legends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }
}

/// Surface size minus padding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub surface: SurfaceSize,
    pub padding: Padding,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Plot area inside `padding`. A surface smaller than its padding gives a
    /// zero-sized plot rather than a negative one.
    pub fn new(surface: SurfaceSize, padding: Padding) -> Self {
        Self {
            surface,
            padding,
            width: (surface.width - padding.left - padding.right).max(0.0),
            height: (surface.height - padding.top - padding.bottom).max(0.0),
        }
    }

    pub fn left(&self) -> f64 {
        self.padding.left
    }

    pub fn top(&self) -> f64 {
        self.padding.top
    }

    /// Right edge of the plot, where gridlines end
    pub fn right(&self) -> f64 {
        self.surface.width - self.padding.right
    }

    pub fn bottom(&self) -> f64 {
        self.padding.top + self.height
    }

    /// X of the i-th of `n` evenly spaced points; a single point sits on the
    /// left edge.
    #[inline]
    pub fn x_for(&self, i: usize, n: usize) -> f64 {
        if n <= 1 {
            return self.padding.left;
        }
        self.padding.left + (i as f64 / (n - 1) as f64) * self.width
    }

    /// Y of `value` on a scale from 0 (bottom) to `max` (top).
    #[inline]
    pub fn y_for(&self, value: f64, max: f64) -> f64 {
        self.padding.top + self.height - (value / max) * self.height
    }
}

/// Scale maximum: `max(1, max(values))`, ignoring non-finite values.
pub fn scale_max<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(MIN_SCALE_MAX, f64::max)
}

/// Indices of at most `max_ticks` labels spread evenly over `n` points.
///
/// The first and last point are always labelled when more than one tick fits.
pub fn tick_indices(n: usize, max_ticks: usize) -> Vec<usize> {
    let ticks = max_ticks.min(n);
    if ticks == 0 {
        return Vec::new();
    }
    let span = (ticks - 1).max(1) as f64;
    let mut out: Vec<usize> = (0..ticks)
        .map(|i| round_half_up(i as f64 / span * (n - 1) as f64) as usize)
        .collect();
    out.dedup();
    out
}

/// Gridlines at equal vertical divisions, each labelled with its rounded value
/// in the context's axis format.
pub fn draw_gridlines(list: &mut DrawList, area: &PlotArea, max: f64, ctx: &ChartContext<'_>) {
    let style = ctx.style;
    for i in 0..=GRID_DIVISIONS {
        let fraction = i as f64 / GRID_DIVISIONS as f64;
        let y = area.top() + area.height * fraction;
        list.line(
            Point::new(area.left(), y),
            Point::new(area.right(), y),
            style.grid_color,
            1.0,
        );
        let value = round_half_up(max * (1.0 - fraction));
        list.text(
            ctx.axis.grid_label(ctx.format, value),
            Point::new(GRID_LABEL_X, y + GRID_LABEL_DY),
            style.muted_color,
            style.font_size,
        );
    }
}

/// A cleared surface carrying only the "no data" marker.
pub fn no_data(size: SurfaceSize, ctx: &ChartContext<'_>) -> DrawList {
    let mut list = DrawList::for_surface(size);
    list.text(
        ctx.style.no_data_label.clone(),
        Point::new(NO_DATA_X, NO_DATA_Y),
        ctx.style.muted_color,
        ctx.style.font_size,
    );
    list
}
