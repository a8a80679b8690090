//! Heatmap over a row × column matrix.

use super::command::{DrawList, Point, Rect, Rgba, SurfaceSize};
use super::layout::{PlotArea, no_data, scale_max, tick_indices};
use super::ChartContext;
use crate::aggregate::Matrix;
use crate::constants::{
    HEATMAP_CAPTION_INSET, HEATMAP_MAX_ALPHA, HEATMAP_MAX_TICKS, HEATMAP_MIN_ALPHA, HEATMAP_PADDING,
};

/// Cell opacity: linear from the minimum alpha at 0 to the maximum alpha at
/// `max`. Zero cells stay visible.
#[inline]
pub fn cell_alpha(value: f64, max: f64) -> f64 {
    let ratio = if value.is_finite() { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    HEATMAP_MIN_ALPHA + ratio * (HEATMAP_MAX_ALPHA - HEATMAP_MIN_ALPHA)
}

/// Shade every cell of `matrix`, label rows on the left and up to six
/// columns along the bottom. `caption` goes in the top strip.
pub fn draw_heatmap(
    size: SurfaceSize,
    matrix: &Matrix,
    color: Rgba,
    caption: Option<&str>,
    ctx: &ChartContext<'_>,
) -> DrawList {
    if matrix.is_empty() {
        return no_data(size, ctx);
    }

    let style = ctx.style;
    let area = PlotArea::new(size, HEATMAP_PADDING);
    let rows = matrix.rows();
    let cols = matrix.cols();
    let cell_w = area.width / cols as f64;
    let cell_h = area.height / rows as f64;
    let max = scale_max(matrix.max_value());

    let mut list = DrawList::for_surface(size);
    for r in 0..rows {
        for c in 0..cols {
            let alpha = cell_alpha(matrix.get(r, c), max);
            list.fill_rect(
                Rect::new(
                    area.left() + c as f64 * cell_w,
                    area.top() + r as f64 * cell_h,
                    (cell_w - 1.0).max(1.0),
                    (cell_h - 1.0).max(1.0),
                ),
                color.with_alpha(alpha),
            );
        }
    }

    for (i, label) in matrix.row_labels().iter().enumerate() {
        list.text(
            label.clone(),
            Point::new(8.0, area.top() + i as f64 * cell_h + 14.0),
            style.text_color,
            style.font_size,
        );
    }

    for idx in tick_indices(cols, HEATMAP_MAX_TICKS) {
        list.text(
            matrix.col_labels()[idx].clone(),
            Point::new(area.left() + idx as f64 * cell_w - 12.0, size.height - 10.0),
            style.text_color,
            style.font_size,
        );
    }

    if let Some(caption) = caption {
        list.text(
            caption,
            Point::new(size.width - HEATMAP_CAPTION_INSET, 16.0),
            style.muted_color,
            style.font_size,
        );
    }
    list
}
