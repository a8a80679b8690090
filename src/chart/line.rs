//! Line and multi-line charts.

use super::command::{DrawList, Point, Rect, SurfaceSize};
use super::layout::{PlotArea, Padding, draw_gridlines, no_data, tick_indices};
use super::{ChartContext, Series};
use crate::constants::{
    LEGEND_SPACING, LEGEND_SWATCH, LEGEND_Y, LINE_MAX_TICKS, LINE_PADDING, LINE_WIDTH,
    MULTI_LINE_MAX_TICKS, MULTI_LINE_PADDING, MULTI_LINE_WIDTH, TICK_LABEL_BOTTOM, TICK_LABEL_DX,
};

struct LineLayout {
    padding: Padding,
    max_ticks: usize,
    stroke: f64,
}

/// One trend line with its legend entry.
pub fn draw_line_chart(
    size: SurfaceSize,
    labels: &[String],
    series: &Series,
    ctx: &ChartContext<'_>,
) -> DrawList {
    let layout = LineLayout {
        padding: LINE_PADDING,
        max_ticks: LINE_MAX_TICKS,
        stroke: LINE_WIDTH,
    };
    draw_lines(size, labels, std::slice::from_ref(series), &layout, ctx)
}

/// Several series on one shared scale, legended left to right.
pub fn draw_multi_line_chart(
    size: SurfaceSize,
    labels: &[String],
    series: &[Series],
    ctx: &ChartContext<'_>,
) -> DrawList {
    let layout = LineLayout {
        padding: MULTI_LINE_PADDING,
        max_ticks: MULTI_LINE_MAX_TICKS,
        stroke: MULTI_LINE_WIDTH,
    };
    draw_lines(size, labels, series, &layout, ctx)
}

fn draw_lines(
    size: SurfaceSize,
    labels: &[String],
    series: &[Series],
    layout: &LineLayout,
    ctx: &ChartContext<'_>,
) -> DrawList {
    if labels.is_empty() || series.iter().all(|s| s.values.is_empty()) {
        return no_data(size, ctx);
    }

    let style = ctx.style;
    let n = labels.len();
    let area = PlotArea::new(size, layout.padding);
    let max = ctx
        .axis
        .scale(series.iter().flat_map(|s| s.values.iter().take(n).copied()));

    let mut list = DrawList::for_surface(size);
    draw_gridlines(&mut list, &area, max, ctx);

    for s in series {
        let points: Vec<Point> = s
            .values
            .iter()
            .take(n)
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| Point::new(area.x_for(i, n), area.y_for(*v, max)))
            .collect();
        if !points.is_empty() {
            list.polyline(points, s.color, s.width.unwrap_or(layout.stroke));
        }
    }

    for (idx, s) in series.iter().enumerate() {
        let x = area.left() + idx as f64 * LEGEND_SPACING;
        list.fill_rect(Rect::new(x, LEGEND_Y, LEGEND_SWATCH, LEGEND_SWATCH), s.color);
        list.text(
            s.name.clone(),
            Point::new(x + LEGEND_SWATCH + 6.0, LEGEND_Y + 12.0),
            style.text_color,
            style.font_size,
        );
    }

    for idx in tick_indices(n, layout.max_ticks) {
        list.text(
            labels[idx].clone(),
            Point::new(area.x_for(idx, n) - TICK_LABEL_DX, size.height - TICK_LABEL_BOTTOM),
            style.muted_color,
            style.font_size,
        );
    }

    list
}
