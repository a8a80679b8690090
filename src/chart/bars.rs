//! Horizontal and vertical bar charts over ranked entries.

use super::command::{DrawCommand, DrawList, Point, Rect, Rgba, SurfaceSize};
use super::layout::{PlotArea, no_data};
use super::ChartContext;
use crate::constants::{
    HBAR_GAP, HBAR_HEIGHT, HBAR_LABEL_CHARS, HBAR_PADDING, HBAR_VALUE_GAP, VBAR_GAP,
    VBAR_LABEL_ANGLE, VBAR_LABEL_CHARS, VBAR_MIN_WIDTH, VBAR_PADDING,
};
use crate::format::truncate;

/// Baseline of bar labels relative to the bar top
const HBAR_TEXT_DY: f64 = 13.0;

/// Where a horizontal bar's value label ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValuePlacement {
    /// Just past the bar end
    Outside,
    /// Inside the bar end in the inverted colour, because outside would
    /// overflow the surface
    Inside,
}

/// Value label position for a bar ending at `bar_end`.
pub fn place_value_label(
    plot_left: f64,
    bar_end: f64,
    label_width: f64,
    surface_width: f64,
) -> (f64, ValuePlacement) {
    let outside_x = bar_end + HBAR_VALUE_GAP;
    if outside_x + label_width <= surface_width - HBAR_VALUE_GAP {
        (outside_x, ValuePlacement::Outside)
    } else {
        let inside_x = (plot_left + 4.0).max(bar_end - label_width - HBAR_VALUE_GAP);
        (inside_x, ValuePlacement::Inside)
    }
}

/// One bar per entry, top to bottom, length proportional to value / max.
///
/// Values above a fixed axis maximum are drawn at full length.
pub fn draw_horizontal_bars(
    size: SurfaceSize,
    entries: &[(String, f64)],
    color: Rgba,
    ctx: &ChartContext<'_>,
) -> DrawList {
    if entries.is_empty() {
        return no_data(size, ctx);
    }

    let style = ctx.style;
    let area = PlotArea::new(size, HBAR_PADDING);
    let max = ctx.axis.scale(entries.iter().map(|(_, v)| *v));

    let mut list = DrawList::for_surface(size);
    for (i, (name, value)) in entries.iter().enumerate() {
        let y = area.top() + i as f64 * (HBAR_HEIGHT + HBAR_GAP);
        let w = (value / max).max(0.0).min(1.0) * area.width;
        list.fill_rect(Rect::new(area.left(), y, w, HBAR_HEIGHT), color);
        list.text(
            truncate(name, HBAR_LABEL_CHARS),
            Point::new(8.0, y + HBAR_TEXT_DY),
            style.text_color,
            style.font_size,
        );

        let value_text = ctx.axis.value_label(ctx.format, *value);
        let value_width = ctx.measure.text_width(&value_text, style.font_size);
        let (x, placement) = place_value_label(area.left(), area.left() + w, value_width, size.width);
        let value_color = match placement {
            ValuePlacement::Outside => style.text_color,
            ValuePlacement::Inside => style.inverted_text_color,
        };
        list.text(value_text, Point::new(x, y + HBAR_TEXT_DY), value_color, style.font_size);
    }
    list
}

/// One column per entry, left to right, with a rotated category label
/// underneath and the value above.
pub fn draw_vertical_bars(
    size: SurfaceSize,
    entries: &[(String, f64)],
    color: Rgba,
    ctx: &ChartContext<'_>,
) -> DrawList {
    if entries.is_empty() {
        return no_data(size, ctx);
    }

    let style = ctx.style;
    let area = PlotArea::new(size, VBAR_PADDING);
    let max = ctx.axis.scale(entries.iter().map(|(_, v)| *v));
    let bar_width = (area.width / entries.len() as f64 - VBAR_GAP).max(VBAR_MIN_WIDTH);

    let mut list = DrawList::for_surface(size);
    for (i, (name, value)) in entries.iter().enumerate() {
        let x = area.left() + i as f64 * (bar_width + VBAR_GAP);
        let h = (value / max).max(0.0).min(1.0) * area.height;
        let y = area.top() + area.height - h;

        list.fill_rect(Rect::new(x, y, bar_width, h), color);
        list.push(DrawCommand::RotatedText {
            text: truncate(name, VBAR_LABEL_CHARS),
            origin: Point::new(x + bar_width / 2.0, size.height - 12.0),
            offset: Point::new(-24.0, 0.0),
            angle: VBAR_LABEL_ANGLE,
            color: style.text_color,
            font_size: style.small_font_size,
        });
        list.text(
            ctx.axis.value_label(ctx.format, *value),
            Point::new(x + 2.0, y - 4.0),
            style.text_color,
            style.small_font_size,
        );
    }
    list
}
