//! Chart geometry layer
//!
//! Maps aggregated series (or a matrix) plus a surface size onto a
//! [`DrawList`]. Every draw call is a stateless full repaint: the list always
//! starts by clearing the surface. Given zero entries a chart emits only the
//! "no data" marker and performs no layout math.

mod bars;
mod command;
mod heatmap;
mod layout;
mod line;

pub use bars::*;
pub use command::*;
pub use heatmap::*;
pub use layout::*;
pub use line::*;

use crate::format::NumberFormat;
use serde::{Deserialize, Serialize};

/// Colours and type sizes shared by all charts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Label font size in pixels
    pub font_size: f64,
    /// Font size of rotated category labels and value captions
    pub small_font_size: f64,
    pub text_color: Rgba,
    pub muted_color: Rgba,
    pub grid_color: Rgba,
    /// Value labels drawn on top of a bar
    pub inverted_text_color: Rgba,
    /// Series colours, cycled by series index
    pub palette: Vec<Rgba>,
    pub no_data_label: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            small_font_size: 11.0,
            text_color: Rgba::rgb(0x11, 0x1f, 0x2a),
            muted_color: Rgba::rgb(0x5a, 0x66, 0x71),
            grid_color: Rgba::rgb(0xd9, 0xe2, 0xea),
            inverted_text_color: Rgba::WHITE,
            palette: vec![
                Rgba::rgb(0x19, 0x56, 0xc8),
                Rgba::rgb(0x14, 0x79, 0x5a),
                Rgba::rgb(0xd9, 0x6c, 0x1c),
                Rgba::rgb(0x8e, 0x3b, 0xb8),
                Rgba::rgb(0xc2, 0x2f, 0x4b),
                Rgba::rgb(0x2a, 0x8d, 0xa5),
            ],
            no_data_label: "No data".to_string(),
        }
    }
}

impl ChartStyle {
    /// Palette colour for the series at `index`, cycling.
    pub fn series_color(&self, index: usize) -> Rgba {
        if self.palette.is_empty() {
            return self.text_color;
        }
        self.palette[index % self.palette.len()]
    }
}

/// How plotted values are written on gridlines and bars.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValueFormat {
    /// Grouped integer, e.g. `1,204`
    #[default]
    Count,
    /// One decimal place followed by a unit, e.g. `48.5%`
    Decimal { suffix: &'static str },
}

/// Value scale of a chart: label format plus an optional fixed maximum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueAxis {
    pub format: ValueFormat,
    /// Fixed top of the scale; `max(1, data max)` when unset
    pub max: Option<f64>,
}

impl ValueAxis {
    /// Integer counts scaled to the data.
    pub const COUNT: ValueAxis = ValueAxis {
        format: ValueFormat::Count,
        max: None,
    };

    /// One-decimal values followed by `suffix`, scaled to the data.
    pub const fn decimal(suffix: &'static str) -> Self {
        Self {
            format: ValueFormat::Decimal { suffix },
            max: None,
        }
    }

    /// Percentages on a fixed 0 to 100 scale.
    pub const fn percent() -> Self {
        Self {
            format: ValueFormat::Decimal { suffix: "%" },
            max: Some(100.0),
        }
    }

    pub fn with_max(self, max: f64) -> Self {
        Self {
            max: Some(max),
            ..self
        }
    }

    /// Top of the scale: the fixed maximum when it is finite and positive,
    /// otherwise [`scale_max`] of `values`.
    pub fn scale<I>(&self, values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        match self.max {
            Some(max) if max.is_finite() && max > 0.0 => max,
            _ => scale_max(values),
        }
    }

    /// Label of one plotted value.
    pub fn value_label(&self, format: &NumberFormat, value: f64) -> String {
        match self.format {
            ValueFormat::Count => format.format_count(value),
            ValueFormat::Decimal { suffix } => format.format_decimal(value, suffix),
        }
    }

    /// Label of a gridline: always a rounded integer, with the unit suffix
    /// when there is one.
    pub fn grid_label(&self, format: &NumberFormat, value: f64) -> String {
        match self.format {
            ValueFormat::Count => format.format_count(value),
            ValueFormat::Decimal { suffix } => format!("{}{}", format.format_count(value), suffix),
        }
    }
}

/// Everything a chart needs besides its data and surface size.
#[derive(Clone, Copy)]
pub struct ChartContext<'a> {
    pub style: &'a ChartStyle,
    pub format: &'a NumberFormat,
    pub measure: &'a dyn TextMeasure,
    /// Value scale; counts scaled to the data unless a chart asks otherwise
    pub axis: ValueAxis,
}

impl<'a> ChartContext<'a> {
    pub fn new(style: &'a ChartStyle, format: &'a NumberFormat, measure: &'a dyn TextMeasure) -> Self {
        Self {
            style,
            format,
            measure,
            axis: ValueAxis::COUNT,
        }
    }

    /// Same context with a different value scale.
    pub fn with_axis(self, axis: ValueAxis) -> Self {
        Self { axis, ..self }
    }
}

impl std::fmt::Debug for ChartContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartContext")
            .field("style", self.style)
            .field("format", self.format)
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

/// One named series plotted against shared x labels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub color: Rgba,
    pub values: Vec<f64>,
    /// Stroke width; the chart kind's default when `None`
    pub width: Option<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: Rgba, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
            width: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }
}
