//! Chart layout constants and the accepted year domain.
//!
//! Paddings reserve room for axis labels and legends, so they differ per
//! chart kind. Layout values are in surface pixels.

use crate::chart::Padding;

// ============================================================================
// Shared Scale
// ============================================================================

/// Floor of the vertical scale maximum; keeps all-zero data division-safe
pub const MIN_SCALE_MAX: f64 = 1.0;

/// Number of equal vertical divisions between gridlines
pub const GRID_DIVISIONS: usize = 4;

/// Horizontal offset of gridline value labels
pub const GRID_LABEL_X: f64 = 6.0;

/// Baseline offset of gridline value labels below the gridline
pub const GRID_LABEL_DY: f64 = 4.0;

/// Position of the "no data" marker
pub const NO_DATA_X: f64 = 12.0;
pub const NO_DATA_Y: f64 = 24.0;

// ============================================================================
// Line Charts
// ============================================================================

pub const LINE_PADDING: Padding = Padding::new(28.0, 14.0, 30.0, 46.0);

/// Maximum x-axis tick labels on a single-series line chart
pub const LINE_MAX_TICKS: usize = 6;

/// Stroke width of a single-series trend line
pub const LINE_WIDTH: f64 = 3.0;

pub const MULTI_LINE_PADDING: Padding = Padding::new(28.0, 10.0, 34.0, 40.0);

/// Maximum x-axis tick labels on a multi-series line chart
pub const MULTI_LINE_MAX_TICKS: usize = 5;

/// Stroke width of each series in a multi-series chart
pub const MULTI_LINE_WIDTH: f64 = 2.5;

/// Horizontal spacing between legend entries
pub const LEGEND_SPACING: f64 = 120.0;

/// Legend swatch edge length
pub const LEGEND_SWATCH: f64 = 14.0;

/// Top of the legend swatch
pub const LEGEND_Y: f64 = 8.0;

/// Tick labels are shifted left by this much to centre them on the point
pub const TICK_LABEL_DX: f64 = 14.0;

/// Distance of tick label baselines from the bottom edge
pub const TICK_LABEL_BOTTOM: f64 = 8.0;

// ============================================================================
// Bar Charts
// ============================================================================

pub const HBAR_PADDING: Padding = Padding::new(16.0, 56.0, 10.0, 150.0);

/// Thickness of one horizontal bar
pub const HBAR_HEIGHT: f64 = 17.0;

/// Gap between horizontal bars
pub const HBAR_GAP: f64 = 9.0;

/// Category labels longer than this are truncated
pub const HBAR_LABEL_CHARS: usize = 22;

/// Gap between a bar end and its value label
pub const HBAR_VALUE_GAP: f64 = 6.0;

pub const VBAR_PADDING: Padding = Padding::new(16.0, 8.0, 84.0, 24.0);

/// Gap between vertical bars
pub const VBAR_GAP: f64 = 7.0;

/// Narrowest a vertical bar may get
pub const VBAR_MIN_WIDTH: f64 = 6.0;

/// Rotated category labels longer than this are truncated
pub const VBAR_LABEL_CHARS: usize = 18;

/// Rotation of vertical bar category labels, in radians
pub const VBAR_LABEL_ANGLE: f64 = -std::f64::consts::PI / 5.5;

// ============================================================================
// Heatmap
// ============================================================================

pub const HEATMAP_PADDING: Padding = Padding::new(28.0, 10.0, 38.0, 110.0);

/// Opacity of a zero-valued cell
pub const HEATMAP_MIN_ALPHA: f64 = 0.12;

/// Opacity of the largest cell
pub const HEATMAP_MAX_ALPHA: f64 = 0.90;

/// Maximum x-axis tick labels on a heatmap
pub const HEATMAP_MAX_TICKS: usize = 6;

/// Distance of the caption from the right edge
pub const HEATMAP_CAPTION_INSET: f64 = 220.0;

// ============================================================================
// Temporal Domain
// ============================================================================

/// Earliest year a normalizer accepts
pub const MIN_YEAR: i32 = 1800;

/// Latest year a normalizer accepts
pub const MAX_YEAR: i32 = 2200;

// ============================================================================
// Performance Thresholds
// ============================================================================

/// Warn when parsing and normalizing a file takes longer than this
pub const LOAD_WARN_MS: f64 = 250.0;

/// Warn when one filter → aggregate → draw pass takes longer than this
pub const PASS_WARN_MS: f64 = 16.67;
