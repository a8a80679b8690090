//! Abstract draw commands.
//!
//! Chart geometry is expressed as a flat list of commands that any drawing
//! backend can replay. Layout is testable without a backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGBA colour. Serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`
    pub a: f64,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        match digits.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|v| v * 17);
                Some(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f64 / 255.0)),
            _ => None,
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a < 1.0 {
            write!(f, "{:02x}", (self.a * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value).ok_or_else(|| format!("invalid colour: {}", value))
    }
}

impl From<Rgba> for String {
    fn from(value: Rgba) -> Self {
        value.to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Pixel size of the caller-provided drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One drawing primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { width: f64, height: f64 },
    /// Straight line segment
    Line { from: Point, to: Point, color: Rgba, width: f64 },
    /// Open polyline through the points
    Polyline { points: Vec<Point>, color: Rgba, width: f64 },
    /// Filled rectangle
    FillRect { rect: Rect, color: Rgba },
    /// Text with its baseline starting at `at`
    Text { text: String, at: Point, color: Rgba, font_size: f64 },
    /// Text drawn at `offset` in a frame translated to `origin` and rotated
    /// by `angle` radians
    RotatedText {
        text: String,
        origin: Point,
        offset: Point,
        angle: f64,
        color: Rgba,
        font_size: f64,
    },
}

/// Backend that executes draw commands against a real surface.
pub trait DrawBackend {
    fn execute(&mut self, command: &DrawCommand);
}

/// Text width estimate used for overflow decisions.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64;
}

/// Fixed advance per character, as a fraction of the font size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxTextMeasure {
    pub em_per_char: f64,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self { em_per_char: 0.6 }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn text_width(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * self.em_per_char
    }
}

/// Ordered draw commands for one full repaint of one surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Start a repaint: the first command always clears the surface.
    pub fn for_surface(size: SurfaceSize) -> Self {
        Self {
            commands: vec![DrawCommand::Clear {
                width: size.width,
                height: size.height,
            }],
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.push(DrawCommand::Line { from, to, color, width });
    }

    pub fn polyline(&mut self, points: Vec<Point>, color: Rgba, width: f64) {
        self.push(DrawCommand::Polyline { points, color, width });
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, at: Point, color: Rgba, font_size: f64) {
        self.push(DrawCommand::Text {
            text: text.into(),
            at,
            color,
            font_size,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings, in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } | DrawCommand::RotatedText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every filled rectangle, in draw order.
    pub fn rects(&self) -> Vec<(Rect, Rgba)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Replay onto a backend.
    pub fn replay(&self, backend: &mut dyn DrawBackend) {
        for command in &self.commands {
            backend.execute(command);
        }
    }
}
