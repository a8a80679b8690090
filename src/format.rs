//! Display formatting for KPI values and chart labels.

use crate::aggregate::Average;
use serde::{Deserialize, Serialize};

/// Number formatting options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Separator between groups of three integer digits
    pub thousands_separator: String,
    /// Separator between integer and fractional digits
    pub decimal_separator: String,
    /// Shown in place of an undefined or non-finite value
    pub placeholder: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            thousands_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            placeholder: "-".to_string(),
        }
    }
}

impl NumberFormat {
    /// Integer count with thousands separators, e.g. `12,345`.
    ///
    /// Halves round up, so `2.5` → `3` and `-2.5` → `-2`.
    pub fn format_count(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.placeholder.clone();
        }
        let rounded = round_half_up(value);
        let digits = format!("{}", rounded.abs() as u64);
        let grouped = group_thousands(&digits, &self.thousands_separator);
        if rounded < 0.0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// One decimal place followed by `unit`, e.g. `4.2 yrs`. Halves round up.
    pub fn format_decimal(&self, value: f64, unit: &str) -> String {
        if !value.is_finite() {
            return self.placeholder.clone();
        }
        let tenths = round_half_up(value.abs() * 10.0) as u64;
        let sign = if value < 0.0 && tenths > 0 { "-" } else { "" };
        format!(
            "{}{}{}{}{}",
            sign,
            group_thousands(&(tenths / 10).to_string(), &self.thousands_separator),
            self.decimal_separator,
            tenths % 10,
            unit
        )
    }

    /// Average with one decimal place, or the placeholder when undefined.
    pub fn format_average(&self, average: Average, unit: &str) -> String {
        match average {
            Average::Defined(v) => self.format_decimal(v, unit),
            Average::Undefined => self.placeholder.clone(),
        }
    }

    /// Percentage with one decimal place, e.g. `38.5%`.
    pub fn format_percent(&self, percent: f64) -> String {
        self.format_decimal(percent, "%")
    }
}

/// `part` as a percentage of `total`; 0 when `total` is 0.
pub fn share(part: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() || !part.is_finite() {
        return 0.0;
    }
    part / total * 100.0
}

/// Round to the nearest integer, halves towards positive infinity.
#[inline]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Shorten `text` to at most `max` chars plus a `...` marker.
///
/// Texts within `max` chars are returned unchanged; longer texts keep their
/// first `max - 1` chars.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}...", head)
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3 * separator.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}
