//! Weighted averages with an explicit "undefined" result.

use serde::Serialize;

/// Result of an average: a value, or undefined when nothing valid
/// contributed. Undefined is displayed as a placeholder, never as 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Average {
    Defined(f64),
    Undefined,
}

impl Average {
    pub fn value(self) -> Option<f64> {
        match self {
            Average::Defined(v) => Some(v),
            Average::Undefined => None,
        }
    }

    pub fn is_defined(self) -> bool {
        matches!(self, Average::Defined(_))
    }

    fn from_ratio(numerator: f64, denominator: f64) -> Self {
        if denominator == 0.0 {
            return Average::Undefined;
        }
        let v = numerator / denominator;
        if v.is_finite() {
            Average::Defined(v)
        } else {
            Average::Undefined
        }
    }
}

/// Σ(value·weight) / Σ(weight) over rows where both are finite.
///
/// Undefined when no row qualifies or the weight sum is zero.
pub fn weighted_average<'a, R, I, FV, FW>(rows: I, mut value: FV, mut weight: FW) -> Average
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    FV: FnMut(&R) -> f64,
    FW: FnMut(&R) -> f64,
{
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for row in rows {
        let v = value(row);
        let w = weight(row);
        if !v.is_finite() || !w.is_finite() {
            continue;
        }
        numerator += v * w;
        denominator += w;
    }
    Average::from_ratio(numerator, denominator)
}

/// Plain mean of the finite values; undefined when there are none.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Average {
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    Average::from_ratio(sum, n as f64)
}
