//! Header-keyed raw records.

use serde::Serialize;
use std::sync::Arc;

/// One parsed input line, keyed by the header row's column names.
///
/// Headers are shared between all records of a document. Values are
/// positionally zipped against the header, so a short row maps its missing
/// trailing cells to the empty string and a long row drops its extra cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RawRecord {
    #[serde(skip)]
    headers: Arc<[String]>,
    values: Vec<String>,
}

impl RawRecord {
    /// Zip one row of cells against the shared header.
    pub fn zip(headers: Arc<[String]>, mut cells: Vec<String>) -> Self {
        cells.resize(headers.len(), String::new());
        Self {
            headers,
            values: cells,
        }
    }

    /// Value of a column, or `None` when the header has no such column.
    ///
    /// Duplicate column names resolve to the last occurrence.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .rposition(|h| h == column)
            .map(|i| self.values[i].as_str())
    }

    /// Value of a column, empty when the column is absent.
    pub fn field(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Value of a column, or `fallback` when absent or empty.
    pub fn field_or<'a>(&'a self, column: &str, fallback: &'a str) -> &'a str {
        match self.get(column) {
            Some(v) if !v.is_empty() => v,
            _ => fallback,
        }
    }

    /// Parse a column as a number. Empty or unparseable cells yield `None`.
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Iterate `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.values.iter())
            .map(|(h, v)| (h.as_str(), v.as_str()))
    }
}
