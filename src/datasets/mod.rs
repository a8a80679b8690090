//! Reference datasets from the Zurich open-data catalogue.
//!
//! Each module maps one CSV export to a typed row, declares its facets and
//! implements [`Dashboard`](crate::Dashboard) for its KPIs and charts.

pub mod dogs;
pub mod migration;
pub mod pedestrians;
pub mod slogans;
pub mod voting;

pub use dogs::Dogs;
pub use migration::Migration;
pub use pedestrians::Pedestrians;
pub use slogans::Slogans;
pub use voting::Voting;

use crate::chart::Rgba;
use crate::constants::{MAX_YEAR, MIN_YEAR};
use crate::facet::plausible_year;
use chrono::{Datelike, NaiveDate};
use crate::data::RawRecord;
use crate::data::text::repair_mojibake;

/// Integral year from a numeric column; `None` for empty, fractional or
/// unparseable cells and for years outside the accepted domain.
pub(crate) fn year_of(record: &RawRecord, column: &str) -> Option<i32> {
    let value = record.number(column)?;
    if value.fract() != 0.0 || value < MIN_YEAR as f64 || value > MAX_YEAR as f64 {
        return None;
    }
    Some(value as i32)
}

/// ISO `YYYY-MM-DD` date of a column; `None` when unparseable or outside
/// the accepted year domain.
pub(crate) fn date_of(record: &RawRecord, column: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(record.field(column).trim(), "%Y-%m-%d").ok()?;
    plausible_year(date.year()).then_some(date)
}

/// Trimmed, repaired text of a column.
pub(crate) fn text(record: &RawRecord, column: &str) -> String {
    repair_mojibake(record.field(column))
}

/// Numeric count column; empty or unparseable cells count as 0.
pub(crate) fn count(record: &RawRecord, column: &str) -> f64 {
    record.number(column).unwrap_or(0.0)
}

/// Parse a `#rrggbb` constant; falls back to black for malformed input.
pub(crate) fn hex(value: &str) -> Rgba {
    Rgba::from_hex(value).unwrap_or(Rgba::rgb(0, 0, 0))
}
