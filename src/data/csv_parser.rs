//! Delimited text parsing
//!
//! Parses comma-separated text into header-keyed [`RawRecord`]s with a
//! single left-to-right scan. Quoted fields may contain the delimiter,
//! escaped quotes (`""`) and line breaks.
//!
//! ## Tolerance
//!
//! The parser never returns an error. Unbalanced quotes swallow the rest of
//! the document into the current field, and ragged rows are zipped against
//! the header by position. Rejecting rows is the normalizer's job.

use crate::data::record::RawRecord;
use std::sync::Arc;

/// Default field delimiter
pub const DEFAULT_DELIMITER: char = ',';

/// Byte-order mark that some exports put in front of the first header cell
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// A parsed document: its header row and the records zipped against it.
#[derive(Clone, Debug, Default)]
pub struct ParsedTable {
    pub headers: Arc<[String]>,
    pub records: Vec<RawRecord>,
}

impl ParsedTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    /// True when the document had no header row at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Parse comma-separated text into records keyed by the first line.
pub fn parse_records(text: &str) -> Vec<RawRecord> {
    parse_table_with(text, DEFAULT_DELIMITER).records
}

/// Parse delimited text into records keyed by the first line.
pub fn parse_records_with(text: &str, delimiter: char) -> Vec<RawRecord> {
    parse_table_with(text, delimiter).records
}

/// Parse delimited text, keeping the header row.
///
/// Rows whose cells are all empty are dropped. A document with only a
/// header row yields no records.
pub fn parse_table_with(text: &str, delimiter: char) -> ParsedTable {
    let mut rows = split_rows(text, delimiter).into_iter();

    let Some(mut header) = rows.next() else {
        return ParsedTable::default();
    };
    if let Some(first) = header.first_mut() {
        if first.starts_with(BYTE_ORDER_MARK) {
            first.remove(0);
        }
    }
    let headers: Arc<[String]> = header.into();

    let records = rows
        .filter(|row| !is_blank_row(row))
        .map(|row| RawRecord::zip(Arc::clone(&headers), row))
        .collect();
    ParsedTable { headers, records }
}

/// Split text into rows of cells, including the header row.
///
/// `\n`, `\r\n` and a lone `\r` each terminate a row outside quotes. A
/// trailing row without a line terminator is still emitted.
pub fn split_rows(text: &str, delimiter: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = !in_quotes;
                }
            }
            c if c == delimiter && !in_quotes => {
                row.push(std::mem::take(&mut current));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut current));
                rows.push(std::mem::take(&mut row));
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() || !row.is_empty() {
        row.push(current);
        rows.push(row);
    }

    rows
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.is_empty())
}

/// Serialize a header and rows back to delimited text.
///
/// Output parses back to the same records with [`parse_records_with`].
pub fn write_csv_content<S: AsRef<str>>(headers: &[S], rows: &[Vec<String>], delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut lines = Vec::with_capacity(rows.len() + 1);

    lines.push(
        headers
            .iter()
            .map(|h| escape_cell(h.as_ref(), delimiter))
            .collect::<Vec<_>>()
            .join(&sep),
    );

    for row in rows {
        lines.push(
            row.iter()
                .map(|cell| escape_cell(cell, delimiter))
                .collect::<Vec<_>>()
                .join(&sep),
        );
    }

    lines.join("\n")
}

/// Wrap `cell` in quotes when the scanner would otherwise split it.
fn escape_cell(cell: &str, delimiter: char) -> String {
    if cell.chars().any(|c| c == delimiter || matches!(c, '"' | '\n' | '\r')) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_owned()
    }
}
