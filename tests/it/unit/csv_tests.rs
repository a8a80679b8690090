//! Unit tests for the delimited text parser.

use civicboard::data::{parse_records, parse_records_with, parse_table_with, write_csv_content};

#[test]
fn test_quoted_fields_keep_delimiters_and_newlines() {
    let records = parse_records("name,note\n\"Meier, Hans\",\"line one\nline two\"\n");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field("name"), "Meier, Hans");
    assert_eq!(records[0].field("note"), "line one\nline two");
}

#[test]
fn test_escaped_quotes() {
    let records = parse_records("a\n\"say \"\"hi\"\"\"\n");
    assert_eq!(records[0].field("a"), "say \"hi\"");
}

#[test]
fn test_mixed_line_endings() {
    let records = parse_records("a,b\r\n1,2\r3,4\n5,6");
    let values: Vec<&str> = records.iter().map(|r| r.field("b")).collect();
    assert_eq!(values, ["2", "4", "6"]);
}

#[test]
fn test_byte_order_mark_is_stripped() {
    let records = parse_records("\u{feff}year,count\n2020,3\n");
    assert_eq!(records[0].get("year"), Some("2020"));
}

#[test]
fn test_ragged_rows_zip_by_position() {
    let records = parse_records("a,b,c\n1\n1,2,3,4\n");
    assert_eq!(records[0].values(), ["1", "", ""]);
    assert_eq!(records[1].values(), ["1", "2", "3"]);
}

#[test]
fn test_blank_rows_are_dropped() {
    let records = parse_records("a,b\n\n,\n1,2\n\n");
    assert_eq!(records.len(), 1);
}

#[test]
fn test_unbalanced_quote_swallows_rest() {
    let records = parse_records("a,b\n\"open,1\n2,3\n");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field("a"), "open,1\n2,3\n");
    assert_eq!(records[0].field("b"), "");
}

#[test]
fn test_duplicate_headers_resolve_to_last() {
    let records = parse_records("x,x\nfirst,second\n");
    assert_eq!(records[0].get("x"), Some("second"));
}

#[test]
fn test_header_only_document() {
    let table = parse_table_with("a;b\n", ';');
    assert!(!table.is_empty());
    assert!(table.has_column("b"));
    assert!(table.records.is_empty());
}

#[test]
fn test_empty_document() {
    assert!(parse_table_with("", ',').is_empty());
    assert!(parse_records("").is_empty());
}

#[test]
fn test_written_content_parses_back() {
    let headers = ["titel", "partei"];
    let rows = vec![vec!["Kredit; \"Neubau\"".to_string(), "SP".to_string()]];
    let text = write_csv_content(&headers, &rows, ';');
    let records = parse_records_with(&text, ';');
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].field("titel"), "Kredit; \"Neubau\"");
    assert_eq!(records[0].field("partei"), "SP");
}

#[test]
fn test_number_parsing() {
    let records = parse_records("n\n 42 \n\nabc\nNaN\n1e3\n");
    let numbers: Vec<Option<f64>> = records.iter().map(|r| r.number("n")).collect();
    assert_eq!(numbers, [Some(42.0), None, None, Some(1000.0)]);
}
