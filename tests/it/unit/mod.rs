//! Unit tests for civicboard.

mod aggregate_tests;
mod csv_tests;
mod filter_tests;
mod format_tests;
mod perf_tests;
mod settings_tests;
