//! Single test binary entry point.
//!
//! All integration tests compile into one binary to keep link time down.
//!
//! Structure:
//! - unit: Single-component tests (parser, facets, aggregation, charts)
//! - integration: Load → filter → pass workflows per dataset

mod unit;
