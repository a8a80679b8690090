//! Raw data handling
//!
//! Turns raw delimited text into an ordered sequence of header-keyed
//! records, and repairs the text artefacts found in the civic exports.
//!
//! ## Error Handling
//!
//! Parsing itself never fails: ragged rows and unbalanced quotes degrade to a
//! best-effort positional zip. Only loading (I/O, empty files, every record
//! rejected by the normalizer) returns a [`DataError`].

mod csv_parser;
mod error;
mod record;
pub mod text;

pub use csv_parser::*;
pub use error::*;
pub use record::*;
