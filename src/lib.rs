//! Civicboard: filterable, aggregated, chart-ready views over civic CSV datasets.
//!
//! The processing shape is the same for every dataset:
//! parse → normalize → filter → aggregate → draw.
//!
//! - [`data`] turns raw delimited text into header-keyed records.
//! - [`dataset`] is the contract a per-dataset normalizer implements.
//! - [`facet`] evaluates the current facet selections against typed rows.
//! - [`aggregate`] groups, averages, ranks and cross-tabulates filtered rows.
//! - [`chart`] maps aggregated series onto abstract draw commands.
//! - [`session`] owns the loaded rows and the filter state.

pub mod aggregate;
pub mod chart;
pub mod constants;
pub mod dashboard;
pub mod data;
pub mod dataset;
pub mod datasets;
pub mod facet;
pub mod format;
pub mod logging;
pub mod perf;
pub mod session;
pub mod settings;

pub use dashboard::{ChartFrame, Dashboard, Kpi, PassContext, PassOutput};
pub use data::{DataError, DataResult, RawRecord, parse_records};
pub use dataset::{Dataset, FacetDef};
pub use facet::{FilterState, SelectionMode, YearRange};
pub use session::Session;
pub use settings::Settings;
