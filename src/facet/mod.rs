//! Facets: category sets, filter state and the filter engine.
//!
//! A facet is one filterable dimension. The year range is always present;
//! categorical facets come from the dataset's [`FacetDef`](crate::FacetDef)s.

mod category;
mod engine;
mod state;

pub use category::*;
pub use engine::*;
pub use state::*;
