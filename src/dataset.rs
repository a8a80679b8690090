//! The per-dataset normalizer contract.
//!
//! A dataset maps raw records to its own typed row and describes its facets
//! as data. The parser, filter engine, aggregation and chart layers stay
//! generic over that row type.

use crate::data::RawRecord;
use crate::facet::{CategoryOrder, SelectionMode};

/// Accessor returning one categorical field of a row.
pub type FieldFn<R> = fn(&R) -> &str;

/// One filterable categorical dimension of a dataset.
pub struct FacetDef<R> {
    /// Stable key used in [`FilterState`](crate::facet::FilterState)
    pub key: &'static str,
    /// Display label for the host's control
    pub label: &'static str,
    /// Empty-selection semantics of the control
    pub mode: SelectionMode,
    /// Canonical display order of the facet's categories
    pub order: CategoryOrder,
    /// Field accessor
    pub value: FieldFn<R>,
}

impl<R> FacetDef<R> {
    pub fn required(key: &'static str, label: &'static str, value: FieldFn<R>) -> Self {
        Self {
            key,
            label,
            mode: SelectionMode::Required,
            order: CategoryOrder::FirstSeen,
            value,
        }
    }

    pub fn optional(key: &'static str, label: &'static str, value: FieldFn<R>) -> Self {
        Self {
            key,
            label,
            mode: SelectionMode::Optional,
            order: CategoryOrder::FirstSeen,
            value,
        }
    }

    pub fn ordered(mut self, order: CategoryOrder) -> Self {
        self.order = order;
        self
    }
}

impl<R> Clone for FacetDef<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            mode: self.mode,
            order: self.order,
            value: self.value,
        }
    }
}

impl<R> std::fmt::Debug for FacetDef<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacetDef")
            .field("key", &self.key)
            .field("mode", &self.mode)
            .field("order", &self.order)
            .finish()
    }
}

/// Normalizer and facet configuration for one civic dataset.
pub trait Dataset {
    /// Typed row reconstructed from one raw record
    type Row: Clone + std::fmt::Debug;

    /// Short dataset name used in logs and status messages
    fn name(&self) -> &str;

    /// Columns that must be present in the header for a load to succeed.
    fn required_columns(&self) -> &'static [&'static str] {
        &[]
    }

    /// Map a raw record to a typed row.
    ///
    /// Returning `None` drops the record from the working set. A row must
    /// only be produced when its temporal field is a finite, parseable year.
    fn normalize(&self, record: &RawRecord) -> Option<Self::Row>;

    /// Fill fields that depend on other rows, once per load.
    ///
    /// Runs after every record was normalized and must return the same rows
    /// in the same order.
    fn finish_rows(&self, rows: Vec<Self::Row>) -> Vec<Self::Row> {
        rows
    }

    /// Primary temporal field (year) filtered by the year range.
    fn temporal(&self, row: &Self::Row) -> i32;

    /// Categorical facets, in control order.
    fn facets(&self) -> &[FacetDef<Self::Row>];
}
