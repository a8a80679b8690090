//! Filter engine.
//!
//! A pure function of (rows, filter state). Every predicate is evaluated for
//! every row in a single pass; there is no index and no memo, the filtered
//! set is recomputed in full on every selection change.

use crate::dataset::FacetDef;
use crate::facet::state::FilterState;

/// Whether one row passes the year range and every present facet.
#[inline]
pub fn row_passes<R>(
    row: &R,
    year: i32,
    facets: &[FacetDef<R>],
    state: &FilterState,
) -> bool {
    if !state.years.contains(year) {
        return false;
    }
    facets.iter().all(|facet| match state.selection(facet.key) {
        Some(sel) => sel.admits((facet.value)(row)),
        None => true,
    })
}

/// Rows passing all active predicates, in input order.
pub fn filter_rows<'a, R, T>(
    rows: &'a [R],
    temporal: T,
    facets: &[FacetDef<R>],
    state: &FilterState,
) -> Vec<&'a R>
where
    T: Fn(&R) -> i32,
{
    crate::profile_scope!("filter_rows");
    rows.iter()
        .filter(|row| row_passes(*row, temporal(*row), facets, state))
        .collect()
}
