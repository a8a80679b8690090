//! Top-N ranking with stable tie-breaking.

use crate::aggregate::group::GroupedSeries;
use std::cmp::Ordering;
use std::hash::Hash;

/// Sort entries descending by value and keep the first `n`, skipping any
/// entry for which `exclude` holds.
///
/// The sort is stable: equal values keep their original order.
pub fn rank_top_n<K, I, P>(entries: I, n: usize, exclude: P) -> Vec<(K, f64)>
where
    I: IntoIterator<Item = (K, f64)>,
    P: Fn(&K, f64) -> bool,
{
    let mut ranked: Vec<(K, f64)> = entries.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked
        .into_iter()
        .filter(|(k, v)| !exclude(k, *v))
        .take(n)
        .collect()
}

impl<K: Eq + Hash + Clone> GroupedSeries<K> {
    /// The `n` largest groups, ties in insertion order.
    pub fn top_n(&self, n: usize) -> Vec<(K, f64)> {
        rank_top_n(self.entries().iter().cloned(), n, |_, _| false)
    }

    /// The `n` largest groups whose key does not match `exclude`.
    pub fn top_n_excluding<P>(&self, n: usize, exclude: P) -> Vec<(K, f64)>
    where
        P: Fn(&K) -> bool,
    {
        rank_top_n(self.entries().iter().cloned(), n, |k, _| exclude(k))
    }
}

/// Whether a category label is empty and should stay out of rankings.
pub fn is_blank_label<S: AsRef<str>>(label: &S) -> bool {
    label.as_ref().trim().is_empty()
}
