//! Collapsing per-actor rows to one row per logical event.

use std::collections::HashSet;
use std::hash::Hash;

/// Keep the first-seen row for each key, in input order.
pub fn dedupe_by_key<'a, R, K, I, F>(rows: I, mut key: F) -> Vec<&'a R>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Eq + Hash,
    F: FnMut(&'a R) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(key(*row))).collect()
}

/// Number of distinct keys.
pub fn unique_count<'a, R, K, I, F>(rows: I, mut key: F) -> usize
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Eq + Hash,
    F: FnMut(&'a R) -> K,
{
    rows.into_iter().map(|row| key(row)).collect::<HashSet<K>>().len()
}
