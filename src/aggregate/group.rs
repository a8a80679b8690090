//! Grouped sums keyed in first-occurrence order.

use std::collections::HashMap;
use std::hash::Hash;

/// Mapping from key to total, in insertion order of each key's first
/// finite contribution.
///
/// Key order is not sorted. Callers rendering against a known label domain
/// must [`reindex`](GroupedSeries::reindex) first, otherwise missing keys
/// silently vanish instead of showing as zero.
///
/// Sums have no undefined state: a key with no finite contribution is
/// absent and reads as 0 after reindexing. Only averages report
/// [`Average::Undefined`](crate::aggregate::Average::Undefined).
#[derive(Clone, Debug)]
pub struct GroupedSeries<K> {
    entries: Vec<(K, f64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for GroupedSeries<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> GroupedSeries<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `value` to `key`'s total. Non-finite values are skipped.
    pub fn add(&mut self, key: K, value: f64) {
        if !value.is_finite() {
            return;
        }
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(K, f64)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(K, f64)> {
        self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Values over an explicit label domain; absent keys become 0, never
    /// an undefined marker.
    pub fn reindex(&self, domain: &[K]) -> Vec<f64> {
        domain.iter().map(|k| self.get(k).unwrap_or(0.0)).collect()
    }

    /// Entries for the domain labels that are present, in domain order.
    pub fn reindex_present(&self, domain: &[K]) -> Vec<(K, f64)> {
        domain
            .iter()
            .filter_map(|k| self.get(k).map(|v| (k.clone(), v)))
            .collect()
    }

    /// First entry with the strictly greatest value.
    pub fn max_entry(&self) -> Option<(&K, f64)> {
        let mut best: Option<(&K, f64)> = None;
        for (k, v) in &self.entries {
            if best.is_none_or(|(_, b)| *v > b) {
                best = Some((k, *v));
            }
        }
        best
    }
}

/// Group rows by `key` and sum `value` per group.
pub fn group_sum<'a, R, K, I, FK, FV>(rows: I, mut key: FK, mut value: FV) -> GroupedSeries<K>
where
    R: 'a,
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a R>,
    FK: FnMut(&'a R) -> K,
    FV: FnMut(&R) -> f64,
{
    let mut series = GroupedSeries::new();
    for row in rows {
        series.add(key(row), value(row));
    }
    series
}

/// Number of rows per key.
pub fn count_by<'a, R, K, I, FK>(rows: I, key: FK) -> GroupedSeries<K>
where
    R: 'a,
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = &'a R>,
    FK: FnMut(&'a R) -> K,
{
    group_sum(rows, key, |_| 1.0)
}

/// Sum of the finite values.
pub fn finite_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().filter(|v| v.is_finite()).sum()
}
