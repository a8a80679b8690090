//! Category sets and their canonical display order.

use crate::constants::{MAX_YEAR, MIN_YEAR};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// How a facet's distinct values are ordered for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryOrder {
    /// Order of first occurrence in the loaded rows
    FirstSeen,
    /// Case-insensitive lexical order
    Lexical,
    /// Numeric value; unparseable labels last
    Numeric,
    /// First integer inside the label (age bands such as "20-29");
    /// labels without a number last
    LeadingNumber,
    /// A fixed domain list, always fully present; unknown values follow in
    /// first-seen order
    Fixed(&'static [&'static str]),
}

impl CategoryOrder {
    /// Arrange distinct first-seen values into canonical order.
    ///
    /// Sorting is stable, so ties keep first-seen order.
    pub fn arrange(&self, mut values: Vec<String>) -> Vec<String> {
        match self {
            CategoryOrder::FirstSeen => values,
            CategoryOrder::Lexical => {
                values.sort_by_cached_key(|v| v.to_lowercase());
                values
            }
            CategoryOrder::Numeric => {
                values.sort_by(|a, b| {
                    let a = a.trim().parse::<f64>().ok().filter(|v| v.is_finite());
                    let b = b.trim().parse::<f64>().ok().filter(|v| v.is_finite());
                    match (a, b) {
                        (Some(a), Some(b)) => a.total_cmp(&b),
                        (Some(_), None) => std::cmp::Ordering::Less,
                        (None, Some(_)) => std::cmp::Ordering::Greater,
                        (None, None) => std::cmp::Ordering::Equal,
                    }
                });
                values
            }
            CategoryOrder::LeadingNumber => {
                values.sort_by_key(|v| leading_number(v).unwrap_or(u64::MAX));
                values
            }
            CategoryOrder::Fixed(domain) => {
                let known: HashSet<&str> = domain.iter().copied().collect();
                let mut out: Vec<String> = domain.iter().map(|s| s.to_string()).collect();
                out.extend(values.into_iter().filter(|v| !known.contains(v.as_str())));
                out
            }
        }
    }
}

/// First run of digits in a label, e.g. `"20- bis 29-Jährige"` → 20.
pub fn leading_number(label: &str) -> Option<u64> {
    FIRST_NUMBER
        .find(label)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Distinct non-empty values in first-seen order.
pub fn distinct_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for v in values {
        if !v.is_empty() && seen.insert(v) {
            out.push(v.to_string());
        }
    }
    out
}

/// Sorted distinct years.
pub fn year_domain<I>(years: I) -> Vec<i32>
where
    I: IntoIterator<Item = i32>,
{
    let mut out: Vec<i32> = years.into_iter().collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Whether `year` lies in the accepted year domain.
#[inline]
pub fn plausible_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

/// Every year from `min` to `max` inclusive; empty when inverted.
///
/// Bounds are clamped to the accepted year domain, so the result never holds
/// more than `MAX_YEAR - MIN_YEAR + 1` entries.
pub fn contiguous_years(min: i32, max: i32) -> Vec<i32> {
    (min.max(MIN_YEAR)..=max.min(MAX_YEAR)).collect()
}

/// Category sets of every facet, keyed by facet key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    sets: BTreeMap<&'static str, Vec<String>>,
}

impl CategoryIndex {
    pub fn insert(&mut self, key: &'static str, values: Vec<String>) {
        self.sets.insert(key, values);
    }

    /// Categories of a facet in canonical order; empty for unknown keys.
    pub fn get(&self, key: &str) -> &[String] {
        self.sets.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sets.keys().copied()
    }
}
