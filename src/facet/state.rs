//! Filter state: the current facet selections supplied by the host.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Empty-selection semantics of a categorical facet.
///
/// Checkbox groups start fully checked, so unchecking everything means
/// "show nothing". Multi-selects start with nothing selected, so an empty
/// selection means "no restriction".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Empty selection rejects every row
    Required,
    /// Empty selection accepts every row
    Optional,
}

/// Inclusive year range. An inverted range matches nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Range widened to cover `other` as well.
    pub fn union(&self, other: &YearRange) -> YearRange {
        YearRange::new(self.min.min(other.min), self.max.max(other.max))
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::new(i32::MIN, i32::MAX)
    }
}

/// Selection of one categorical facet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSelection {
    pub mode: SelectionMode,
    pub selected: BTreeSet<String>,
}

impl FacetSelection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    pub fn with_values<I, S>(mode: SelectionMode, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mode,
            selected: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a row with this field value passes the facet.
    #[inline]
    pub fn admits(&self, value: &str) -> bool {
        if self.selected.is_empty() {
            return self.mode == SelectionMode::Optional;
        }
        self.selected.contains(value)
    }

    /// Whether this selection restricts anything at all.
    pub fn is_restrictive(&self) -> bool {
        !(self.mode == SelectionMode::Optional && self.selected.is_empty())
    }
}

/// Current facet selections: a year range plus named categorical selections.
///
/// A facet with no entry here is absent and applies no predicate.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub years: YearRange,
    facets: BTreeMap<String, FacetSelection>,
}

impl FilterState {
    pub fn new(years: YearRange) -> Self {
        Self {
            years,
            facets: BTreeMap::new(),
        }
    }

    pub fn with_facet(mut self, key: impl Into<String>, selection: FacetSelection) -> Self {
        self.facets.insert(key.into(), selection);
        self
    }

    pub fn set_years(&mut self, min: i32, max: i32) {
        self.years = YearRange::new(min, max);
    }

    pub fn set_facet(&mut self, key: impl Into<String>, selection: FacetSelection) {
        self.facets.insert(key.into(), selection);
    }

    /// Replace the selected values of an existing facet, keeping its mode.
    /// Returns `false` when the facet is unknown.
    pub fn select<I, S>(&mut self, key: &str, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.facets.get_mut(key) {
            Some(sel) => {
                sel.selected = values.into_iter().map(Into::into).collect();
                true
            }
            None => false,
        }
    }

    /// Toggle one value of an existing facet (checkbox click).
    pub fn toggle(&mut self, key: &str, value: &str) -> bool {
        match self.facets.get_mut(key) {
            Some(sel) => {
                if !sel.selected.remove(value) {
                    sel.selected.insert(value.to_string());
                }
                true
            }
            None => false,
        }
    }

    pub fn remove_facet(&mut self, key: &str) -> Option<FacetSelection> {
        self.facets.remove(key)
    }

    pub fn selection(&self, key: &str) -> Option<&FacetSelection> {
        self.facets.get(key)
    }

    pub fn facets(&self) -> impl Iterator<Item = (&str, &FacetSelection)> {
        self.facets.iter().map(|(k, v)| (k.as_str(), v))
    }
}
