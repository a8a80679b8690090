//! Cross-tabulation into a dense count matrix.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// Rows × columns of numeric counts with their header labels.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Matrix {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    /// Row-major cells
    cells: Vec<f64>,
}

impl Matrix {
    pub fn zeros(row_labels: Vec<String>, col_labels: Vec<String>) -> Self {
        let cells = vec![0.0; row_labels.len() * col_labels.len()];
        Self {
            row_labels,
            col_labels,
            cells,
        }
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn cols(&self) -> usize {
        self.col_labels.len()
    }

    /// True when either dimension is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.cells[row * self.cols() + col]
    }

    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        let cols = self.cols();
        self.cells[row * cols + col] += value;
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let cols = self.cols();
        &self.cells[row * cols..(row + 1) * cols]
    }

    /// Largest cell value, or `None` for an empty matrix.
    pub fn max_value(&self) -> Option<f64> {
        self.cells.iter().copied().reduce(f64::max)
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }
}

/// Count rows per (row key, column key) pair over bounded key domains.
///
/// Rows whose keys fall outside the domains are not counted. Domains should
/// be restricted to what is visible before calling, to keep the matrix small.
pub fn cross_tabulate<'a, R, RK, CK, I, FR, FC>(
    rows: I,
    row_domain: &[RK],
    col_domain: &[CK],
    mut row_key: FR,
    mut col_key: FC,
) -> Matrix
where
    R: 'a,
    RK: Eq + Hash + Display,
    CK: Eq + Hash + Display,
    I: IntoIterator<Item = &'a R>,
    FR: FnMut(&'a R) -> RK,
    FC: FnMut(&'a R) -> CK,
{
    let row_index: HashMap<&RK, usize> = row_domain.iter().enumerate().map(|(i, k)| (k, i)).collect();
    let col_index: HashMap<&CK, usize> = col_domain.iter().enumerate().map(|(i, k)| (k, i)).collect();

    let mut matrix = Matrix::zeros(
        row_domain.iter().map(ToString::to_string).collect(),
        col_domain.iter().map(ToString::to_string).collect(),
    );

    for row in rows {
        let r = row_key(row);
        let c = col_key(row);
        if let (Some(&ri), Some(&ci)) = (row_index.get(&r), col_index.get(&c)) {
            matrix.add(ri, ci, 1.0);
        }
    }

    matrix
}
