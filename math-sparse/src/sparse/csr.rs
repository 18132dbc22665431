//! Compressed Sparse Row (CSR) matrix format
//!
//! CSR format stores:
//! - `values`: Non-zero entries grouped by row
//! - `col_indices`: Column index for each value
//! - `row_ptrs`: Index into values/col_indices where each row starts
//!
//! A matrix is either built from raw arrays (closed immediately) or created
//! empty with [`CsrMatrix::new`], filled with [`CsrMatrix::set`] and frozen
//! with [`CsrMatrix::close`]. Once closed, only values may change.

use crate::error::{Result, SparseError};
use crate::traits::Scalar;
use ndarray::{Array1, Array2};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Build lifecycle of a [`CsrMatrix`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BuildState {
    /// Entries may be inserted with `set`
    Open,
    /// Sparsity pattern is frozen
    Closed,
}

/// Square Compressed Sparse Row (CSR) matrix
///
/// Memory-efficient storage with O(nnz) space complexity.
/// Matrix-vector products and relaxation sweeps are O(nnz).
///
/// Entries inside a row keep their insertion order; no column sorting is
/// assumed. The diagonal of each row is located once when the pattern is
/// closed, so it may be stored at any position within its row.
#[derive(Debug, Clone)]
pub struct CsrMatrix<T: Scalar> {
    /// Number of rows (and columns)
    num_rows: usize,
    /// Row pointers: row_ptrs[i] is the start index in values/col_indices for row i
    /// row_ptrs[num_rows] = nnz (total number of non-zeros)
    row_ptrs: Vec<usize>,
    /// Column indices for each value
    col_indices: Vec<usize>,
    /// Non-zero values grouped by row
    values: Vec<T>,
    /// Position of the stored diagonal entry of each row
    diag_offsets: Vec<Option<usize>>,
    /// Entries inserted with `set`, folded into the CSR arrays by `close`
    pending: Vec<(usize, usize, T)>,
    state: BuildState,
}

impl<T: Scalar> CsrMatrix<T> {
    /// Create an empty, open matrix with `num_rows` rows and columns
    pub fn new(num_rows: usize) -> Result<Self> {
        Self::with_capacity(num_rows, 0)
    }

    /// Create an open matrix with room for `nnz_estimate` insertions
    pub fn with_capacity(num_rows: usize, nnz_estimate: usize) -> Result<Self> {
        if num_rows == 0 {
            return Err(SparseError::EmptyMatrix);
        }

        Ok(Self {
            num_rows,
            row_ptrs: vec![0; num_rows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
            diag_offsets: vec![None; num_rows],
            pending: Vec::with_capacity(nnz_estimate),
            state: BuildState::Open,
        })
    }

    /// Create a closed CSR matrix from raw components
    ///
    /// The dimension is `row_ptrs.len() - 1`. The arrays are rejected if:
    /// - `row_ptrs` has fewer than 2 elements
    /// - `col_indices` is empty
    /// - `col_indices` and `values` differ in length
    /// - the last row pointer differs from `values.len()`
    /// - row pointers do not start at zero or decrease
    /// - any column index is out of range
    pub fn from_raw_parts(
        row_ptrs: Vec<usize>,
        col_indices: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        if row_ptrs.len() < 2 {
            return Err(SparseError::TooFewRowPointers {
                len: row_ptrs.len(),
            });
        }
        if col_indices.is_empty() {
            return Err(SparseError::EmptyColumnIndices);
        }
        if col_indices.len() != values.len() {
            return Err(SparseError::LengthMismatch {
                col_indices: col_indices.len(),
                values: values.len(),
            });
        }

        let num_rows = row_ptrs.len() - 1;
        if row_ptrs[num_rows] != values.len() {
            return Err(SparseError::RowPointerEndMismatch {
                row_end: row_ptrs[num_rows],
                nnz: values.len(),
            });
        }
        if row_ptrs[0] != 0 {
            return Err(SparseError::MalformedRowPointers { row: 0 });
        }
        if let Some(row) = row_ptrs.windows(2).position(|w| w[0] > w[1]) {
            return Err(SparseError::MalformedRowPointers { row });
        }
        if let Some((position, &col)) = col_indices
            .iter()
            .enumerate()
            .find(|&(_, &col)| col >= num_rows)
        {
            return Err(SparseError::ColumnOutOfRange {
                position,
                col,
                size: num_rows,
            });
        }

        let diag_offsets = diagonal_offsets(&row_ptrs, &col_indices);

        Ok(Self {
            num_rows,
            row_ptrs,
            col_indices,
            values,
            diag_offsets,
            pending: Vec::new(),
            state: BuildState::Closed,
        })
    }

    /// Create a closed CSR matrix from (row, col, value) triplets
    ///
    /// Triplets may come in any order. Duplicate entries are summed.
    pub fn from_triplets<I>(num_rows: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let mut matrix = Self::new(num_rows)?;
        for (row, col, value) in triplets {
            matrix.set(row, col, value)?;
        }
        matrix.close();
        Ok(matrix)
    }

    /// Create a closed CSR matrix from a square dense matrix
    ///
    /// Stores every nonzero entry; the diagonal is placed first in each row.
    pub fn from_dense(dense: &Array2<T>) -> Result<Self> {
        let (rows, cols) = dense.dim();
        if rows != cols {
            return Err(SparseError::NotSquare { rows, cols });
        }

        let mut matrix = Self::new(rows)?;
        for i in 0..rows {
            let diag = dense[[i, i]];
            if diag != T::zero() {
                matrix.set(i, i, diag)?;
            }
            for j in (0..cols).filter(|&j| j != i) {
                let val = dense[[i, j]];
                if val != T::zero() {
                    matrix.set(i, j, val)?;
                }
            }
        }
        matrix.close();
        Ok(matrix)
    }

    /// Create a closed identity matrix
    pub fn identity(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SparseError::EmptyMatrix);
        }

        Ok(Self {
            num_rows: n,
            row_ptrs: (0..=n).collect(),
            col_indices: (0..n).collect(),
            values: vec![T::one(); n],
            diag_offsets: (0..n).map(Some).collect(),
            pending: Vec::new(),
            state: BuildState::Closed,
        })
    }

    /// Insert `value` at `(row, col)` into an open matrix
    ///
    /// Calls may arrive in any row order; offsets are computed by
    /// [`close`](Self::close). Inserting the same position twice sums the values.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if self.state == BuildState::Closed {
            return Err(SparseError::PatternClosed);
        }
        if row >= self.num_rows || col >= self.num_rows {
            return Err(SparseError::IndexOutOfRange {
                row,
                col,
                size: self.num_rows,
            });
        }

        log::trace!("set ({}, {}) = {:?}", row, col, value);
        self.pending.push((row, col, value));
        Ok(())
    }

    /// Freeze the sparsity pattern
    ///
    /// Folds all inserted entries into the CSR arrays. Rows that received no
    /// entries are kept with an empty range and reported with a warning.
    /// Closing an already closed matrix does nothing.
    pub fn close(&mut self) {
        if self.state == BuildState::Closed {
            return;
        }

        let mut triplets = std::mem::take(&mut self.pending);
        // Stable sort keeps insertion order within each row
        triplets.sort_by_key(|&(row, _, _)| row);

        let mut row_ptrs: Vec<usize> = Vec::with_capacity(self.num_rows + 1);
        let mut col_indices: Vec<usize> = Vec::with_capacity(triplets.len());
        let mut values: Vec<T> = Vec::with_capacity(triplets.len());
        row_ptrs.push(0);

        for (row, col, value) in triplets {
            while row_ptrs.len() <= row {
                row_ptrs.push(values.len());
            }

            let row_start = row_ptrs[row];
            match col_indices[row_start..].iter().position(|&c| c == col) {
                Some(offset) => values[row_start + offset] += value,
                None => {
                    col_indices.push(col);
                    values.push(value);
                }
            }
        }
        while row_ptrs.len() <= self.num_rows {
            row_ptrs.push(values.len());
        }

        for row in 0..self.num_rows {
            if row_ptrs[row] == row_ptrs[row + 1] {
                log::warn!("row {} is empty", row);
            }
        }

        self.diag_offsets = diagonal_offsets(&row_ptrs, &col_indices);
        self.row_ptrs = row_ptrs;
        self.col_indices = col_indices;
        self.values = values;
        self.state = BuildState::Closed;

        log::debug!(
            "closed {}x{} sparsity pattern with {} non-zeros",
            self.num_rows,
            self.num_rows,
            self.nnz()
        );
    }

    /// Current build state
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Whether the sparsity pattern is frozen
    pub fn is_closed(&self) -> bool {
        self.state == BuildState::Closed
    }

    /// Number of rows
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns (always equal to the number of rows)
    pub fn num_cols(&self) -> usize {
        self.num_rows
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Sparsity ratio (fraction of stored entries)
    ///
    /// `num_rows` is never zero, so the ratio is always defined.
    pub fn sparsity(&self) -> f64 {
        let n = self.num_rows as f64;
        self.nnz() as f64 / (n * n)
    }

    /// Row pointer array (`num_rows + 1` offsets)
    pub fn row_ptrs(&self) -> &[usize] {
        &self.row_ptrs
    }

    /// Column index of each stored entry
    pub fn col_indices(&self) -> &[usize] {
        &self.col_indices
    }

    /// Stored values
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Stored values, mutable; the sparsity pattern itself cannot change
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Get the range of indices in values/col_indices for a given row
    ///
    /// # Panics
    ///
    /// Panics if `row >= num_rows`.
    pub fn row_range(&self, row: usize) -> Range<usize> {
        self.row_ptrs[row]..self.row_ptrs[row + 1]
    }

    /// Get the (col, value) pairs for a row
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let range = self.row_range(row);
        self.col_indices[range.clone()]
            .iter()
            .copied()
            .zip(self.values[range].iter().copied())
    }

    fn position(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.num_rows {
            return None;
        }
        self.row_range(row).find(|&idx| self.col_indices[idx] == col)
    }

    /// Get element at (row, col), returns 0 if not stored
    ///
    /// Out-of-range indices and an open matrix also yield 0.
    pub fn at(&self, row: usize, col: usize) -> T {
        self.position(row, col).map_or_else(T::zero, |idx| self.values[idx])
    }

    /// Get a mutable reference to the stored element at (row, col)
    ///
    /// Fails with [`SparseError::ElementNotFound`] if the position is not part
    /// of the sparsity pattern.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        self.ensure_closed()?;
        match self.position(row, col) {
            Some(idx) => Ok(&mut self.values[idx]),
            None => {
                log::debug!("element ({}, {}) does not exist", row, col);
                Err(SparseError::ElementNotFound { row, col })
            }
        }
    }

    /// Diagonal element of `row`, or 0 if none is stored
    pub fn diag(&self, row: usize) -> T {
        self.diag_offsets
            .get(row)
            .copied()
            .flatten()
            .map_or_else(T::zero, |idx| self.values[idx])
    }

    /// Extract diagonal elements
    pub fn diagonal(&self) -> Array1<T> {
        Array1::from_iter((0..self.num_rows).map(|i| self.diag(i)))
    }

    /// Matrix-vector product: y = scalar * A * x
    ///
    /// `y` is overwritten; its previous contents are ignored.
    pub fn multiply(&self, x: &Array1<T>, y: &mut Array1<T>, scalar: T) -> Result<()> {
        self.ensure_closed()?;
        self.check_vector("x", x)?;
        self.check_vector("y", y)?;

        for i in 0..self.num_rows {
            let mut sum = T::zero();
            for idx in self.row_range(i) {
                sum += self.values[idx] * x[self.col_indices[idx]];
            }
            y[i] = sum * scalar;
        }

        Ok(())
    }

    /// Matrix-vector product: A * x
    pub fn matvec(&self, x: &Array1<T>) -> Result<Array1<T>> {
        let mut y = Array1::from_elem(self.num_rows, T::zero());
        self.multiply(x, &mut y, T::one())?;
        Ok(y)
    }

    /// Convert to dense matrix (for debugging/small matrices)
    pub fn to_dense(&self) -> Array2<T> {
        let mut dense = Array2::from_elem((self.num_rows, self.num_rows), T::zero());

        for i in 0..self.num_rows {
            for (j, val) in self.row_entries(i) {
                dense[[i, j]] = val;
            }
        }

        dense
    }

    pub(crate) fn ensure_closed(&self) -> Result<()> {
        match self.state {
            BuildState::Closed => Ok(()),
            BuildState::Open => Err(SparseError::PatternOpen),
        }
    }

    pub(crate) fn check_vector(&self, name: &'static str, v: &Array1<T>) -> Result<()> {
        if v.len() != self.num_rows {
            return Err(SparseError::DimensionMismatch {
                name,
                expected: self.num_rows,
                actual: v.len(),
            });
        }
        Ok(())
    }

    /// Diagonal of every row, failing on the first zero or missing entry
    pub(crate) fn nonzero_diagonal(&self) -> Result<Vec<T>> {
        (0..self.num_rows)
            .map(|row| {
                let d = self.diag(row);
                if d == T::zero() {
                    Err(SparseError::ZeroDiagonal { row })
                } else {
                    Ok(d)
                }
            })
            .collect()
    }

    /// Row residual rhs_i - Σ_j a_ij x_j using the current contents of `x`
    #[inline]
    pub(crate) fn row_residual(&self, row: usize, rhs_i: T, x: &Array1<T>) -> T {
        let mut r = rhs_i;
        for idx in self.row_range(row) {
            r -= self.values[idx] * x[self.col_indices[idx]];
        }
        r
    }
}

fn diagonal_offsets(row_ptrs: &[usize], col_indices: &[usize]) -> Vec<Option<usize>> {
    (0..row_ptrs.len() - 1)
        .map(|row| (row_ptrs[row]..row_ptrs[row + 1]).find(|&idx| col_indices[idx] == row))
        .collect()
}
