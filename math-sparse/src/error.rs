//! Error types for sparse matrix construction and relaxation.
//!
//! Construction and kernel preconditions are reported as structured errors
//! rather than aborting, so embedding code can decide how to recover.

use thiserror::Error;

/// Broad classification of a [`SparseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: bad CSR arrays, out-of-range indices, wrong vector length.
    InvalidArgument,
    /// Operation not allowed in the current build state.
    InvalidState,
    /// Mutable access to an entry outside the fixed sparsity pattern.
    ElementNotFound,
}

/// Errors that can occur while building or using a CSR matrix.
#[derive(Debug, Error)]
pub enum SparseError {
    /// Row pointer array must describe at least one row.
    #[error("row pointer array has {len} elements (need at least 2)")]
    TooFewRowPointers {
        /// Length of the supplied row pointer array
        len: usize,
    },

    /// Raw construction requires at least one stored entry.
    #[error("column index array is empty")]
    EmptyColumnIndices,

    /// Column index and value arrays differ in length.
    #[error("length mismatch: {col_indices} column indices, {values} values")]
    LengthMismatch {
        /// Length of the column index array
        col_indices: usize,
        /// Length of the value array
        values: usize,
    },

    /// Last row pointer does not match the number of stored entries.
    #[error("row pointer end ({row_end}) does not match number of stored values ({nnz})")]
    RowPointerEndMismatch {
        /// Value of the last row pointer
        row_end: usize,
        /// Number of stored values
        nnz: usize,
    },

    /// Row pointers must start at zero and never decrease.
    #[error("row pointers are malformed at row {row}")]
    MalformedRowPointers {
        /// First row whose offset range is invalid
        row: usize,
    },

    /// A stored column index lies outside the matrix.
    #[error("column index {col} at position {position} is out of range for {size} columns")]
    ColumnOutOfRange {
        /// Position in the column index array
        position: usize,
        /// Offending column index
        col: usize,
        /// Matrix dimension
        size: usize,
    },

    /// Matrix dimension must be positive.
    #[error("matrix must have at least one row")]
    EmptyMatrix,

    /// Row or column index passed to an insertion is out of range.
    #[error("index ({row}, {col}) is out of range for a {size}x{size} matrix")]
    IndexOutOfRange {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Matrix dimension
        size: usize,
    },

    /// Dense input is not square.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Number of columns
        cols: usize,
    },

    /// A vector argument has the wrong length.
    #[error("vector `{name}` has length {actual}, expected {expected}")]
    DimensionMismatch {
        /// Name of the argument
        name: &'static str,
        /// Expected length (matrix dimension)
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Insertion attempted after the sparsity pattern was closed.
    #[error("sparsity pattern is closed; entries can no longer be inserted")]
    PatternClosed,

    /// Numerical operation attempted before the sparsity pattern was closed.
    #[error("sparsity pattern is still open; call close() first")]
    PatternOpen,

    /// Relaxation needs a nonzero diagonal in every row.
    #[error("diagonal entry of row {row} is zero or not stored")]
    ZeroDiagonal {
        /// Row lacking a usable diagonal
        row: usize,
    },

    /// Mutable access to an entry that is not part of the sparsity pattern.
    #[error("element ({row}, {col}) does not exist in the sparsity pattern")]
    ElementNotFound {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
    },
}

/// A specialized `Result` type for sparse matrix operations.
pub type Result<T> = std::result::Result<T, SparseError>;

impl SparseError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SparseError::PatternClosed | SparseError::PatternOpen => ErrorKind::InvalidState,
            SparseError::ElementNotFound { .. } => ErrorKind::ElementNotFound,
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Returns `true` if the raw CSR arrays or constructor arguments were rejected.
    pub fn is_construction_error(&self) -> bool {
        matches!(
            self,
            SparseError::TooFewRowPointers { .. }
                | SparseError::EmptyColumnIndices
                | SparseError::LengthMismatch { .. }
                | SparseError::RowPointerEndMismatch { .. }
                | SparseError::MalformedRowPointers { .. }
                | SparseError::ColumnOutOfRange { .. }
                | SparseError::EmptyMatrix
                | SparseError::NotSquare { .. }
        )
    }

    /// Returns `true` if the operation was called in the wrong build state.
    pub fn is_state_error(&self) -> bool {
        self.kind() == ErrorKind::InvalidState
    }

    /// Returns `true` if a vector argument had the wrong length.
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, SparseError::DimensionMismatch { .. })
    }
}
