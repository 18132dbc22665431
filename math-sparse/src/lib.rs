//! Sparse CSR matrices with stationary relaxation methods
//!
//! This crate provides a square Compressed Sparse Row matrix with a two-phase
//! build protocol, together with single-step Jacobi, SOR and SSOR relaxation
//! for linear systems A x = b.
//!
//! # Features
//!
//! - **Construction**: from raw CSR arrays, or incrementally with `set`/`close`
//! - **Access**: element lookup, fallible mutable access, diagonal extraction
//! - **Kernels**: y = s·A·x, Jacobi step, SOR sweep, SSOR sweep
//! - **Generic Scalar Types**: Works with f64, f32, i64, i32
//!
//! # Example
//!
//! ```
//! use math_audio_sparse::CsrMatrix;
//! use ndarray::{Array1, array};
//!
//! let mut a = CsrMatrix::new(3)?;
//! for (i, j, v) in [(0, 0, 4.0), (0, 1, -1.0), (1, 1, 4.0), (1, 0, -1.0),
//!                   (1, 2, -1.0), (2, 2, 4.0), (2, 1, -1.0)] {
//!     a.set(i, j, v)?;
//! }
//! a.close();
//!
//! let b = array![3.0, 2.0, 3.0];
//! let mut x = Array1::zeros(3);
//! while a.sor_step(&mut x, &b, 1.0)? > 1e-10 {}
//! assert!((x[1] - 1.0_f64).abs() < 1e-9);
//! # Ok::<(), math_audio_sparse::SparseError>(())
//! ```

pub mod error;
pub mod relaxation;
pub mod sparse;
pub mod traits;
pub mod vector;

// Re-export main types
pub use error::{ErrorKind, Result, SparseError};
pub use sparse::{BuildState, CsrMatrix};
pub use traits::Scalar;

// Re-export relaxation entry points
pub use relaxation::{RelaxationConfig, RelaxationMethod, relax};

// Re-export vector helpers
pub use vector::{dot, vector_norm};
