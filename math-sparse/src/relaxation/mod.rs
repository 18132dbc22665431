//! Stationary relaxation methods for square sparse systems A x = b
//!
//! Each method performs exactly one in-place update of `x` and returns the
//! Euclidean norm of the residual observed during that step:
//! - [`CsrMatrix::jacobi_step`]: Jacobi, every row sees the previous iterate
//! - [`CsrMatrix::sor_step`]: SOR, rows see updates made earlier in the sweep
//! - [`CsrMatrix::ssor_step`]: symmetric SOR, a forward then a backward sweep
//!
//! Deciding when to stop iterating is left to the caller.

mod jacobi;
mod sor;
mod ssor;

use crate::error::Result;
use crate::sparse::CsrMatrix;
use crate::traits::Scalar;
use ndarray::Array1;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relaxation method applied by [`relax`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RelaxationMethod {
    /// Jacobi (the relaxation factor is ignored)
    Jacobi,
    /// Gauss-Seidel, i.e. SOR with ω = 1
    GaussSeidel,
    /// Successive over-relaxation
    #[default]
    Sor,
    /// Symmetric successive over-relaxation
    Ssor,
}

impl fmt::Display for RelaxationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RelaxationMethod::Jacobi => "Jacobi",
            RelaxationMethod::GaussSeidel => "Gauss-Seidel",
            RelaxationMethod::Sor => "SOR",
            RelaxationMethod::Ssor => "SSOR",
        };
        f.write_str(name)
    }
}

/// Relaxation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelaxationConfig<T> {
    /// Method used for each step
    pub method: RelaxationMethod,
    /// Relaxation factor ω for SOR and SSOR
    pub omega: T,
}

impl Default for RelaxationConfig<f64> {
    fn default() -> Self {
        Self {
            method: RelaxationMethod::Sor,
            omega: 1.0,
        }
    }
}

/// Perform one relaxation step on A x = rhs, updating `x` in place
///
/// Returns the residual norm reported by the selected method.
pub fn relax<T: Scalar>(
    matrix: &CsrMatrix<T>,
    x: &mut Array1<T>,
    rhs: &Array1<T>,
    config: &RelaxationConfig<T>,
) -> Result<T> {
    match config.method {
        RelaxationMethod::Jacobi => matrix.jacobi_step(x, rhs),
        RelaxationMethod::GaussSeidel => matrix.sor_step(x, rhs, T::one()),
        RelaxationMethod::Sor => matrix.sor_step(x, rhs, config.omega),
        RelaxationMethod::Ssor => matrix.ssor_step(x, rhs, config.omega),
    }
}
