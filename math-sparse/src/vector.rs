//! Dense vector helpers
//!
//! Dense vectors are plain [`ndarray::Array1`]; this module supplies the
//! reductions the relaxation kernels need on top of them.

use crate::error::{Result, SparseError};
use crate::traits::Scalar;
use ndarray::Array1;
use num_traits::Zero;

/// Compute the dot product (x, y) = Σ x_i * y_i
///
/// Both vectors must have the same length.
#[inline]
pub fn dot<T: Scalar>(x: &Array1<T>, y: &Array1<T>) -> Result<T> {
    if x.len() != y.len() {
        return Err(SparseError::DimensionMismatch {
            name: "y",
            expected: x.len(),
            actual: y.len(),
        });
    }
    let mut sum = T::zero();
    for (xi, yi) in x.iter().zip(y.iter()) {
        sum += *xi * *yi;
    }
    Ok(sum)
}

/// Compute vector norm squared: ||x||_2^2 = Σ x_i^2
///
/// The sum is formed in `T`; integer vectors with large entries overflow here,
/// while [`vector_norm`] does not.
#[inline]
pub fn norm_sqr<T: Scalar>(x: &Array1<T>) -> T {
    let mut sum = T::zero();
    for xi in x.iter() {
        sum += *xi * *xi;
    }
    sum
}

/// Compute vector 2-norm: ||x||_2 = sqrt(Σ x_i^2)
#[inline]
pub fn vector_norm<T: Scalar>(x: &Array1<T>) -> T {
    let acc = x.iter().fold(<T::SumSq as Zero>::zero(), |acc, xi| xi.add_square(acc));
    T::sqrt_sum_sq(acc)
}
