//! Core traits for sparse linear algebra
//!
//! [`Scalar`] abstracts over the element types a [`CsrMatrix`](crate::CsrMatrix)
//! can hold: signed integers and floating-point numbers.

use num_traits::{NumAssign, One, ToPrimitive, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Trait for element types stored in a sparse matrix.
///
/// # Implementations
///
/// Provided for:
/// - `f64` (default for numerical work)
/// - `f32` (for memory-constrained applications)
/// - `i64`, `i32` (integer systems; division and square root truncate)
pub trait Scalar:
    NumAssign
    + Clone
    + Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Zero
    + One
    + ToPrimitive
    + Neg<Output = Self>
    + 'static
{
    /// Accumulator for sums of squares, wide enough that `r * r` cannot overflow
    type SumSq: Copy + Zero;

    /// Square root
    fn sqrt(&self) -> Self;

    /// Add `self²` to a sum of squares
    fn add_square(&self, acc: Self::SumSq) -> Self::SumSq;

    /// Square root of an accumulated sum of squares
    fn sqrt_sum_sq(acc: Self::SumSq) -> Self;

    /// Lossy conversion used for diagnostics
    #[inline]
    fn to_f64_lossy(&self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl Scalar for f64 {
    type SumSq = f64;

    #[inline]
    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    #[inline]
    fn add_square(&self, acc: f64) -> f64 {
        acc + self * self
    }

    #[inline]
    fn sqrt_sum_sq(acc: f64) -> Self {
        acc.sqrt()
    }
}

impl Scalar for f32 {
    type SumSq = f32;

    #[inline]
    fn sqrt(&self) -> Self {
        f32::sqrt(*self)
    }

    #[inline]
    fn add_square(&self, acc: f32) -> f32 {
        acc + self * self
    }

    #[inline]
    fn sqrt_sum_sq(acc: f32) -> Self {
        acc.sqrt()
    }
}

/// Floor of the square root of `n`
fn isqrt_u128(n: u128) -> u128 {
    let mut r = (n as f64).sqrt() as u128;
    while r.checked_mul(r).is_none_or(|sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

macro_rules! impl_integer_scalar {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            /// Squares are summed in `u128` with saturation.
            type SumSq = u128;

            /// Integer square root, truncated toward zero; negative input yields zero.
            #[inline]
            fn sqrt(&self) -> Self {
                if *self <= 0 {
                    return 0;
                }
                isqrt_u128(*self as u128) as $t
            }

            #[inline]
            fn add_square(&self, acc: u128) -> u128 {
                let a = u128::from(self.unsigned_abs());
                acc.saturating_add(a * a)
            }

            /// Saturates at the type's maximum.
            #[inline]
            fn sqrt_sum_sq(acc: u128) -> Self {
                <$t>::try_from(isqrt_u128(acc)).unwrap_or(<$t>::MAX)
            }
        }
    )*};
}

impl_integer_scalar!(i32, i64);
