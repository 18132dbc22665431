//! Jacobi relaxation
//!
//! x ← x + D⁻¹ (b - A x), where every row uses the previous iterate.

use crate::error::Result;
use crate::sparse::CsrMatrix;
use crate::traits::Scalar;
use crate::vector::vector_norm;
use ndarray::Array1;

impl<T: Scalar> CsrMatrix<T> {
    /// Perform one Jacobi step, updating `x` in place
    ///
    /// Returns the norm of the residual `rhs - A x` evaluated at the incoming `x`.
    pub fn jacobi_step(&self, x: &mut Array1<T>, rhs: &Array1<T>) -> Result<T> {
        self.ensure_closed()?;
        self.check_vector("x", x)?;
        self.check_vector("rhs", rhs)?;
        let diag = self.nonzero_diagonal()?;

        // r = -A*x + rhs
        let mut r = Array1::from_elem(self.num_rows(), T::zero());
        self.multiply(x, &mut r, -T::one())?;
        r += rhs;

        for ((xi, &ri), &di) in x.iter_mut().zip(r.iter()).zip(diag.iter()) {
            *xi += ri / di;
        }

        let norm = vector_norm(&r);
        log::debug!("Jacobi step: residual = {:.6e}", norm.to_f64_lossy());
        Ok(norm)
    }
}
