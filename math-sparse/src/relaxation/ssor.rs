//! Symmetric successive over-relaxation (SSOR)

use crate::error::Result;
use crate::sparse::CsrMatrix;
use crate::traits::Scalar;
use ndarray::Array1;

impl<T: Scalar> CsrMatrix<T> {
    /// Perform one SSOR step: a forward SOR sweep followed by a backward sweep
    ///
    /// Both sweeps update `x` in place. The returned norm covers the backward
    /// sweep only.
    pub fn ssor_step(&self, x: &mut Array1<T>, rhs: &Array1<T>, omega: T) -> Result<T> {
        self.ensure_closed()?;
        self.check_vector("x", x)?;
        self.check_vector("rhs", rhs)?;
        let diag = self.nonzero_diagonal()?;

        self.sweep(x, rhs, &diag, omega, false);
        let norm = T::sqrt_sum_sq(self.sweep(x, rhs, &diag, omega, true));

        log::debug!("SSOR step: residual = {:.6e}", norm.to_f64_lossy());
        Ok(norm)
    }
}

#[cfg(test)]
mod tests {
    use crate::sparse::CsrMatrix;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    fn tridiagonal() -> CsrMatrix<f64> {
        CsrMatrix::from_raw_parts(
            vec![0, 2, 5, 7],
            vec![0, 1, 1, 0, 2, 2, 1],
            vec![4.0, -1.0, 4.0, -1.0, -1.0, 4.0, -1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_ssor_reports_backward_sweep_only() {
        // The forward sweep solves a diagonal system exactly, so the
        // backward sweep sees no residual.
        let a = CsrMatrix::from_triplets(2, vec![(0, 0, 2.0), (1, 1, 4.0)]).unwrap();
        let b = array![2.0, 8.0];

        let mut x = Array1::zeros(2);
        let norm = a.ssor_step(&mut x, &b, 1.0).unwrap();
        assert_relative_eq!(norm, 0.0);
        assert_eq!(x, array![1.0, 2.0]);

        let mut y = Array1::zeros(2);
        let forward = a.sor_step(&mut y, &b, 1.0).unwrap();
        assert_relative_eq!(forward, 68.0_f64.sqrt());
    }

    #[test]
    fn test_ssor_matches_forward_then_backward() {
        let a = tridiagonal();
        let b = array![3.0, 2.0, 3.0];
        let omega = 1.3;

        let mut x = Array1::zeros(3);
        let norm = a.ssor_step(&mut x, &b, omega).unwrap();

        let mut y: Array1<f64> = Array1::zeros(3);
        a.sor_step(&mut y, &b, omega).unwrap();
        let mut res = 0.0;
        for i in (0..3).rev() {
            let mut r = b[i];
            for (j, v) in a.row_entries(i) {
                r -= v * y[j];
            }
            y[i] += omega * r / a.diag(i);
            res += r * r;
        }

        assert_relative_eq!(norm, res.sqrt(), epsilon = 1e-12);
        for i in 0..3 {
            assert_relative_eq!(x[i], y[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_ssor_integer() {
        let a = CsrMatrix::from_triplets(2, vec![(0, 0, 2_i32), (0, 1, 1), (1, 1, 2)]).unwrap();
        let b = array![5_i32, 4];
        let mut x = array![0_i32, 0];

        // forward: x = [2, 2]; backward residuals [0, -1], -1 / 2 truncates to 0
        assert_eq!(a.ssor_step(&mut x, &b, 1).unwrap(), 1);
        assert_eq!(x, array![2, 2]);
    }

    #[test]
    fn test_ssor_integer_large_residual() {
        let a = CsrMatrix::from_triplets(2, vec![(0, 0, 1_i32), (0, 1, 1), (1, 1, 1)]).unwrap();
        let b = array![0_i32, 50_000];
        let mut x = array![0_i32, 0];

        // forward: x = [0, 50_000]; backward residuals [0, -50_000]
        assert_eq!(a.ssor_step(&mut x, &b, 1).unwrap(), 50_000);
        assert_eq!(x, array![-50_000, 50_000]);
    }

    #[test]
    fn test_ssor_converges() {
        let a = tridiagonal();
        let b = array![3.0, 2.0, 3.0];
        let mut x = Array1::zeros(3);

        let mut previous = f64::INFINITY;
        for _ in 0..12 {
            let norm = a.ssor_step(&mut x, &b, 1.0).unwrap();
            assert!(norm < previous);
            previous = norm;
        }

        for &xi in x.iter() {
            assert_relative_eq!(xi, 1.0, epsilon = 1e-9);
        }
    }
}
