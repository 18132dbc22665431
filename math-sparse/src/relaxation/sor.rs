//! Successive over-relaxation (SOR)
//!
//! Rows are visited in order and each update is visible to the rows that
//! follow in the same sweep. With ω = 1 this is Gauss-Seidel.

use crate::error::Result;
use crate::sparse::CsrMatrix;
use crate::traits::Scalar;
use ndarray::Array1;
use num_traits::Zero;

impl<T: Scalar> CsrMatrix<T> {
    /// Perform one forward SOR sweep, updating `x` in place
    ///
    /// Returns sqrt(Σ r_i²), where r_i is the residual of row i at the moment
    /// it is visited.
    pub fn sor_step(&self, x: &mut Array1<T>, rhs: &Array1<T>, omega: T) -> Result<T> {
        self.ensure_closed()?;
        self.check_vector("x", x)?;
        self.check_vector("rhs", rhs)?;
        let diag = self.nonzero_diagonal()?;

        let norm = T::sqrt_sum_sq(self.sweep(x, rhs, &diag, omega, false));
        log::debug!("SOR step: residual = {:.6e}", norm.to_f64_lossy());
        Ok(norm)
    }

    /// Single SOR sweep over all rows, returning Σ r_i² in the widened accumulator
    pub(crate) fn sweep(
        &self,
        x: &mut Array1<T>,
        rhs: &Array1<T>,
        diag: &[T],
        omega: T,
        backward: bool,
    ) -> T::SumSq {
        let n = self.num_rows();
        let mut res = <T::SumSq as Zero>::zero();

        let rows: Box<dyn Iterator<Item = usize>> = if backward {
            Box::new((0..n).rev())
        } else {
            Box::new(0..n)
        };

        for i in rows {
            let r = self.row_residual(i, rhs[i], x);
            x[i] += omega * r / diag[i];
            res = r.add_square(res);
        }

        res
    }
}

#[cfg(test)]
mod tests {
    use crate::error::SparseError;
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

    /// Textbook Gauss-Seidel on a dense copy
    fn gauss_seidel(a: &CsrMatrix<f64>, x: &mut Array1<f64>, b: &Array1<f64>) {
        let dense = a.to_dense();
        for i in 0..x.len() {
            let mut sigma = 0.0;
            for j in 0..x.len() {
                if j != i {
                    sigma += dense[[i, j]] * x[j];
                }
            }
            x[i] = (b[i] - sigma) / dense[[i, i]];
        }
    }

    #[test]
    fn test_sor_first_step() {
        let a = tridiagonal();
        let b = array![3.0, 2.0, 3.0];
        let mut x = Array1::zeros(3);

        let norm = a.sor_step(&mut x, &b, 1.0).unwrap();

        // r = [3, 2.75, 3.6875]
        assert_relative_eq!(norm, 30.16015625_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(x[0], 0.75, epsilon = 1e-12);
        assert_relative_eq!(x[1], 0.6875, epsilon = 1e-12);
        assert_relative_eq!(x[2], 0.921875, epsilon = 1e-12);
    }

    #[test]
    fn test_sor_omega_one_is_gauss_seidel() {
        let a = tridiagonal();
        let b = array![3.0, 2.0, 3.0];
        let mut x = array![0.3, -0.2, 0.9];
        let mut reference = x.clone();

        for _ in 0..5 {
            a.sor_step(&mut x, &b, 1.0).unwrap();
            gauss_seidel(&a, &mut reference, &b);
            for i in 0..3 {
                assert_relative_eq!(x[i], reference[i], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_gauss_seidel_converges_monotonically() {
        let a = tridiagonal();
        let b = array![3.0, 2.0, 3.0];
        let mut x = Array1::zeros(3);

        let mut previous = f64::INFINITY;
        for _ in 0..12 {
            let norm = a.sor_step(&mut x, &b, 1.0).unwrap();
            assert!(norm < previous, "residual should strictly decrease");
            previous = norm;
        }

        for &xi in x.iter() {
            assert_relative_eq!(xi, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_over_relaxation_converges() {
        let a = tridiagonal();
        let b = array![3.0, 2.0, 3.0];
        let mut x = Array1::zeros(3);

        let mut norm = f64::INFINITY;
        for _ in 0..40 {
            norm = a.sor_step(&mut x, &b, 1.2).unwrap();
        }

        assert!(norm < 1e-10);
        let ax = a.matvec(&x).unwrap();
        for i in 0..3 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sor_integer() {
        let a = CsrMatrix::from_triplets(2, vec![(0, 0, 2_i32), (0, 1, 1), (1, 1, 2)]).unwrap();
        let b = array![5_i32, 4];
        let mut x = array![0_i32, 0];

        // r = [5, 4]
        assert_eq!(a.sor_step(&mut x, &b, 1).unwrap(), 6);
        assert_eq!(x, array![2, 2]);
    }

    #[test]
    fn test_sor_integer_large_residual() {
        let a = CsrMatrix::from_triplets(1, vec![(0, 0, 1_i32)]).unwrap();
        let b = array![50_000_i32];
        let mut x = array![0_i32];

        assert_eq!(a.sor_step(&mut x, &b, 1).unwrap(), 50_000);
        assert_eq!(x, array![50_000]);

        let a = CsrMatrix::from_triplets(2, vec![(0, 0, 1_i64), (1, 1, 1)]).unwrap();
        let b = array![3_000_000_000_000_i64, 4_000_000_000_000];
        let mut x = array![0_i64, 0];
        assert_eq!(a.sor_step(&mut x, &b, 1).unwrap(), 5_000_000_000_000);
    }

    #[test]
    fn test_sor_f32() {
        let a = CsrMatrix::from_raw_parts(
            vec![0, 2, 5, 7],
            vec![0, 1, 1, 0, 2, 2, 1],
            vec![4.0_f32, -1.0, 4.0, -1.0, -1.0, 4.0, -1.0],
        )
        .unwrap();
        let b = array![3.0_f32, 2.0, 3.0];
        let mut x = Array1::zeros(3);

        let norm = a.sor_step(&mut x, &b, 1.0).unwrap();
        assert_relative_eq!(norm, 30.16015625_f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(x[2], 0.921875_f32, epsilon = 1e-6);
    }

    #[test]
    fn test_sor_open_matrix() {
        let mut a = CsrMatrix::new(2).unwrap();
        a.set(0, 0, 1.0).unwrap();
        a.set(1, 1, 1.0).unwrap();
        let b = array![1.0, 1.0];
        let mut x = Array1::zeros(2);

        let err = a.sor_step(&mut x, &b, 1.0).unwrap_err();
        assert!(matches!(err, SparseError::PatternOpen));

        a.close();
        assert_relative_eq!(a.sor_step(&mut x, &b, 1.0).unwrap(), 2.0_f64.sqrt());
    }
}
