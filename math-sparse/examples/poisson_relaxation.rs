//! Solve a 1D Poisson problem with each relaxation method
//!
//! Run with `RUST_LOG=info cargo run --example poisson_relaxation`.

use math_audio_sparse::{CsrMatrix, RelaxationConfig, RelaxationMethod, relax};
use ndarray::Array1;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let n = 64;
    let h = 1.0 / (n + 1) as f64;

    // -u'' = π² sin(πx), u(0) = u(1) = 0, exact u = sin(πx)
    let mut matrix = CsrMatrix::with_capacity(n, 3 * n)?;
    for i in 0..n {
        matrix.set(i, i, 2.0 / (h * h))?;
        if i > 0 {
            matrix.set(i, i - 1, -1.0 / (h * h))?;
        }
        if i + 1 < n {
            matrix.set(i, i + 1, -1.0 / (h * h))?;
        }
    }
    matrix.close();

    let pi = std::f64::consts::PI;
    let grid: Vec<f64> = (1..=n).map(|i| i as f64 * h).collect();
    let rhs = Array1::from_iter(grid.iter().map(|&x| pi * pi * (pi * x).sin()));
    let exact = Array1::from_iter(grid.iter().map(|&x| (pi * x).sin()));

    // Optimal SOR factor for the 1D Laplacian
    let omega_opt = 2.0 / (1.0 + (pi * h).sin());

    let configs = [
        RelaxationConfig {
            method: RelaxationMethod::Jacobi,
            omega: 1.0,
        },
        RelaxationConfig {
            method: RelaxationMethod::GaussSeidel,
            omega: 1.0,
        },
        RelaxationConfig {
            method: RelaxationMethod::Sor,
            omega: omega_opt,
        },
        RelaxationConfig {
            method: RelaxationMethod::Ssor,
            omega: 1.5,
        },
    ];

    let max_steps = 20_000;
    let tolerance = 1e-8 * rhs.iter().map(|v| v * v).sum::<f64>().sqrt();

    for config in &configs {
        let mut x = Array1::zeros(n);
        let mut steps = 0;
        let mut norm = f64::INFINITY;

        while steps < max_steps && norm > tolerance {
            norm = relax(&matrix, &mut x, &rhs, config)?;
            steps += 1;
            if steps % 1000 == 0 {
                log::info!("{} step {}: residual = {:.3e}", config.method, steps, norm);
            }
        }

        let error = (&x - &exact).iter().fold(0.0_f64, |m, e| m.max(e.abs()));
        println!(
            "{:>12} (omega = {:.3}): {:>6} steps, residual {:.3e}, max error {:.3e}",
            config.method.to_string(),
            config.omega,
            steps,
            norm,
            error
        );
    }

    Ok(())
}
