//! Jacobi-preconditioned conjugate gradient
//!
//! # Mathematical Background
//!
//! For a symmetric positive definite matrix `A`, conjugate gradient builds
//! A-orthogonal search directions and converges in at most `n` steps in
//! exact arithmetic. Scaling the residual by `diag(A)⁻¹` (Jacobi
//! preconditioning) compensates for throats whose conductances differ by
//! orders of magnitude.
//!
//! ```text
//! r_0 = b - A x_0,  z_0 = M⁻¹ r_0,  p_0 = z_0
//! α_k = (r_k · z_k) / (p_k · A p_k)
//! x_{k+1} = x_k + α_k p_k
//! r_{k+1} = r_k - α_k A p_k
//! β_k = (r_{k+1} · z_{k+1}) / (r_k · z_k)
//! p_{k+1} = z_{k+1} + β_k p_k
//! ```
//!
//! Iteration stops once ‖r_k‖ / ‖b‖ falls below the tolerance.

use crate::error::{Result, TransportError};
use crate::solver::assembly::LinearSystem;
use crate::solver::traits::{LinearSolver, SolveReport};
use nalgebra::DVector;
use tracing::{debug, warn};

// =================================================================================================
// Conjugate Gradient Solver
// =================================================================================================

/// Iterative solver for symmetric positive definite systems
///
/// # Example
///
/// ```rust
/// use pnm_rs::solver::{ConjugateGradientSolver, LinearSolver};
///
/// let solver = ConjugateGradientSolver::new(1e-10, 500);
/// assert_eq!(solver.tolerance(), 1e-10);
/// assert_eq!(solver.name(), "Conjugate gradient");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjugateGradientSolver {
    tolerance: f64,
    max_iterations: usize,
}

impl ConjugateGradientSolver {
    /// Create a solver stopping at relative residual `tolerance`
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self { tolerance, max_iterations }
    }

    /// Target relative residual
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Iteration limit
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }
}

impl LinearSolver for ConjugateGradientSolver {
    fn solve(&self, system: &LinearSystem) -> Result<SolveReport> {
        let n = system.size();
        let b = &system.rhs;
        let b_norm = b.norm();

        if b_norm == 0.0 {
            return Ok(SolveReport {
                solution: DVector::zeros(n),
                iterations: 0,
                residual: 0.0,
            });
        }

        // ====== Preconditioner ======

        let diagonal = system.matrix.diagonal();
        if let Some(row) = diagonal.iter().position(|d| !(d.is_finite() && *d > 0.0)) {
            return Err(TransportError::SingularSystem(format!(
                "non-positive diagonal entry at row {}",
                row
            )));
        }
        let inverse_diagonal = diagonal.map(|d| 1.0 / d);

        // ====== Iteration ======

        let mut x = DVector::<f64>::zeros(n);
        let mut r = b.clone();
        let mut z = r.component_mul(&inverse_diagonal);
        let mut p = z.clone();
        let mut rz = r.dot(&z);
        let mut residual = 1.0;

        for iteration in 1..=self.max_iterations {
            let ap = &system.matrix * &p;
            let curvature = p.dot(&ap);
            if !(curvature.is_finite() && curvature > 0.0) {
                return Err(TransportError::SingularSystem(format!(
                    "matrix is not positive definite (p·Ap = {:e} at iteration {})",
                    curvature, iteration
                )));
            }

            let alpha = rz / curvature;
            x.axpy(alpha, &p, 1.0);
            r.axpy(-alpha, &ap, 1.0);

            residual = r.norm() / b_norm;
            if !residual.is_finite() {
                return Err(TransportError::NumericalInstability(format!(
                    "residual diverged at iteration {}",
                    iteration
                )));
            }

            if residual < self.tolerance {
                debug!(iterations = iteration, residual, "conjugate gradient converged");
                return Ok(SolveReport { solution: x, iterations: iteration, residual });
            }

            z = r.component_mul(&inverse_diagonal);
            let rz_next = r.dot(&z);
            let beta = rz_next / rz;
            p = &z + &p * beta;
            rz = rz_next;
        }

        warn!(
            iterations = self.max_iterations,
            residual,
            tolerance = self.tolerance,
            "conjugate gradient did not converge"
        );

        Err(TransportError::ConvergenceFailure {
            iterations: self.max_iterations,
            residual,
        })
    }

    fn name(&self) -> &str {
        "Conjugate gradient"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
