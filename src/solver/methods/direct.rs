//! Direct solution by LU factorisation
//!
//! # Mathematical Background
//!
//! The matrix is factorised as `P A = L U` with partial pivoting, then
//! `x` follows from one forward and one backward substitution.
//!
//! A network containing a cluster with no Dirichlet pore produces a singular
//! matrix: the quantity in that cluster is only defined up to a constant.
//! Exact zero pivots are reported by the factorisation; near-zero pivots
//! are caught by checking the residual of the returned solution.

use crate::error::{Result, TransportError};
use crate::solver::assembly::LinearSystem;
use crate::solver::traits::{LinearSolver, SolveReport};
use nalgebra::DVector;
use tracing::debug;

/// Residual above which a factorised solution is treated as meaningless
const SINGULAR_RESIDUAL: f64 = 1e-6;

// =================================================================================================
// Direct Solver
// =================================================================================================

/// Dense LU solver
///
/// # Example
///
/// ```rust
/// use pnm_rs::solver::{DirectSolver, LinearSolver};
///
/// let solver = DirectSolver::new();
/// assert_eq!(solver.name(), "LU decomposition");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSolver;

impl DirectSolver {
    /// Create a new direct solver
    pub fn new() -> Self {
        Self
    }
}

impl LinearSolver for DirectSolver {
    fn solve(&self, system: &LinearSystem) -> Result<SolveReport> {
        let n = system.size();
        if n == 0 {
            return Ok(SolveReport {
                solution: DVector::zeros(0),
                iterations: 0,
                residual: 0.0,
            });
        }

        // ====== Factorisation ======

        let lu = system.matrix.clone().lu();
        let solution = lu.solve(&system.rhs).ok_or_else(|| {
            TransportError::SingularSystem(
                "zero pivot in LU factorisation (is every cluster connected to a Dirichlet pore?)"
                    .to_string(),
            )
        })?;

        // ====== Sanity check ======

        let residual = system.residual(&solution);
        if !residual.is_finite() || residual > SINGULAR_RESIDUAL {
            return Err(TransportError::SingularSystem(format!(
                "LU solution has relative residual {:e}",
                residual
            )));
        }

        debug!(unknowns = n, residual, "direct solve finished");

        Ok(SolveReport { solution, iterations: 1, residual })
    }

    fn name(&self) -> &str {
        "LU decomposition"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
