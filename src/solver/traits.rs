//! Linear solver traits and configuration
//!
//! # Design Philosophy
//!
//! - Central enum `SolverType` names the numerical method and carries its
//!   parameters
//! - `SolverConfiguration` wraps it, validates it, and builds the solver
//! - `LinearSolver` is the stable interface every method implements

use crate::error::{Result, TransportError};
use crate::solver::assembly::LinearSystem;
use crate::solver::methods::{ConjugateGradientSolver, DirectSolver};
use nalgebra::DVector;

// ============================================================================
// Central Solver Type Enumeration
// ============================================================================

/// Numerical method used to solve the assembled linear system
///
/// # Examples
///
/// ```rust
/// use pnm_rs::solver::SolverType;
///
/// // Dense LU factorisation
/// let solver_type = SolverType::Direct;
///
/// // Preconditioned conjugate gradient
/// let solver_type = SolverType::Iterative {
///     tolerance: 1e-10,
///     max_iterations: 1000,
/// };
/// assert_eq!(solver_type.name(), "Iterative");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum SolverType {
    /// Direct factorisation
    ///
    /// Exact up to round-off; cost grows with the cube of the pore count.
    Direct,

    /// Iterative solution to convergence
    ///
    /// # Parameters
    /// - `tolerance`: relative residual ‖b - Ax‖ / ‖b‖ to reach
    /// - `max_iterations`: safety limit
    Iterative {
        tolerance: f64,
        max_iterations: usize,
    },
}

impl SolverType {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            SolverType::Direct => "Direct",
            SolverType::Iterative { .. } => "Iterative",
        }
    }

    /// Validate that parameters are meaningful
    pub fn validate(&self) -> Result<()> {
        match self {
            SolverType::Direct => Ok(()),
            SolverType::Iterative { tolerance, max_iterations } => {
                if !tolerance.is_finite() || *tolerance <= 0.0 {
                    return Err(TransportError::InvalidConfiguration(
                        "Tolerance must be positive".to_string(),
                    ));
                }
                if *max_iterations == 0 {
                    return Err(TransportError::InvalidConfiguration(
                        "Maximum iterations must be positive".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Solver configuration
// =================================================================================================

/// Configuration of the linear solve performed by transport algorithms
///
/// # Examples
///
/// ```rust
/// use pnm_rs::solver::SolverConfiguration;
///
/// let config = SolverConfiguration::iterative(1e-12, 500);
/// assert!(config.validate().is_ok());
///
/// let default = SolverConfiguration::default();
/// assert_eq!(default.solver_type.name(), "Direct");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfiguration {
    /// Type of solver and its parameters
    pub solver_type: SolverType,
}

impl SolverConfiguration {
    /// Create a new configuration with a given solver type
    pub fn new(solver_type: SolverType) -> Self {
        Self { solver_type }
    }

    /// Create a direct solver configuration
    pub fn direct() -> Self {
        Self::new(SolverType::Direct)
    }

    /// Create an iterative solver configuration
    pub fn iterative(tolerance: f64, max_iterations: usize) -> Self {
        Self::new(SolverType::Iterative { tolerance, max_iterations })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.solver_type.validate()
    }

    /// Build the solver this configuration describes
    pub fn build(&self) -> Result<Box<dyn LinearSolver>> {
        self.validate()?;
        Ok(match &self.solver_type {
            SolverType::Direct => Box::new(DirectSolver::new()),
            SolverType::Iterative { tolerance, max_iterations } => {
                Box::new(ConjugateGradientSolver::new(*tolerance, *max_iterations))
            }
        })
    }
}

impl Default for SolverConfiguration {
    fn default() -> Self {
        Self::direct()
    }
}

// =================================================================================================
// Linear solver trait
// =================================================================================================

/// Outcome of a linear solve
#[derive(Clone, Debug, PartialEq)]
pub struct SolveReport {
    /// Solution vector
    pub solution: DVector<f64>,

    /// Iterations performed (1 for direct methods)
    pub iterations: usize,

    /// Relative residual ‖b - Ax‖ / ‖b‖ of the returned solution
    pub residual: f64,
}

/// Trait for linear system solvers
///
/// # Responsibility
/// Solves `A x = b` for an assembled system. Knows nothing about pores,
/// throats or boundary conditions.
pub trait LinearSolver {
    /// Solve the system
    ///
    /// # Errors
    /// - `SingularSystem` when the matrix cannot be inverted
    /// - `ConvergenceFailure` when an iterative method runs out of iterations
    fn solve(&self, system: &LinearSystem) -> Result<SolveReport>;

    /// Name of the method (used for logging and result metadata)
    fn name(&self) -> &str;
}
