//! Numerical methods for linear systems
//!
//! This module contains concrete implementations of the
//! [`LinearSolver`](crate::solver::LinearSolver) trait.
//!
//! # Available Methods
//!
//! - **[`DirectSolver`]**: dense LU factorisation with partial pivoting
//!   - Exact up to round-off
//!   - Cost O(n³), memory O(n²)
//!   - Use: small and medium networks, reference solutions
//!
//! - **[`ConjugateGradientSolver`]**: Jacobi-preconditioned conjugate gradient
//!   - Requires a symmetric positive definite matrix, which assembly
//!     guarantees once every cluster touches a Dirichlet pore
//!   - Cost O(n²) per iteration on the dense matrix
//!   - Use: larger networks where a tolerance is acceptable
//!
//! # Example
//!
//! ```rust
//! use nalgebra::{DMatrix, DVector};
//! use pnm_rs::solver::{ConjugateGradientSolver, DirectSolver, LinearSolver, LinearSystem};
//!
//! let system = LinearSystem {
//!     matrix: DMatrix::from_row_slice(2, 2, &[2.0, -1.0, -1.0, 2.0]),
//!     rhs: DVector::from_vec(vec![1.0, 1.0]),
//! };
//!
//! let direct = DirectSolver::new().solve(&system).unwrap();
//! let iterative = ConjugateGradientSolver::new(1e-12, 10).solve(&system).unwrap();
//!
//! assert!((direct.solution[0] - 1.0).abs() < 1e-12);
//! assert!((iterative.solution[1] - 1.0).abs() < 1e-10);
//! ```

mod direct;
mod conjugate_gradient;

// Re-exports for convenience
pub use direct::DirectSolver;
pub use conjugate_gradient::ConjugateGradientSolver;
