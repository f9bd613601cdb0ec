//! Linear transport solver
//!
//! This module turns a network, its throat conductances and a set of
//! boundary conditions into a solved pore field.
//!
//! # Architecture (WHAT vs HOW)
//!
//! 1. **Problem** - WHAT to solve
//!    - Throat conductances, looked up on the phase by name
//!    - Boundary conditions ([`BoundaryConditions`])
//!    - Assembled into a [`LinearSystem`] by [`assemble`]
//!
//! 2. **Configuration** ([`SolverConfiguration`]) - HOW to solve
//!    - Direct factorisation or iterative solution with a tolerance
//!
//! 3. **Solver** ([`LinearSolver`] trait) - the numerical method
//!    - Knows nothing about pores or phases
//!
//! [`solve_linear_system`] chains the three and is shared by every transport
//! algorithm; [`GenericLinearTransport`] adds the state an algorithm keeps
//! between calls.
//!
//! # Workflow
//!
//! ```text
//! ┌──────────────┐   ┌────────────────────┐
//! │ Phase        │   │ Boundary           │
//! │ throat.<g>   │   │ conditions         │
//! └──────┬───────┘   └─────────┬──────────┘
//!        └──────────┬──────────┘
//!          ┌────────▼────────┐
//!          │ assemble        │ ← A x = b
//!          └────────┬────────┘
//!          ┌────────▼────────┐
//!          │ LinearSolver    │ ← LU or CG
//!          └────────┬────────┘
//!          ┌────────▼────────┐
//!          │ TransportResult │ ← field, rates
//!          └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use pnm_rs::fixtures;
//! use pnm_rs::solver::{solve_linear_system, BoundaryCondition, BoundaryConditions, SolverConfiguration};
//!
//! let (network, phase) = fixtures::prepared().unwrap();
//!
//! let mut bcs = BoundaryConditions::new();
//! bcs.set(&network, BoundaryCondition::Dirichlet(0.6), &network.pores("top").unwrap()).unwrap();
//! bcs.set(&network, BoundaryCondition::Dirichlet(0.4), &network.pores("bottom").unwrap()).unwrap();
//!
//! let result = solve_linear_system(
//!     &network,
//!     &phase,
//!     &bcs,
//!     "diffusive_conductance",
//!     "mole_fraction",
//!     &SolverConfiguration::default(),
//! ).unwrap();
//!
//! assert_eq!(result.values().len(), network.num_pores());
//! ```
//!
//! # Error Handling
//!
//! Every operation returns [`crate::error::Result`]. Common errors:
//! - No Dirichlet condition (`MissingBoundaryConditions`)
//! - Conductance not computed for the phase (`MissingProperty`)
//! - Cluster without a Dirichlet pore (`SingularSystem`)
//! - Iteration limit reached (`ConvergenceFailure`)

// =================================================================================================
// Module Declarations
// =================================================================================================
mod traits;
mod boundary;
mod assembly;
mod methods;
mod result;
mod transport;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// When to hand element-wise work to Rayon is an execution concern, so the
// threshold lives with the solver rather than in physics/data.rs.
//
// Stored in an AtomicUsize: changed at runtime by benchmarks and tests, read
// on every `apply()` without a lock. Relaxed ordering is enough for a
// performance hint.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of elements above which
/// [`PropertyData::apply()`](crate::physics::PropertyData::apply) switches to
/// parallel iteration.
///
/// Conductance models are a handful of multiplications per throat, so
/// networks below about a thousand throats are faster sequentially.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// `PropertyData::apply()` iterates sequentially below this element count
/// and switches to Rayon above it, when the crate is compiled with the
/// `parallel` feature.
///
/// # Example
///
/// ```rust
/// use pnm_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use pnm_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds. Guards are serialised through a lock, so
/// tests running on other threads never observe each other's threshold.
///
/// ```rust,ignore
/// let _guard = crate::solver::ThresholdGuard::save(50);
/// // threshold is now 50 …
/// // … and is automatically restored when _guard is dropped.
/// ```
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[cfg(test)]
static THRESHOLD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let lock = THRESHOLD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous, _lock: lock }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use traits::{LinearSolver, SolveReport, SolverConfiguration, SolverType};
pub use boundary::{BoundaryCondition, BoundaryConditions, DirichletFaces};
pub use assembly::{assemble, LinearSystem};
pub use methods::{ConjugateGradientSolver, DirectSolver};
pub use result::TransportResult;
pub use transport::{property_name, solve_linear_system, GenericLinearTransport};

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{Result, TransportError};
use nalgebra::DVector;

/// Check a solved field for NaN or infinite values
///
/// ```rust,ignore
/// validate_values(&solution, "mole_fraction")?;
/// ```
pub(crate) fn validate_values(values: &DVector<f64>, quantity: &str) -> Result<()> {
    if let Some(pore) = values.iter().position(|x| x.is_nan()) {
        return Err(TransportError::NumericalInstability(format!(
            "NaN detected in {} at pore {}",
            quantity, pore
        )));
    }

    if let Some(pore) = values.iter().position(|x| x.is_infinite()) {
        return Err(TransportError::NumericalInstability(format!(
            "Infinity detected in {} at pore {}. Check conductances for overflow.",
            quantity, pore
        )));
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_is_visible_across_threads() {
        use std::thread;

        let _guard = ThresholdGuard::save(1234);

        let handles: Vec<_> = (0..4)
            .map(|_| thread::spawn(parallel_threshold))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1234);
        }
    }

    #[test]
    fn test_validate_values() {
        assert!(validate_values(&DVector::from_vec(vec![0.1, 0.2]), "x").is_ok());

        let nan = validate_values(&DVector::from_vec(vec![0.1, f64::NAN]), "x");
        assert!(matches!(nan, Err(TransportError::NumericalInstability(m)) if m.contains("pore 1")));

        let inf = validate_values(&DVector::from_vec(vec![f64::INFINITY]), "x");
        assert!(matches!(inf, Err(TransportError::NumericalInstability(_))));
    }
}
