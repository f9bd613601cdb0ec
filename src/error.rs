//! Error type shared by every layer of the crate
//!
//! Lookup failures (unknown property keys, labels, or an algorithm that has
//! not been solved yet) are kept distinct from numerical failures so that a
//! caller can tell a typo in a property name from an ill-posed system.

use thiserror::Error;

/// Errors raised by networks, property stores and transport algorithms
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("Property not found: {0}")]
    MissingProperty(String),

    #[error("Invalid property key '{0}': expected 'pore.<name>' or 'throat.<name>'")]
    InvalidPropertyKey(String),

    #[error("Dimension mismatch for '{key}': expected {expected} values, got {actual}")]
    DimensionMismatch {
        key: String,
        expected: usize,
        actual: usize,
    },

    #[error("Label not found: {0}")]
    MissingLabel(String),

    #[error("Invalid network: {0}")]
    InvalidNetwork(String),

    #[error("Pore {pore} is out of range (network has {num_pores} pores)")]
    PoreOutOfRange { pore: usize, num_pores: usize },

    #[error("Invalid boundary conditions: {0}")]
    InvalidBoundaryConditions(String),

    #[error("No Dirichlet boundary condition set: the system has no unique solution")]
    MissingBoundaryConditions,

    #[error("Algorithm '{0}' has not been set up (call setup() before run())")]
    NotConfigured(String),

    #[error("Algorithm '{0}' has no results (call run() first)")]
    NotSolved(String),

    #[error("Singular linear system: {0}")]
    SingularSystem(String),

    #[error("Solver did not converge after {iterations} iterations (residual {residual:e})")]
    ConvergenceFailure { iterations: usize, residual: f64 },

    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Mean molar density is {0}: effective diffusivity is undefined")]
    DegenerateMolarDensity(f64),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let error = TransportError::MissingProperty("throat.foo".to_string());
        assert_eq!(error.to_string(), "Property not found: throat.foo");

        let error = TransportError::PoreOutOfRange { pore: 12, num_pores: 10 };
        assert!(error.to_string().contains("12"));
        assert!(error.to_string().contains("10 pores"));
    }

    #[test]
    fn test_convergence_failure_message() {
        let error = TransportError::ConvergenceFailure { iterations: 5, residual: 1e-3 };
        assert!(error.to_string().contains("5 iterations"));
    }
}
