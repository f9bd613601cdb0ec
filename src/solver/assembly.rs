//! Assembly of the linear transport system
//!
//! # Mathematical Background
//!
//! Steady linear transport conserves the quantity at every pore:
//!
//! ```text
//! Σ_j g_ij (x_i - x_j) = q_i
//! ```
//!
//! where `g_ij` is the conductance of the throat joining pores `i` and `j`
//! and `q_i` the net rate injected at pore `i` (zero for internal pores).
//!
//! Dirichlet pores are eliminated: their row becomes `x_i = value` and the
//! coupling terms of their neighbours move to the right-hand side. The
//! remaining matrix is symmetric and, when every cluster touches a
//! Dirichlet pore, positive definite.

use crate::error::{Result, TransportError};
use crate::network::Network;
use crate::solver::boundary::{BoundaryCondition, BoundaryConditions};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Linear system `A x = b`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    /// Coefficient matrix A
    pub matrix: DMatrix<f64>,

    /// Right-hand side b
    pub rhs: DVector<f64>,
}

impl LinearSystem {
    /// Number of unknowns
    pub fn size(&self) -> usize {
        self.rhs.len()
    }

    /// Relative residual ‖b - Ax‖ / ‖b‖ (absolute when b = 0)
    pub fn residual(&self, x: &DVector<f64>) -> f64 {
        let r = &self.rhs - &self.matrix * x;
        let scale = self.rhs.norm();
        if scale > 0.0 { r.norm() / scale } else { r.norm() }
    }
}

/// Build the linear system for given throat conductances
///
/// # Errors
///
/// `DimensionMismatch` when `conductance` does not have one value per throat.
pub fn assemble(
    network: &Network,
    conductance: &DVector<f64>,
    boundary_conditions: &BoundaryConditions,
) -> Result<LinearSystem> {
    let num_pores = network.num_pores();
    if conductance.len() != network.num_throats() {
        return Err(TransportError::DimensionMismatch {
            key: "throat conductance".to_string(),
            expected: network.num_throats(),
            actual: conductance.len(),
        });
    }

    let mut matrix = DMatrix::zeros(num_pores, num_pores);
    let mut rhs = DVector::zeros(num_pores);

    // ====== Throat contributions ======

    for (throat, &[a, b]) in network.conns().iter().enumerate() {
        let g = conductance[throat];
        let fixed_a = boundary_conditions.dirichlet_value(a);
        let fixed_b = boundary_conditions.dirichlet_value(b);

        if fixed_a.is_none() {
            matrix[(a, a)] += g;
            match fixed_b {
                Some(value) => rhs[a] += g * value,
                None => matrix[(a, b)] -= g,
            }
        }

        if fixed_b.is_none() {
            matrix[(b, b)] += g;
            match fixed_a {
                Some(value) => rhs[b] += g * value,
                None => matrix[(b, a)] -= g,
            }
        }
    }

    // ====== Boundary conditions ======

    for (pore, condition) in boundary_conditions.iter() {
        match condition {
            BoundaryCondition::Dirichlet(value) => {
                matrix[(pore, pore)] = 1.0;
                rhs[pore] = value;
            }
            BoundaryCondition::Neumann(rate) => {
                rhs[pore] += rate;
            }
        }
    }

    debug!(
        unknowns = num_pores,
        constrained = boundary_conditions.len(),
        "assembled linear transport system"
    );

    Ok(LinearSystem { matrix, rhs })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> Network {
        let coords = (0..n).map(|i| [i as f64, 0.0, 0.0]).collect();
        let conns = (1..n).map(|i| [i - 1, i]).collect();
        Network::new(coords, conns).unwrap()
    }

    #[test]
    fn test_internal_rows_are_conservative() {
        let network = chain(3);
        let g = DVector::from_vec(vec![2.0, 3.0]);
        let system = assemble(&network, &g, &BoundaryConditions::new()).unwrap();

        // Without boundary conditions each row sums to zero
        for row in 0..3 {
            assert_eq!(system.matrix.row(row).sum(), 0.0);
        }
        assert_eq!(system.matrix[(1, 1)], 5.0);
        assert_eq!(system.matrix[(0, 1)], -2.0);
        assert_eq!(system.matrix[(2, 1)], -3.0);
    }

    #[test]
    fn test_dirichlet_elimination_keeps_symmetry() {
        let network = chain(4);
        let g = DVector::from_element(3, 1.0);
        let mut bcs = BoundaryConditions::new();
        bcs.set(&network, BoundaryCondition::Dirichlet(1.0), &[0]).unwrap();
        bcs.set(&network, BoundaryCondition::Dirichlet(0.0), &[3]).unwrap();

        let system = assemble(&network, &g, &bcs).unwrap();

        assert_eq!(system.matrix, system.matrix.transpose());
        assert_eq!(system.matrix[(0, 0)], 1.0);
        assert_eq!(system.matrix[(0, 1)], 0.0);
        assert_eq!(system.rhs[0], 1.0);
        assert_eq!(system.rhs[1], 1.0);
        assert_eq!(system.rhs[2], 0.0);
    }

    #[test]
    fn test_neumann_adds_source() {
        let network = chain(2);
        let g = DVector::from_element(1, 1.0);
        let mut bcs = BoundaryConditions::new();
        bcs.set(&network, BoundaryCondition::Neumann(0.25), &[1]).unwrap();

        let system = assemble(&network, &g, &bcs).unwrap();
        assert_eq!(system.rhs[1], 0.25);
    }

    #[test]
    fn test_conductance_size_checked() {
        let network = chain(3);
        let g = DVector::from_element(5, 1.0);
        assert!(matches!(
            assemble(&network, &g, &BoundaryConditions::new()),
            Err(TransportError::DimensionMismatch { expected: 2, actual: 5, .. })
        ));
    }

    #[test]
    fn test_residual() {
        let network = chain(2);
        let g = DVector::from_element(1, 1.0);
        let mut bcs = BoundaryConditions::new();
        bcs.set(&network, BoundaryCondition::Dirichlet(2.0), &[0]).unwrap();

        let system = assemble(&network, &g, &bcs).unwrap();
        let exact = DVector::from_vec(vec![2.0, 2.0]);
        assert!(system.residual(&exact) < 1e-14);
    }
}
