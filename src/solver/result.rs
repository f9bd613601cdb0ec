//! Results of a linear transport solve

use crate::error::Result;
use crate::network::Network;
use crate::physics::{Phase, PropertyKey};
use crate::solver::boundary::BoundaryConditions;
use nalgebra::DVector;
use std::collections::HashMap;

// =================================================================================================
// Transport Result
// =================================================================================================

/// Solved quantity field and everything needed to post-process it
///
/// The result keeps its own copy of the conductances and boundary conditions
/// it was computed with, so rates and effective properties stay consistent
/// even if the algorithm is reconfigured afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResult {
    quantity: String,
    conductance: String,
    values: DVector<f64>,
    throat_conductance: DVector<f64>,
    boundary_conditions: BoundaryConditions,
    iterations: usize,
    residual: f64,
    metadata: HashMap<String, String>,
}

impl TransportResult {
    /// Create a new result
    ///
    /// `quantity` and `conductance` are bare property names (no element prefix).
    pub fn new(
        quantity: impl Into<String>,
        conductance: impl Into<String>,
        values: DVector<f64>,
        throat_conductance: DVector<f64>,
        boundary_conditions: BoundaryConditions,
    ) -> Self {
        Self {
            quantity: quantity.into(),
            conductance: conductance.into(),
            values,
            throat_conductance,
            boundary_conditions,
            iterations: 0,
            residual: 0.0,
            metadata: HashMap::new(),
        }
    }

    /// Record solver statistics
    pub fn with_convergence(mut self, iterations: usize, residual: f64) -> Self {
        self.iterations = iterations;
        self.residual = residual;
        self
    }

    /// Name of the solved quantity
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Full property key of the solved quantity (`pore.<quantity>`)
    pub fn quantity_key(&self) -> String {
        PropertyKey::pore(self.quantity.as_str()).to_string()
    }

    /// Name of the conductance property used
    pub fn conductance(&self) -> &str {
        &self.conductance
    }

    /// Quantity value at every pore
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Conductance of every throat used in the solve
    pub fn throat_conductance(&self) -> &DVector<f64> {
        &self.throat_conductance
    }

    /// Boundary conditions used in the solve
    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.boundary_conditions
    }

    /// Iterations reported by the linear solver
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Relative residual of the solution
    pub fn residual(&self) -> f64 {
        self.residual
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Get a metadata entry
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Rate through every throat, positive from its first pore to its second
    pub fn throat_rates(&self, network: &Network) -> DVector<f64> {
        DVector::from_iterator(
            network.num_throats(),
            network
                .conns()
                .iter()
                .zip(self.throat_conductance.iter())
                .map(|(&[a, b], g)| g * (self.values[a] - self.values[b])),
        )
    }

    /// Net rate leaving a group of pores into the rest of the network
    ///
    /// Sums `g (x_inside - x_outside)` over every throat with exactly one end
    /// in `pores`. For a Dirichlet face held at the higher value the rate is
    /// positive. For a group without sources it is zero up to solver
    /// accuracy.
    ///
    /// # Errors
    ///
    /// `PoreOutOfRange` for an unknown pore.
    pub fn rate(&self, network: &Network, pores: &[usize]) -> Result<f64> {
        network.check_pores(pores)?;

        let mut inside = vec![false; network.num_pores()];
        for &pore in pores {
            inside[pore] = true;
        }

        let total = network
            .conns()
            .iter()
            .zip(self.throat_conductance.iter())
            .filter(|&(&[a, b], _)| inside[a] != inside[b])
            .map(|(&[a, b], g)| {
                let (from, to) = if inside[a] { (a, b) } else { (b, a) };
                g * (self.values[from] - self.values[to])
            })
            .sum();

        Ok(total)
    }

    /// Write the solved field onto `phase` as `pore.<quantity>`
    pub fn update_phase(&self, phase: &mut Phase) -> Result<()> {
        phase.set(&self.quantity_key(), self.values.clone())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::BoundaryCondition;

    fn chain() -> Network {
        let coords = (0..4).map(|i| [i as f64, 0.0, 0.0]).collect();
        Network::new(coords, vec![[0, 1], [1, 2], [2, 3]]).unwrap()
    }

    fn result(network: &Network) -> TransportResult {
        let mut bcs = BoundaryConditions::new();
        bcs.set(network, BoundaryCondition::Dirichlet(3.0), &[0]).unwrap();
        bcs.set(network, BoundaryCondition::Dirichlet(0.0), &[3]).unwrap();
        TransportResult::new(
            "mole_fraction",
            "diffusive_conductance",
            DVector::from_vec(vec![3.0, 2.0, 1.0, 0.0]),
            DVector::from_element(3, 2.0),
            bcs,
        )
    }

    #[test]
    fn test_rate_through_faces() {
        let network = chain();
        let result = result(&network);

        assert_eq!(result.rate(&network, &[0]).unwrap(), 2.0);
        assert_eq!(result.rate(&network, &[3]).unwrap(), -2.0);
        assert_eq!(result.rate(&network, &[0, 1, 2, 3]).unwrap(), 0.0);
        assert_eq!(result.rate(&network, &[1, 2]).unwrap(), 0.0);
    }

    #[test]
    fn test_rate_rejects_unknown_pore() {
        let network = chain();
        assert!(result(&network).rate(&network, &[9]).is_err());
    }

    #[test]
    fn test_throat_rates() {
        let network = chain();
        let rates = result(&network).throat_rates(&network);
        assert_eq!(rates, DVector::from_element(3, 2.0));
    }

    #[test]
    fn test_update_phase() {
        let network = chain();
        let mut phase = Phase::new("air", &network);
        let result = result(&network);

        result.update_phase(&mut phase).unwrap();

        assert_eq!(result.quantity_key(), "pore.mole_fraction");
        assert_eq!(phase.values("pore.mole_fraction").unwrap(), *result.values());
    }

    #[test]
    fn test_metadata() {
        let network = chain();
        let mut result = result(&network).with_convergence(1, 1e-16);
        result.add_metadata("solver", "LU decomposition");

        assert_eq!(result.metadata("solver"), Some("LU decomposition"));
        assert_eq!(result.metadata("missing"), None);
        assert_eq!(result.iterations(), 1);
    }
}
