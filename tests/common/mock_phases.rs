//! Phases with hand-set conductances
//!
//! These skip the physics layer so that tests can impose conductance
//! patterns with known analytical solutions.

use nalgebra::DVector;
use pnm_rs::network::Network;
use pnm_rs::physics::Phase;

/// Phase with unit molar density and `throat.diffusive_conductance` given by
/// `conductance(throat, coords_a, coords_b)`
///
/// With unit molar density the effective diffusivity equals the raw
/// effective property.
pub fn phase_with_conductance<F>(network: &Network, conductance: F) -> Phase
where
    F: Fn(usize, [f64; 3], [f64; 3]) -> f64,
{
    let coords = network.coords();
    let values: Vec<f64> = network
        .conns()
        .iter()
        .enumerate()
        .map(|(throat, &[a, b])| conductance(throat, coords[a], coords[b]))
        .collect();

    let mut phase = Phase::new("mock", network);
    phase.set("pore.molar_density", 1.0).unwrap();
    phase
        .set("throat.diffusive_conductance", DVector::from_vec(values))
        .unwrap();
    phase
}

/// Phase with conductances spread over an order of magnitude
///
/// Deterministic: throat `t` gets `0.5 + (7t mod 11)`.
pub fn heterogeneous_phase(network: &Network) -> Phase {
    phase_with_conductance(network, |throat, _, _| 0.5 + ((7 * throat) % 11) as f64)
}
