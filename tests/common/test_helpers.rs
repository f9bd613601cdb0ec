//! Helper functions for integration tests

use nalgebra::DVector;
use pnm_rs::algorithms::FickianDiffusion;
use pnm_rs::network::Network;
use pnm_rs::physics::Phase;
use pnm_rs::solver::BoundaryCondition;

/// Diffusion with Dirichlet `high` on `inlet` and `low` on `outlet`, not yet run
pub fn diffusion_between<'a>(
    network: &'a Network,
    phase: &'a Phase,
    inlet: (&str, f64),
    outlet: (&str, f64),
) -> FickianDiffusion<'a> {
    let mut diffusion = FickianDiffusion::new(network, phase);
    diffusion
        .set_boundary_conditions(BoundaryCondition::Dirichlet(inlet.1), &network.pores(inlet.0).unwrap())
        .unwrap();
    diffusion
        .set_boundary_conditions(BoundaryCondition::Dirichlet(outlet.1), &network.pores(outlet.0).unwrap())
        .unwrap();
    diffusion
}

/// Assert that two pore fields are close (within absolute tolerance)
pub fn assert_fields_close(field1: &DVector<f64>, field2: &DVector<f64>, tolerance: f64, message: &str) {
    assert_eq!(field1.len(), field2.len(), "{}: Dimension mismatch", message);

    for (i, (&v1, &v2)) in field1.iter().zip(field2.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Pore {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}
