//! End-to-end tests of Fickian diffusion on the reference fixtures

use approx::assert_relative_eq;
use pnm_rs::algorithms::FickianDiffusion;
use pnm_rs::error::TransportError;
use pnm_rs::fixtures;
use pnm_rs::physics::Phase;
use pnm_rs::solver::BoundaryCondition;

mod common;
use common::test_helpers::{diffusion_between, relative_error};

#[test]
fn test_reference_effective_diffusivity() {
    let (network, phase) = fixtures::prepared().unwrap();
    let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));

    diffusion.run().unwrap();
    let d_eff = diffusion.calc_effective_diffusivity().unwrap();

    assert_eq!((d_eff * 1000.0).round() / 1000.0, 0.025);
    assert!(relative_error(d_eff, 0.025) < 1e-12);
}

#[test]
fn test_flow_direction_does_not_matter() {
    let (network, phase) = fixtures::prepared().unwrap();

    let mut downward = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));
    downward.run().unwrap();

    let mut sideways = diffusion_between(&network, &phase, ("left", 0.4), ("right", 0.6));
    sideways.run().unwrap();

    assert_relative_eq!(
        downward.calc_effective_diffusivity().unwrap(),
        sideways.calc_effective_diffusivity().unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_repeated_runs_are_identical() {
    let (network, phase) = fixtures::prepared().unwrap();

    let values: Vec<f64> = (0..3)
        .map(|_| {
            let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));
            diffusion.run().unwrap();
            diffusion.calc_effective_diffusivity().unwrap()
        })
        .collect();

    assert_eq!(values[0].to_bits(), values[1].to_bits());
    assert_eq!(values[1].to_bits(), values[2].to_bits());
}

#[test]
fn test_effective_diffusivity_is_normalised_effective_property() {
    let network = fixtures::test_network().unwrap();
    let geometry = fixtures::test_geometry(&network).unwrap();
    let mut phase = fixtures::test_phase(&network).unwrap();

    // Non-uniform molar density: the mean is what matters
    let density: Vec<f64> = (0..network.num_pores()).map(|i| 40.0 + (i % 3) as f64).collect();
    let mean = density.iter().sum::<f64>() / density.len() as f64;
    phase.set("pore.molar_density", density).unwrap();
    fixtures::test_physics().regenerate(&network, &geometry, &mut phase).unwrap();

    let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));
    diffusion.run().unwrap();

    let normal = diffusion.transport().calc_eff_prop().unwrap();
    let d_eff = diffusion.calc_effective_diffusivity().unwrap();

    assert_relative_eq!(d_eff, normal / mean, max_relative = 1e-14);
    assert_eq!(diffusion.effective_diffusivity(), Some(d_eff));
}

#[test]
fn test_effective_diffusivity_before_run_fails() {
    let (network, phase) = fixtures::prepared().unwrap();
    let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));

    assert_eq!(
        diffusion.calc_effective_diffusivity(),
        Err(TransportError::NotSolved("FickianDiffusion".to_string()))
    );
    assert_eq!(diffusion.effective_diffusivity(), None);
}

#[test]
fn test_missing_conductance_fails_the_run() {
    // Phase without physics: no throat.diffusive_conductance
    let network = fixtures::test_network().unwrap();
    let phase = fixtures::test_phase(&network).unwrap();
    let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));

    assert_eq!(
        diffusion.run(),
        Err(TransportError::MissingProperty("throat.diffusive_conductance".to_string()))
    );
    assert!(diffusion.result().is_err());
}

#[test]
fn test_unknown_conductance_name_fails_the_run() {
    let (network, phase) = fixtures::prepared().unwrap();
    let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));

    let error = diffusion.run_with("knudsen_conductance", "mole_fraction").unwrap_err();
    assert_eq!(error.to_string(), "Property not found: throat.knudsen_conductance");
}

#[test]
fn test_missing_molar_density() {
    let network = fixtures::test_network().unwrap();
    let mut phase = Phase::new("bare", &network);
    phase.set("throat.diffusive_conductance", 1.0).unwrap();

    let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));
    diffusion.run().unwrap();

    assert_eq!(
        diffusion.calc_effective_diffusivity(),
        Err(TransportError::MissingProperty("pore.molar_density".to_string()))
    );
}

#[test]
fn test_single_dirichlet_value_has_no_effective_property() {
    let (network, phase) = fixtures::prepared().unwrap();
    let mut diffusion = FickianDiffusion::new(&network, &phase);
    diffusion
        .set_boundary_conditions(BoundaryCondition::Dirichlet(0.5), &network.pores("top").unwrap())
        .unwrap();
    diffusion.run().unwrap();

    // Uniform field: everything sits at the single Dirichlet value
    for value in diffusion.result().unwrap().values().iter() {
        assert_relative_eq!(*value, 0.5, epsilon = 1e-12);
    }
    assert!(matches!(
        diffusion.calc_effective_diffusivity(),
        Err(TransportError::InvalidBoundaryConditions(_))
    ));
}

#[test]
fn test_no_boundary_conditions() {
    let (network, phase) = fixtures::prepared().unwrap();
    let mut diffusion = FickianDiffusion::new(&network, &phase);

    assert_eq!(diffusion.run(), Err(TransportError::MissingBoundaryConditions));
}

#[test]
fn test_clearing_boundary_conditions() {
    let (network, phase) = fixtures::prepared().unwrap();
    let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));
    diffusion.run().unwrap();

    diffusion.clear_boundary_conditions();
    assert_eq!(diffusion.run(), Err(TransportError::MissingBoundaryConditions));

    // The earlier result survives a failed run
    assert!(diffusion.calc_effective_diffusivity().is_ok());
}

#[test]
fn test_mole_fraction_profile_and_phase_update() {
    let (network, mut phase) = fixtures::prepared().unwrap();

    let result = {
        let mut diffusion = diffusion_between(&network, &phase, ("top", 0.6), ("bottom", 0.4));
        diffusion.run().unwrap();
        diffusion.into_result().unwrap()
    };

    // Linear between z = 0.5 (0.4) and z = 4.5 (0.6)
    for (pore, coords) in network.coords().iter().enumerate() {
        let expected = 0.4 + 0.05 * (coords[2] - 0.5);
        assert_relative_eq!(result.values()[pore], expected, epsilon = 1e-12);
    }

    result.update_phase(&mut phase).unwrap();
    assert_eq!(phase.values("pore.mole_fraction").unwrap(), *result.values());
}
