//! Steady binary diffusion
//!
//! # Mathematical Background
//!
//! Fick's first law on a pore network: the molar rate through a throat is
//! proportional to the mole-fraction difference between its pores,
//!
//! ```text
//! n_ij = g_ij (x_i - x_j),    g = c · D_AB · A / L
//! ```
//!
//! The generic effective property of the solved field carries the molar
//! density `c` in it. Dividing by the mean molar density of the phase gives
//! the effective diffusivity of the domain in m²/s.

use crate::error::Result;
use crate::network::Network;
use crate::physics::{HasMolarDensity, Phase};
use crate::solver::{
    solve_linear_system, BoundaryCondition, GenericLinearTransport, SolverConfiguration, TransportResult,
};
use tracing::info;

/// Conductance property used when none is given
pub const DEFAULT_CONDUCTANCE: &str = "diffusive_conductance";

/// Quantity solved for when none is given
pub const DEFAULT_QUANTITY: &str = "mole_fraction";

const NAME: &str = "FickianDiffusion";

// =================================================================================================
// Fickian Diffusion
// =================================================================================================

/// Steady Fickian diffusion algorithm
///
/// # Example
///
/// ```rust
/// use pnm_rs::algorithms::FickianDiffusion;
/// use pnm_rs::fixtures;
/// use pnm_rs::solver::BoundaryCondition;
///
/// let network = fixtures::test_network().unwrap();
/// let geometry = fixtures::test_geometry(&network).unwrap();
/// let mut phase = fixtures::test_phase(&network).unwrap();
/// fixtures::test_physics().regenerate(&network, &geometry, &mut phase).unwrap();
///
/// let mut diffusion = FickianDiffusion::new(&network, &phase);
/// diffusion.set_boundary_conditions(BoundaryCondition::Dirichlet(0.6), &network.pores("top").unwrap()).unwrap();
/// diffusion.set_boundary_conditions(BoundaryCondition::Dirichlet(0.4), &network.pores("bottom").unwrap()).unwrap();
/// diffusion.run().unwrap();
///
/// let d_eff = diffusion.calc_effective_diffusivity().unwrap();
/// assert!((d_eff - 0.025).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct FickianDiffusion<'a> {
    transport: GenericLinearTransport<'a>,
}

impl<'a> FickianDiffusion<'a> {
    /// Create a diffusion algorithm on `network` for `phase`
    pub fn new(network: &'a Network, phase: &'a Phase) -> Self {
        info!(algorithm = NAME, phase = phase.name(), pores = network.num_pores(), "created");
        Self {
            transport: GenericLinearTransport::named(NAME, network, phase),
        }
    }

    /// Replace the solver configuration
    pub fn with_configuration(mut self, configuration: SolverConfiguration) -> Self {
        self.transport = self.transport.with_configuration(configuration);
        self
    }

    /// Assign a boundary condition to pores
    pub fn set_boundary_conditions(&mut self, condition: BoundaryCondition, pores: &[usize]) -> Result<()> {
        self.transport.set_boundary_conditions(condition, pores)
    }

    /// Remove every boundary condition
    pub fn clear_boundary_conditions(&mut self) {
        self.transport.clear_boundary_conditions();
    }

    /// Solve for `pore.mole_fraction` using `throat.diffusive_conductance`
    pub fn run(&mut self) -> Result<()> {
        self.run_with(DEFAULT_CONDUCTANCE, DEFAULT_QUANTITY)
    }

    /// Solve with explicit conductance and quantity names
    ///
    /// Names are not checked here: a conductance missing from the phase
    /// fails the solve with `MissingProperty`. On failure the previous
    /// names and result are kept.
    pub fn run_with(&mut self, conductance: &str, quantity: &str) -> Result<()> {
        info!(algorithm = NAME, conductance, quantity, "running");

        let transport = &self.transport;
        let result = solve_linear_system(
            transport.network(),
            transport.phase(),
            transport.boundary_conditions(),
            conductance,
            quantity,
            transport.configuration(),
        )?;

        // Names are only recorded once they produced a result
        self.transport.setup(conductance, quantity);
        self.transport.store_result(result);
        Ok(())
    }

    /// Effective diffusivity of the domain \[m²/s\]
    ///
    /// Generic effective property divided by the mean molar density of the
    /// phase. The value is stored and returned.
    ///
    /// # Errors
    ///
    /// - `NotSolved` before [`run`](Self::run)
    /// - `InvalidBoundaryConditions` without two distinct Dirichlet values
    /// - `MissingProperty` / `DegenerateMolarDensity` from the phase
    pub fn calc_effective_diffusivity(&mut self) -> Result<f64> {
        let normal = self.transport.calc_eff_prop()?;
        let density = self.transport.phase().mean_molar_density()?;
        let diffusivity = normal / density;

        info!(
            algorithm = NAME,
            effective_property = normal,
            molar_density = density,
            diffusivity,
            "effective diffusivity computed"
        );

        self.transport.set_effective_property(diffusivity);
        Ok(diffusivity)
    }

    /// Last computed effective diffusivity
    pub fn effective_diffusivity(&self) -> Option<f64> {
        self.transport.effective_property()
    }

    /// Underlying generic transport
    pub fn transport(&self) -> &GenericLinearTransport<'a> {
        &self.transport
    }

    /// Result of the last run
    pub fn result(&self) -> Result<&TransportResult> {
        self.transport.result()
    }

    /// Net molar rate leaving `pores`
    pub fn rate(&self, pores: &[usize]) -> Result<f64> {
        self.transport.rate(pores)
    }

    /// Consume the algorithm and keep its result
    pub fn into_result(self) -> Result<TransportResult> {
        self.transport.into_result()
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::fixtures;
    use approx::assert_relative_eq;

    fn prepared() -> (Network, Phase) {
        fixtures::prepared().unwrap()
    }

    fn with_faces<'a>(network: &'a Network, phase: &'a Phase) -> FickianDiffusion<'a> {
        let mut diffusion = FickianDiffusion::new(network, phase);
        diffusion
            .set_boundary_conditions(BoundaryCondition::Dirichlet(0.6), &network.pores("top").unwrap())
            .unwrap();
        diffusion
            .set_boundary_conditions(BoundaryCondition::Dirichlet(0.4), &network.pores("bottom").unwrap())
            .unwrap();
        diffusion
    }

    #[test]
    fn test_default_names() {
        let (network, phase) = prepared();
        let mut diffusion = with_faces(&network, &phase);
        diffusion.run().unwrap();

        assert_eq!(diffusion.transport().conductance(), Some(DEFAULT_CONDUCTANCE));
        assert_eq!(diffusion.transport().quantity(), Some(DEFAULT_QUANTITY));
        assert_eq!(diffusion.result().unwrap().quantity_key(), "pore.mole_fraction");
    }

    #[test]
    fn test_effective_diffusivity_is_stored() {
        let (network, phase) = prepared();
        let mut diffusion = with_faces(&network, &phase);
        assert_eq!(diffusion.effective_diffusivity(), None);

        diffusion.run().unwrap();
        let value = diffusion.calc_effective_diffusivity().unwrap();

        assert_relative_eq!(value, 0.025, epsilon = 1e-12);
        assert_eq!(diffusion.effective_diffusivity(), Some(value));
    }

    #[test]
    fn test_rerun_clears_stored_value() {
        let (network, phase) = prepared();
        let mut diffusion = with_faces(&network, &phase);
        diffusion.run().unwrap();
        diffusion.calc_effective_diffusivity().unwrap();

        diffusion.run().unwrap();
        assert_eq!(diffusion.effective_diffusivity(), None);
    }

    #[test]
    fn test_normalised_by_molar_density() {
        let (network, phase) = prepared();
        let mut diffusion = with_faces(&network, &phase);
        diffusion.run().unwrap();

        let normal = diffusion.transport().calc_eff_prop().unwrap();
        let value = diffusion.calc_effective_diffusivity().unwrap();
        assert_eq!(value, normal / 40.89);
    }

    #[test]
    fn test_zero_molar_density() {
        let (network, mut phase) = prepared();
        phase.set("pore.molar_density", 0.0).unwrap();
        let mut diffusion = with_faces(&network, &phase);
        diffusion.run().unwrap();

        assert_eq!(
            diffusion.calc_effective_diffusivity(),
            Err(TransportError::DegenerateMolarDensity(0.0))
        );
        assert_eq!(diffusion.effective_diffusivity(), None);
    }

    #[test]
    fn test_custom_names() {
        let (network, mut phase) = prepared();
        phase.set("throat.custom_conductance", 1.0).unwrap();
        let mut diffusion = with_faces(&network, &phase);

        diffusion.run_with("throat.custom_conductance", "concentration").unwrap();

        let result = diffusion.into_result().unwrap();
        assert_eq!(result.conductance(), "custom_conductance");
        assert_eq!(result.quantity(), "concentration");
    }

    #[test]
    fn test_failed_run_keeps_names_and_result() {
        let (network, phase) = prepared();
        let mut diffusion = with_faces(&network, &phase);
        diffusion.run().unwrap();

        assert!(matches!(
            diffusion.run_with("nope", "mole_fraction"),
            Err(TransportError::MissingProperty(_))
        ));

        assert_eq!(diffusion.transport().conductance(), Some(DEFAULT_CONDUCTANCE));
        assert_eq!(diffusion.result().unwrap().conductance(), DEFAULT_CONDUCTANCE);

        // The generic run reuses the recorded names
        let previous = diffusion.result().unwrap().values().clone();
        diffusion.transport.run().unwrap();
        assert_eq!(diffusion.result().unwrap().values(), &previous);
    }
}
