//! Reference objects for tests, benchmarks and demos
//!
//! A 5 × 5 × 5 cubic network with unit spacing, a uniform geometry, an
//! air-like phase and a bulk-diffusion physics. With Dirichlet values 0.6
//! and 0.4 on the `top` and `bottom` faces, Fickian diffusion on these
//! objects gives an effective diffusivity of 0.025.

use crate::error::Result;
use crate::network::{Cubic, Network};
use crate::physics::geometry::{PORE_DIAMETER, THROAT_AREA, THROAT_DIAMETER, THROAT_LENGTH};
use crate::physics::phase::{DIFFUSIVITY, MOLAR_DENSITY};
use crate::physics::{ConductanceModel, Geometry, Phase, Physics};

/// Side of the reference lattice
pub const SHAPE: [usize; 3] = [5, 5, 5];

/// Molar density of the reference phase \[mol/m³\]
pub const MOLAR_DENSITY_VALUE: f64 = 40.89;

/// Diffusivity of the reference phase \[m²/s\]
pub const DIFFUSIVITY_VALUE: f64 = 0.05;

/// 5 × 5 × 5 cubic network with unit spacing
pub fn test_network() -> Result<Network> {
    cubic_network(SHAPE)
}

/// Cubic network of any shape with unit spacing
pub fn cubic_network(shape: [usize; 3]) -> Result<Network> {
    Cubic::new(shape, 1.0).build()
}

/// Uniform geometry: pores of diameter 0.5, square throats of side 0.5 and
/// length 0.5
pub fn test_geometry(network: &Network) -> Result<Geometry> {
    let mut geometry = Geometry::new("test_geometry", network);
    geometry.set(PORE_DIAMETER, 0.5)?;
    geometry.set(THROAT_DIAMETER, 0.5)?;
    geometry.set(THROAT_AREA, 0.25)?;
    geometry.set(THROAT_LENGTH, 0.5)?;
    Ok(geometry)
}

/// Air-like phase at 298 K and atmospheric pressure
pub fn test_phase(network: &Network) -> Result<Phase> {
    let mut phase = Phase::new("test_phase", network);
    phase.set("pore.temperature", 298.0)?;
    phase.set("pore.pressure", 101_325.0)?;
    phase.set(MOLAR_DENSITY, MOLAR_DENSITY_VALUE)?;
    phase.set(DIFFUSIVITY, DIFFUSIVITY_VALUE)?;
    Ok(phase)
}

/// Bulk-diffusion physics writing `throat.diffusive_conductance`
pub fn test_physics() -> Physics {
    Physics::new("test_physics").with_model("diffusive_conductance", ConductanceModel::BulkDiffusion)
}

/// Network and phase with conductances already computed
pub fn prepared() -> Result<(Network, Phase)> {
    let network = test_network()?;
    let geometry = test_geometry(&network)?;
    let mut phase = test_phase(&network)?;
    test_physics().regenerate(&network, &geometry, &mut phase)?;
    Ok((network, phase))
}
