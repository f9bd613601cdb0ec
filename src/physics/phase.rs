//! Phases and the capability traits transport algorithms read them through

use super::data::PropertyData;
use super::store::PropertyStore;
use crate::error::{Result, TransportError};
use crate::network::Network;
use nalgebra::DVector;
use tracing::debug;

/// Key of the molar density property
pub const MOLAR_DENSITY: &str = "pore.molar_density";

/// Key of the binary diffusion coefficient property
pub const DIFFUSIVITY: &str = "pore.diffusivity";

// =================================================================================================
// Capability traits
// =================================================================================================

/// Access to a phase's molar density
///
/// Algorithms that normalise by molar density depend on this trait rather
/// than on a string lookup, so a missing property is reported here, at the
/// boundary, instead of deep inside numerical code.
pub trait HasMolarDensity {
    /// Molar density per pore \[mol/m³\]
    fn molar_density(&self) -> Result<PropertyData>;

    /// Arithmetic mean of the molar density over all pores
    ///
    /// # Errors
    ///
    /// - `MissingProperty` when the phase has no molar density
    /// - `DegenerateMolarDensity` when the mean is zero or not finite
    fn mean_molar_density(&self) -> Result<f64> {
        let mean = self.molar_density()?.mean();
        if !mean.is_finite() || mean == 0.0 {
            return Err(TransportError::DegenerateMolarDensity(mean));
        }
        Ok(mean)
    }
}

/// Access to a phase's diffusion coefficient
pub trait HasDiffusivity {
    /// Diffusion coefficient per pore \[m²/s\]
    fn diffusivity(&self) -> Result<PropertyData>;
}

// =================================================================================================
// Phase
// =================================================================================================

/// A fluid phase occupying the network
///
/// Holds thermophysical pore properties and the throat conductances that
/// physics objects compute for it.
///
/// # Example
///
/// ```rust
/// use pnm_rs::network::Cubic;
/// use pnm_rs::physics::{Phase, HasMolarDensity};
///
/// let network = Cubic::new([2, 2, 2], 1.0).build().unwrap();
/// let mut phase = Phase::new("air", &network);
/// phase.set("pore.molar_density", 40.89).unwrap();
///
/// assert_eq!(phase.mean_molar_density().unwrap(), 40.89);
/// ```
#[derive(Debug, Clone)]
pub struct Phase {
    name: String,
    properties: PropertyStore,
}

impl Phase {
    /// Create an empty phase sized for `network`
    pub fn new(name: impl Into<String>, network: &Network) -> Self {
        let name = name.into();
        debug!(phase = %name, pores = network.num_pores(), "created phase");

        Self {
            name,
            properties: PropertyStore::for_network(network),
        }
    }

    /// Phase name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a property
    pub fn set(&mut self, key: &str, data: impl Into<PropertyData>) -> Result<()> {
        self.properties.set(key, data)
    }

    /// Raw property data
    pub fn get(&self, key: &str) -> Result<&PropertyData> {
        self.properties.get(key)
    }

    /// Property expanded to one value per element
    pub fn values(&self, key: &str) -> Result<DVector<f64>> {
        self.properties.values(key)
    }

    /// Underlying store
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Mutable underlying store
    pub fn properties_mut(&mut self) -> &mut PropertyStore {
        &mut self.properties
    }
}

impl HasMolarDensity for Phase {
    fn molar_density(&self) -> Result<PropertyData> {
        self.get(MOLAR_DENSITY).cloned()
    }
}

impl HasDiffusivity for Phase {
    fn diffusivity(&self) -> Result<PropertyData> {
        self.get(DIFFUSIVITY).cloned()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
