//! Pore and throat geometry

use super::data::PropertyData;
use super::store::PropertyStore;
use crate::error::{Result, TransportError};
use crate::network::Network;
use nalgebra::DVector;

/// Key of the pore diameter property
pub const PORE_DIAMETER: &str = "pore.diameter";

/// Key of the throat diameter property
pub const THROAT_DIAMETER: &str = "throat.diameter";

/// Key of the throat length property
pub const THROAT_LENGTH: &str = "throat.length";

/// Key of the throat cross-sectional area property
pub const THROAT_AREA: &str = "throat.area";

/// Geometric properties of pores and throats
///
/// # Example
///
/// ```rust
/// use pnm_rs::network::Cubic;
/// use pnm_rs::physics::Geometry;
///
/// let network = Cubic::new([3, 1, 1], 1.0).build().unwrap();
/// let mut geometry = Geometry::new("geo", &network);
/// geometry.set("throat.area", 0.25).unwrap();
/// geometry.set("throat.length", vec![0.5, 0.25]).unwrap();
///
/// let ratio = geometry.area_over_length().unwrap();
/// assert_eq!(ratio.as_slice(), &[0.5, 1.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Geometry {
    name: String,
    properties: PropertyStore,
}

impl Geometry {
    /// Create an empty geometry sized for `network`
    pub fn new(name: impl Into<String>, network: &Network) -> Self {
        Self {
            name: name.into(),
            properties: PropertyStore::for_network(network),
        }
    }

    /// Geometry name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set a property
    pub fn set(&mut self, key: &str, data: impl Into<PropertyData>) -> Result<()> {
        self.properties.set(key, data)
    }

    /// Property expanded to one value per element
    pub fn values(&self, key: &str) -> Result<DVector<f64>> {
        self.properties.values(key)
    }

    /// Underlying store
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    /// Throat area divided by throat length, per throat
    ///
    /// # Errors
    ///
    /// `MissingProperty` when either property is absent, and
    /// `InvalidConfiguration` when a throat length is not strictly positive.
    pub fn area_over_length(&self) -> Result<DVector<f64>> {
        let area = self.values(THROAT_AREA)?;
        let length = self.values(THROAT_LENGTH)?;

        if let Some(throat) = length.iter().position(|l| !l.is_finite() || *l <= 0.0) {
            return Err(TransportError::InvalidConfiguration(format!(
                "throat {} of geometry '{}' has non-positive length {}",
                throat, self.name, length[throat]
            )));
        }

        Ok(area.component_div(&length))
    }
}
