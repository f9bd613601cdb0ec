//! Pore-scale physics: conductance models
//!
//! A [`Physics`] object owns a list of named models. Regenerating it
//! evaluates every model against a geometry and a phase, and writes the
//! resulting throat values into the phase under `throat.<model name>`.
//! Transport algorithms later look those values up by name.

use super::data::PropertyData;
use super::geometry::Geometry;
use super::phase::{HasDiffusivity, HasMolarDensity, Phase};
use super::store::interpolate_to_throats;
use crate::error::{Result, TransportError};
use crate::network::Network;
use tracing::{debug, info};

/// Throat conductance models
#[derive(Debug, Clone, PartialEq)]
pub enum ConductanceModel {
    /// Diffusive conductance of a straight conduit
    ///
    /// ```text
    /// g = c · D · A / L
    /// ```
    ///
    /// with molar density `c` and diffusivity `D` averaged from the two end
    /// pores, and throat area `A` and length `L` taken from the geometry.
    BulkDiffusion,

    /// Same value for every throat
    Constant(f64),
}

impl ConductanceModel {
    /// Evaluate the model for every throat
    pub fn evaluate(&self, network: &Network, geometry: &Geometry, phase: &Phase) -> Result<PropertyData> {
        match self {
            ConductanceModel::BulkDiffusion => {
                let molar_density = interpolate_to_throats(network, &phase.molar_density()?)?;
                let diffusivity = interpolate_to_throats(network, &phase.diffusivity()?)?;
                let shape_factor = geometry.area_over_length()?;

                let conductance = match (molar_density, diffusivity) {
                    (PropertyData::Scalar(c), PropertyData::Scalar(d)) => {
                        let mut conductance = PropertyData::from_vector(shape_factor);
                        conductance.apply(|x| c * d * x);
                        conductance
                    }
                    (c, d) => {
                        let n = network.num_throats();
                        let product = c.broadcast(n).component_mul(&d.broadcast(n));
                        PropertyData::from_vector(product.component_mul(&shape_factor))
                    }
                };

                Ok(conductance)
            }

            ConductanceModel::Constant(value) => {
                if !value.is_finite() || *value < 0.0 {
                    return Err(TransportError::InvalidConfiguration(format!(
                        "constant conductance must be finite and non-negative, got {}",
                        value
                    )));
                }
                Ok(PropertyData::Scalar(*value))
            }
        }
    }
}

/// Named collection of conductance models for one phase
///
/// # Example
///
/// ```rust
/// use pnm_rs::network::Cubic;
/// use pnm_rs::physics::{ConductanceModel, Geometry, Phase, Physics};
///
/// let network = Cubic::new([3, 1, 1], 1.0).build().unwrap();
/// let geometry = Geometry::new("geo", &network);
/// let mut phase = Phase::new("air", &network);
///
/// let physics = Physics::new("phys")
///     .with_model("diffusive_conductance", ConductanceModel::Constant(2.0));
/// physics.regenerate(&network, &geometry, &mut phase).unwrap();
///
/// assert_eq!(phase.values("throat.diffusive_conductance").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Physics {
    name: String,
    models: Vec<(String, ConductanceModel)>,
}

impl Physics {
    /// Create a physics object without models
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            models: Vec::new(),
        }
    }

    /// Add (or replace) a model, builder style
    pub fn with_model(mut self, name: impl Into<String>, model: ConductanceModel) -> Self {
        self.add_model(name, model);
        self
    }

    /// Add (or replace) a model
    pub fn add_model(&mut self, name: impl Into<String>, model: ConductanceModel) {
        let name = name.into();
        match self.models.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = model,
            None => self.models.push((name, model)),
        }
    }

    /// Physics name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered models in insertion order
    pub fn models(&self) -> &[(String, ConductanceModel)] {
        &self.models
    }

    /// Evaluate every model and store the results in the phase
    ///
    /// Each model `name` produces the phase property `throat.<name>`.
    pub fn regenerate(&self, network: &Network, geometry: &Geometry, phase: &mut Phase) -> Result<()> {
        for (name, model) in &self.models {
            let values = model.evaluate(network, geometry, phase)?;
            if !values.is_finite() {
                return Err(TransportError::NumericalInstability(format!(
                    "model '{}' of physics '{}' produced non-finite conductances",
                    name, self.name
                )));
            }

            debug!(physics = %self.name, model = %name, values = %values, "evaluated conductance model");
            phase.set(&format!("throat.{}", name), values)?;
        }

        info!(physics = %self.name, phase = %phase.name(), models = self.models.len(), "regenerated physics");
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
