//! Pore-scale physics
//!
//! This module holds everything physical that is attached to a network:
//! property storage, phases, geometry and conductance models.
//!
//! # Core Concepts
//!
//! - **Property store**: values keyed by `pore.<name>` / `throat.<name>`
//! - **Phase**: a fluid and its thermophysical properties
//! - **Geometry**: sizes of pores and throats
//! - **Physics**: models turning phase + geometry into throat conductances
//!
//! # Architecture
//!
//! Physics objects are **separate from transport algorithms**:
//! - Physics computes conductances and stores them on the phase
//! - Algorithms look conductances up by name and solve for a quantity
//!
//! The same algorithm therefore works with any conductance model, and the
//! same conductance can feed several algorithms.
//!
//! # Example
//!
//! ```rust
//! use pnm_rs::network::Cubic;
//! use pnm_rs::physics::{ConductanceModel, Geometry, Phase, Physics};
//!
//! let network = Cubic::new([4, 4, 4], 1.0).build().unwrap();
//!
//! let mut geometry = Geometry::new("geo", &network);
//! geometry.set("throat.area", 0.25).unwrap();
//! geometry.set("throat.length", 0.5).unwrap();
//!
//! let mut phase = Phase::new("air", &network);
//! phase.set("pore.molar_density", 40.89).unwrap();
//! phase.set("pore.diffusivity", 2.09e-5).unwrap();
//!
//! Physics::new("phys")
//!     .with_model("diffusive_conductance", ConductanceModel::BulkDiffusion)
//!     .regenerate(&network, &geometry, &mut phase)
//!     .unwrap();
//!
//! assert!(phase.properties().contains("throat.diffusive_conductance"));
//! ```

// module declaration
pub mod data;
pub mod store;
pub mod phase;
pub mod geometry;
pub mod conductance;

// re-export commonly used types for convenience
pub use data::PropertyData;
pub use store::{interpolate_to_throats, Element, PropertyKey, PropertyStore};
pub use phase::{HasDiffusivity, HasMolarDensity, Phase};
pub use geometry::Geometry;
pub use conductance::{ConductanceModel, Physics};
