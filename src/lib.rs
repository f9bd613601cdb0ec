//! pnm-rs: steady transport on pore networks
//!
//! A small pore-network-modelling framework: network topology, phase and
//! geometry property stores, conductance models, and a generic linear
//! transport solver specialised into physical processes such as Fickian
//! diffusion.
//!
//! # Architecture
//!
//! pnm-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - Physics objects compute throat conductances (what to solve)
//!    - The solver assembles and solves the linear system (how to solve)
//!
//! 2. **Thin process algorithms**
//!    - An algorithm such as [`FickianDiffusion`](algorithms::FickianDiffusion)
//!      only names its properties and post-processes the generic result
//!
//! # Quick Start
//!
//! ```rust
//! use pnm_rs::algorithms::FickianDiffusion;
//! use pnm_rs::network::Cubic;
//! use pnm_rs::physics::{ConductanceModel, Geometry, Phase, Physics};
//! use pnm_rs::solver::BoundaryCondition;
//!
//! # fn main() -> pnm_rs::error::Result<()> {
//! // 1. Network and its physical description
//! let network = Cubic::new([10, 10, 10], 1e-4).build()?;
//!
//! let mut geometry = Geometry::new("geo", &network);
//! geometry.set("throat.area", 2.5e-9)?;
//! geometry.set("throat.length", 5e-5)?;
//!
//! let mut air = Phase::new("air", &network);
//! air.set("pore.molar_density", 40.89)?;
//! air.set("pore.diffusivity", 2.09e-5)?;
//!
//! Physics::new("phys")
//!     .with_model("diffusive_conductance", ConductanceModel::BulkDiffusion)
//!     .regenerate(&network, &geometry, &mut air)?;
//!
//! // 2. Boundary conditions and solve
//! let mut diffusion = FickianDiffusion::new(&network, &air);
//! diffusion.set_boundary_conditions(BoundaryCondition::Dirichlet(0.6), &network.pores("top")?)?;
//! diffusion.set_boundary_conditions(BoundaryCondition::Dirichlet(0.4), &network.pores("bottom")?)?;
//! diffusion.run()?;
//!
//! // 3. Effective property and field
//! let d_eff = diffusion.calc_effective_diffusivity()?;
//! assert!(d_eff > 0.0);
//!
//! let result = diffusion.into_result()?;
//! result.update_phase(&mut air)?;
//! assert!(air.properties().contains("pore.mole_fraction"));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`network`]: Pore network topology and generators
//! - [`physics`]: Property stores, phases, geometry, conductance models
//! - [`solver`]: Generic linear transport (assembly, solvers, results)
//! - [`algorithms`]: Process-specific algorithms
//! - [`output`]: Result export
//! - [`fixtures`]: Reference objects for tests and demos
//!
//! # Logging
//!
//! Lifecycle events are emitted through `tracing`. The library never
//! installs a subscriber; applications choose one.

// Core modules
pub mod error;
pub mod network;
pub mod physics;
pub mod solver;
pub mod algorithms;

pub mod fixtures;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use pnm_rs::prelude::*;
    //! ```
    pub use crate::algorithms::FickianDiffusion;
    pub use crate::error::{Result, TransportError};
    pub use crate::network::{Cubic, Network};
    pub use crate::physics::{
        ConductanceModel,
        Geometry,
        HasMolarDensity,
        Phase,
        Physics,
        PropertyData,
    };
    pub use crate::solver::{
        BoundaryCondition,
        GenericLinearTransport,
        SolverConfiguration,
        SolverType,
        TransportResult,
    };
}
