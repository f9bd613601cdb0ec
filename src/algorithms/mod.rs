//! Transport algorithms for specific physical processes
//!
//! Each algorithm is a thin layer over
//! [`GenericLinearTransport`](crate::solver::GenericLinearTransport): it
//! knows which phase properties its process reads and writes, and how to
//! turn the generic effective property into a physical coefficient.
//!
//! | Algorithm | Conductance | Quantity | Effective property |
//! |-----------|-------------|----------|--------------------|
//! | [`FickianDiffusion`] | `throat.diffusive_conductance` | `pore.mole_fraction` | diffusivity |

mod fickian;

pub use fickian::{FickianDiffusion, DEFAULT_CONDUCTANCE, DEFAULT_QUANTITY};
