//! Output of transport results
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use pnm_rs::output::export::{export_pore_results_csv, CsvConfig};
//!
//! let result = diffusion.into_result()?;
//! export_pore_results_csv(&network, &result, "mole_fraction.csv", None)?;
//! ```
//!
//! Export functions take the network for coordinates and a
//! [`TransportResult`](crate::solver::TransportResult) for values, so any
//! algorithm's output can be written the same way.

pub mod export;

// Re-export commonly used items for convenience
pub use export::{export_pore_results_csv, export_throat_rates_csv, CsvConfig, CsvMetadata};
