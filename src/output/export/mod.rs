//! Export of transport results to files
//!
//! | Format | Module  | Content |
//! |--------|---------|---------|
//! | CSV    | [`csv`] | pore field, throat rates |

pub mod csv;

pub use csv::{export_pore_results_csv, export_throat_rates_csv, CsvConfig, CsvMetadata};
