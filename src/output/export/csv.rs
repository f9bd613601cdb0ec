//! CSV export of transport results
//!
//! Files open in spreadsheets, pandas or any tool reading delimited text.
//!
//! # Pore field
//!
//! ```rust,ignore
//! use pnm_rs::output::export::{export_pore_results_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_result("FickianDiffusion", &result);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_pore_results_csv(&network, &result, "field.csv", Some(&config))?;
//! ```
//!
//! **Output** (`field.csv`):
//! ```csv
//! # Pore Network Transport Data
//! # Generated: 2026-10-19T15:30:00+00:00
//! # Algorithm: FickianDiffusion
//! # Solver: LU decomposition
//! # Conductance: diffusive_conductance
//! # Quantity: mole_fraction
//! # Pores: 125
//! # Throats: 300
//! #
//! pore,x,y,z,mole_fraction
//! 0,0.500000,0.500000,0.500000,0.400000
//! ...
//! ```
//!
//! # Throat rates
//!
//! `throat,pore1,pore2,conductance,rate`, with the rate counted positive
//! from `pore1` to `pore2`.

use crate::network::Network;
use crate::solver::TransportResult;
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use pnm_rs::output::CsvConfig;
///
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.decimal_separator, '.');
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the value column (default: the result's quantity name)
    pub quantity_header: Option<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            quantity_header: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.delimiter == self.decimal_separator {
            return Err(format!(
                "Delimiter and decimal separator are both '{}'",
                self.delimiter
            )
            .into());
        }
        Ok(())
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set are written.
#[derive(Clone, Debug, Default)]
pub struct CsvMetadata {
    /// Algorithm name (e.g. "FickianDiffusion")
    pub algorithm: Option<String>,

    /// Linear solver name
    pub solver: Option<String>,

    /// Conductance property name
    pub conductance: Option<String>,

    /// Solved quantity name
    pub quantity: Option<String>,

    /// Number of pores
    pub pores: Option<usize>,

    /// Number of throats
    pub throats: Option<usize>,

    /// Effective property computed from the field
    pub effective_property: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Collect metadata recorded on a transport result
    pub fn from_result(algorithm: &str, result: &TransportResult) -> Self {
        Self {
            algorithm: Some(algorithm.to_string()),
            solver: result.metadata("solver").map(str::to_string),
            conductance: Some(result.conductance().to_string()),
            quantity: Some(result.quantity().to_string()),
            pores: Some(result.values().len()),
            throats: Some(result.throat_conductance().len()),
            ..Default::default()
        }
    }

    /// Builder pattern: set the effective property
    pub fn effective_property(mut self, value: f64) -> Self {
        self.effective_property = Some(value);
        self
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(writer, "# Pore Network Transport Data")?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(algorithm) = &metadata.algorithm {
        writeln!(writer, "# Algorithm: {}", algorithm)?;
    }
    if let Some(solver) = &metadata.solver {
        writeln!(writer, "# Solver: {}", solver)?;
    }
    if let Some(conductance) = &metadata.conductance {
        writeln!(writer, "# Conductance: {}", conductance)?;
    }
    if let Some(quantity) = &metadata.quantity {
        writeln!(writer, "# Quantity: {}", quantity)?;
    }
    if let Some(pores) = metadata.pores {
        writeln!(writer, "# Pores: {}", pores)?;
    }
    if let Some(throats) = metadata.throats {
        writeln!(writer, "# Throats: {}", throats)?;
    }
    if let Some(value) = metadata.effective_property {
        writeln!(writer, "# Effective Property: {}", value)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Check the result belongs to `network` and holds finite values
fn validate_result(network: &Network, result: &TransportResult) -> Result<(), Box<dyn Error>> {
    if result.values().len() != network.num_pores() {
        return Err(format!(
            "Data length mismatch: {} values for {} pores",
            result.values().len(),
            network.num_pores()
        )
        .into());
    }
    if result.throat_conductance().len() != network.num_throats() {
        return Err(format!(
            "Data length mismatch: {} conductances for {} throats",
            result.throat_conductance().len(),
            network.num_throats()
        )
        .into());
    }
    if result.values().iter().any(|x| !x.is_finite()) {
        return Err(format!("Invalid data: NaN or Inf detected in {}", result.quantity()).into());
    }
    Ok(())
}

fn open(path: &Path, config: &CsvConfig) -> Result<BufWriter<File>, Box<dyn Error>> {
    let mut writer = BufWriter::new(File::create(path)?);
    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(&mut writer, metadata)?;
        }
    }
    Ok(writer)
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export the solved pore field
///
/// One row per pore: index, coordinates, value.
///
/// # Errors
///
/// - Result and network sizes differ
/// - NaN or Inf values
/// - Delimiter equal to the decimal separator
/// - File creation or write errors
pub fn export_pore_results_csv(
    network: &Network,
    result: &TransportResult,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {

    // ============================= Validation =============================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    configuration.validate()?;
    validate_result(network, result)?;

    // ============================= Write ==================================

    let path = output_path.as_ref();
    let mut writer = open(path, configuration)?;
    let d = configuration.delimiter;

    let header = configuration
        .quantity_header
        .clone()
        .unwrap_or_else(|| result.quantity().to_string());
    writeln!(writer, "pore{d}x{d}y{d}z{d}{}", header)?;

    for (pore, (coords, value)) in network.coords().iter().zip(result.values().iter()).enumerate() {
        writeln!(
            writer,
            "{}{d}{}{d}{}{d}{}{d}{}",
            pore,
            format_number(coords[0], configuration),
            format_number(coords[1], configuration),
            format_number(coords[2], configuration),
            format_number(*value, configuration),
        )?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = network.num_pores(), "pore results exported");
    Ok(())
}

/// Export the rate through every throat
///
/// # Errors
///
/// Same as [`export_pore_results_csv`].
pub fn export_throat_rates_csv(
    network: &Network,
    result: &TransportResult,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);
    configuration.validate()?;
    validate_result(network, result)?;

    let path = output_path.as_ref();
    let mut writer = open(path, configuration)?;
    let d = configuration.delimiter;

    writeln!(writer, "throat{d}pore1{d}pore2{d}conductance{d}rate")?;

    let rates = result.throat_rates(network);
    for (throat, &[a, b]) in network.conns().iter().enumerate() {
        writeln!(
            writer,
            "{}{d}{}{d}{}{d}{}{d}{}",
            throat,
            a,
            b,
            format_number(result.throat_conductance()[throat], configuration),
            format_number(rates[throat], configuration),
        )?;
    }
    writer.flush()?;

    info!(path = %path.display(), rows = network.num_throats(), "throat rates exported");
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{BoundaryCondition, BoundaryConditions};
    use nalgebra::DVector;
    use std::fs;
    use tempfile::NamedTempFile;

    fn chain() -> (Network, TransportResult) {
        let coords = vec![[0.5, 0.5, 0.5], [1.5, 0.5, 0.5], [2.5, 0.5, 0.5]];
        let network = Network::new(coords, vec![[0, 1], [1, 2]]).unwrap();

        let mut bcs = BoundaryConditions::new();
        bcs.set(&network, BoundaryCondition::Dirichlet(1.0), &[0]).unwrap();
        bcs.set(&network, BoundaryCondition::Dirichlet(0.0), &[2]).unwrap();

        let mut result = TransportResult::new(
            "mole_fraction",
            "diffusive_conductance",
            DVector::from_vec(vec![1.0, 0.5, 0.0]),
            DVector::from_element(2, 2.0),
            bcs,
        );
        result.add_metadata("solver", "LU decomposition");
        (network, result)
    }

    // ====== Pore field ======

    #[test]
    fn test_pore_results_minimal() {
        let (network, result) = chain();
        let file = NamedTempFile::new().unwrap();

        export_pore_results_csv(&network, &result, file.path(), None).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "pore,x,y,z,mole_fraction");
        assert_eq!(lines[2], "1,1.500000,0.500000,0.500000,0.500000");
    }

    #[test]
    fn test_pore_results_with_metadata() {
        let (network, result) = chain();
        let file = NamedTempFile::new().unwrap();

        let metadata = CsvMetadata::from_result("FickianDiffusion", &result).effective_property(0.025);
        let config = CsvConfig::default().with_metadata(metadata);
        export_pore_results_csv(&network, &result, file.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("# Pore Network Transport Data"));
        assert!(content.contains("# Generated: "));
        assert!(content.contains("# Algorithm: FickianDiffusion"));
        assert!(content.contains("# Solver: LU decomposition"));
        assert!(content.contains("# Effective Property: 0.025"));
        assert!(content.contains("#\npore,x,y,z,mole_fraction"));
    }

    #[test]
    fn test_european_format() {
        let (network, result) = chain();
        let file = NamedTempFile::new().unwrap();

        let config = CsvConfig {
            quantity_header: Some("x_A".to_string()),
            precision: 2,
            ..CsvConfig::european()
        };
        export_pore_results_csv(&network, &result, file.path(), Some(&config)).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "pore;x;y;z;x_A");
        assert_eq!(lines[1], "0;0,50;0,50;0,50;1,00");
    }

    #[test]
    fn test_conflicting_separators_rejected() {
        let (network, result) = chain();
        let file = NamedTempFile::new().unwrap();
        let config = CsvConfig::european().delimiter(',');

        assert!(export_pore_results_csv(&network, &result, file.path(), Some(&config)).is_err());
    }

    #[test]
    fn test_result_from_other_network_rejected() {
        let (_, result) = chain();
        let other = Network::new(vec![[0.0; 3], [1.0, 0.0, 0.0]], vec![[0, 1]]).unwrap();
        let file = NamedTempFile::new().unwrap();

        let error = export_pore_results_csv(&other, &result, file.path(), None).unwrap_err();
        assert!(error.to_string().contains("mismatch"));
    }

    #[test]
    fn test_invalid_path() {
        let (network, result) = chain();
        let path = std::env::temp_dir().join("missing_dir_for_export").join("out.csv");

        assert!(export_pore_results_csv(&network, &result, path, None).is_err());
    }

    // ====== Throat rates ======

    #[test]
    fn test_throat_rates() {
        let (network, result) = chain();
        let file = NamedTempFile::new().unwrap();

        export_throat_rates_csv(&network, &result, file.path(), Some(&CsvConfig::default().precision(1))).unwrap();

        let content = fs::read_to_string(file.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "throat,pore1,pore2,conductance,rate");
        assert_eq!(lines[1], "0,0,1,2.0,1.0");
        assert_eq!(lines[2], "1,1,2,2.0,1.0");
    }
}
