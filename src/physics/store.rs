//! Keyed property storage
//!
//! Properties are addressed with dotted keys such as `pore.molar_density`
//! or `throat.diffusive_conductance`. The prefix names the element kind
//! the values belong to, which fixes the expected number of values.

use super::data::PropertyData;
use crate::error::{Result, TransportError};
use crate::network::Network;
use nalgebra::DVector;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =================================================================================================
// Element and key
// =================================================================================================

/// Kind of network element a property belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Pore,
    Throat,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Pore => write!(f, "pore"),
            Element::Throat => write!(f, "throat"),
        }
    }
}

/// Parsed property key: `<element>.<name>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    element: Element,
    name: String,
}

impl PropertyKey {
    /// Key of a pore property
    pub fn pore(name: impl Into<String>) -> Self {
        Self { element: Element::Pore, name: name.into() }
    }

    /// Key of a throat property
    pub fn throat(name: impl Into<String>) -> Self {
        Self { element: Element::Throat, name: name.into() }
    }

    /// Element kind
    pub fn element(&self) -> Element {
        self.element
    }

    /// Property name without the element prefix
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for PropertyKey {
    type Err = TransportError;

    fn from_str(key: &str) -> Result<Self> {
        let invalid = || TransportError::InvalidPropertyKey(key.to_string());

        let (prefix, name) = key.split_once('.').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }

        match prefix {
            "pore" => Ok(Self::pore(name)),
            "throat" => Ok(Self::throat(name)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.element, self.name)
    }
}

// =================================================================================================
// Property store
// =================================================================================================

/// Property map sized for one network
///
/// Vector-valued properties must hold exactly one value per pore or per
/// throat, according to their key prefix.
#[derive(Debug, Clone, Default)]
pub struct PropertyStore {
    num_pores: usize,
    num_throats: usize,
    values: HashMap<String, PropertyData>,
}

impl PropertyStore {
    /// Create an empty store sized for `network`
    pub fn for_network(network: &Network) -> Self {
        Self {
            num_pores: network.num_pores(),
            num_throats: network.num_throats(),
            values: HashMap::new(),
        }
    }

    /// Number of values expected for an element kind
    pub fn count(&self, element: Element) -> usize {
        match element {
            Element::Pore => self.num_pores,
            Element::Throat => self.num_throats,
        }
    }

    /// Insert or replace a property
    ///
    /// # Errors
    ///
    /// - `InvalidPropertyKey` for a malformed key
    /// - `DimensionMismatch` when a vector has the wrong length
    pub fn set(&mut self, key: &str, data: impl Into<PropertyData>) -> Result<()> {
        let parsed: PropertyKey = key.parse()?;
        let data = data.into();

        if let PropertyData::Vector(values) = &data {
            let expected = self.count(parsed.element());
            if values.len() != expected {
                return Err(TransportError::DimensionMismatch {
                    key: key.to_string(),
                    expected,
                    actual: values.len(),
                });
            }
        }

        self.values.insert(parsed.to_string(), data);
        Ok(())
    }

    /// Raw property data
    pub fn get(&self, key: &str) -> Result<&PropertyData> {
        self.values
            .get(key)
            .ok_or_else(|| TransportError::MissingProperty(key.to_string()))
    }

    /// Property expanded to one value per element
    pub fn values(&self, key: &str) -> Result<DVector<f64>> {
        let parsed: PropertyKey = key.parse()?;
        let data = self.get(key)?;
        Ok(data.broadcast(self.count(parsed.element())))
    }

    /// Check for a key
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove a property, returning it if present
    pub fn remove(&mut self, key: &str) -> Option<PropertyData> {
        self.values.remove(key)
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.values.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of stored properties
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Map pore values onto throats by averaging the two end pores
///
/// Uniform data stays uniform.
pub fn interpolate_to_throats(network: &Network, pore_values: &PropertyData) -> Result<PropertyData> {
    match pore_values {
        PropertyData::Scalar(value) => Ok(PropertyData::Scalar(*value)),
        PropertyData::Vector(values) => {
            if values.len() != network.num_pores() {
                return Err(TransportError::DimensionMismatch {
                    key: "pore values".to_string(),
                    expected: network.num_pores(),
                    actual: values.len(),
                });
            }

            let throat_values = network
                .conns()
                .iter()
                .map(|&[a, b]| 0.5 * (values[a] + values[b]))
                .collect();
            Ok(PropertyData::from_vec(throat_values))
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================
