//! Boundary conditions for linear transport
//!
//! # Design
//!
//! Each pore carries at most one condition. Assigning a condition to a pore
//! that already has one replaces it, so boundary conditions can be layered:
//! set a face first, then override a few pores of it.

use crate::error::{Result, TransportError};
use crate::network::Network;
use std::collections::BTreeMap;
use std::fmt;

// =================================================================================================
// Boundary Condition
// =================================================================================================

/// Condition imposed on a pore
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryCondition {
    /// Fixed value of the solved quantity
    Dirichlet(f64),

    /// Fixed net rate entering the network at the pore
    ///
    /// Positive values inject, negative values withdraw.
    Neumann(f64),
}

impl BoundaryCondition {
    /// Prescribed value
    pub fn value(&self) -> f64 {
        match self {
            BoundaryCondition::Dirichlet(value) | BoundaryCondition::Neumann(value) => *value,
        }
    }

    /// Check the condition is a Dirichlet condition
    pub fn is_dirichlet(&self) -> bool {
        matches!(self, BoundaryCondition::Dirichlet(_))
    }

    /// Validate the prescribed value
    pub fn validate(&self) -> Result<()> {
        if !self.value().is_finite() {
            return Err(TransportError::InvalidBoundaryConditions(format!(
                "{} value must be finite",
                self
            )));
        }
        Ok(())
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoundaryCondition::Dirichlet(value) => write!(f, "Dirichlet ({})", value),
            BoundaryCondition::Neumann(value) => write!(f, "Neumann ({})", value),
        }
    }
}

// =================================================================================================
// Boundary Conditions
// =================================================================================================

/// Pores of the two Dirichlet faces used for effective properties
#[derive(Debug, Clone, PartialEq)]
pub struct DirichletFaces {
    /// Pores held at the highest Dirichlet value
    pub inlets: Vec<usize>,

    /// Pores held at the lowest Dirichlet value
    pub outlets: Vec<usize>,

    /// Highest Dirichlet value
    pub high: f64,

    /// Lowest Dirichlet value
    pub low: f64,
}

/// Boundary conditions of one transport algorithm
///
/// # Examples
///
/// ```rust
/// use pnm_rs::network::Cubic;
/// use pnm_rs::solver::{BoundaryCondition, BoundaryConditions};
///
/// let network = Cubic::new([3, 3, 3], 1.0).build().unwrap();
/// let mut bcs = BoundaryConditions::new();
///
/// bcs.set(&network, BoundaryCondition::Dirichlet(0.6), &network.pores("top").unwrap()).unwrap();
/// bcs.set(&network, BoundaryCondition::Dirichlet(0.4), &network.pores("bottom").unwrap()).unwrap();
///
/// assert_eq!(bcs.len(), 18);
/// assert!(bcs.has_dirichlet());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryConditions {
    conditions: BTreeMap<usize, BoundaryCondition>,
}

impl BoundaryConditions {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a condition to pores, replacing previous assignments
    ///
    /// # Errors
    ///
    /// - `InvalidBoundaryConditions` for an empty pore list or a non-finite value
    /// - `PoreOutOfRange` for an unknown pore
    pub fn set(&mut self, network: &Network, condition: BoundaryCondition, pores: &[usize]) -> Result<()> {
        condition.validate()?;
        if pores.is_empty() {
            return Err(TransportError::InvalidBoundaryConditions(format!(
                "{} applied to an empty set of pores",
                condition
            )));
        }
        network.check_pores(pores)?;

        for &pore in pores {
            self.conditions.insert(pore, condition);
        }
        Ok(())
    }

    /// Remove every condition
    pub fn clear(&mut self) {
        self.conditions.clear();
    }

    /// Remove the conditions of some pores
    pub fn clear_pores(&mut self, pores: &[usize]) {
        for pore in pores {
            self.conditions.remove(pore);
        }
    }

    /// Condition of a pore
    pub fn get(&self, pore: usize) -> Option<BoundaryCondition> {
        self.conditions.get(&pore).copied()
    }

    /// Dirichlet value of a pore, if it has one
    pub fn dirichlet_value(&self, pore: usize) -> Option<f64> {
        match self.get(pore) {
            Some(BoundaryCondition::Dirichlet(value)) => Some(value),
            _ => None,
        }
    }

    /// Iterate over `(pore, condition)` in pore order
    pub fn iter(&self) -> impl Iterator<Item = (usize, BoundaryCondition)> + '_ {
        self.conditions.iter().map(|(pore, condition)| (*pore, *condition))
    }

    /// Pores with a Dirichlet condition
    pub fn dirichlet_pores(&self) -> Vec<usize> {
        self.iter()
            .filter(|(_, condition)| condition.is_dirichlet())
            .map(|(pore, _)| pore)
            .collect()
    }

    /// At least one Dirichlet condition is set
    pub fn has_dirichlet(&self) -> bool {
        self.conditions.values().any(|condition| condition.is_dirichlet())
    }

    /// Number of constrained pores
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Verify if there are no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Check every constrained pore exists in `network`
    pub fn validate(&self, network: &Network) -> Result<()> {
        let pores: Vec<usize> = self.conditions.keys().copied().collect();
        network.check_pores(&pores)
    }

    /// Split Dirichlet pores into the highest-valued and lowest-valued faces
    ///
    /// Pores held at intermediate values belong to neither face.
    ///
    /// # Errors
    ///
    /// `InvalidBoundaryConditions` unless at least two distinct Dirichlet
    /// values are set.
    pub fn dirichlet_faces(&self) -> Result<DirichletFaces> {
        let fixed: Vec<(usize, f64)> = self
            .iter()
            .filter_map(|(pore, condition)| match condition {
                BoundaryCondition::Dirichlet(value) => Some((pore, value)),
                BoundaryCondition::Neumann(_) => None,
            })
            .collect();

        let high = fixed.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        let low = fixed.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);

        if fixed.is_empty() || high == low {
            return Err(TransportError::InvalidBoundaryConditions(
                "effective properties need Dirichlet conditions with two distinct values".to_string(),
            ));
        }

        let face = |target: f64| -> Vec<usize> {
            fixed
                .iter()
                .filter(|(_, value)| *value == target)
                .map(|(pore, _)| *pore)
                .collect()
        };

        Ok(DirichletFaces {
            inlets: face(high),
            outlets: face(low),
            high,
            low,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
