//! Pore network topology
//!
//! A pore network is a graph abstraction of a porous medium: pores are the
//! nodes, throats are the edges that connect them. The [`Network`] type
//! stores only topology and spatial information (coordinates, connections,
//! labels). Everything physical lives in property stores attached to it
//! (see [`crate::physics`]).
//!
//! # Example
//!
//! ```rust
//! use pnm_rs::network::Cubic;
//!
//! let network = Cubic::new([3, 3, 3], 1e-4).build().unwrap();
//! assert_eq!(network.num_pores(), 27);
//! assert_eq!(network.num_throats(), 54);
//!
//! let top = network.pores("top").unwrap();
//! assert_eq!(top.len(), 9);
//! ```

mod cubic;

pub use cubic::Cubic;

use crate::error::{Result, TransportError};
use std::collections::BTreeMap;
use tracing::warn;

/// Label implicitly carried by every network and matching every pore
pub const ALL: &str = "all";

// =================================================================================================
// Network
// =================================================================================================

/// Topology of pores and throats
///
/// Pores are identified by their index in `coords`, throats by their index
/// in `conns`. A throat connects exactly two distinct pores.
#[derive(Debug, Clone)]
pub struct Network {
    /// Pore centre coordinates
    coords: Vec<[f64; 3]>,

    /// Throat connections (pore index pairs)
    conns: Vec<[usize; 2]>,

    /// Named pore sets, kept sorted and without duplicates
    labels: BTreeMap<String, Vec<usize>>,

    /// Lattice spacing, when the network was generated on a lattice
    spacing: Option<[f64; 3]>,
}

impl Network {
    /// Create a network from coordinates and throat connections
    ///
    /// # Errors
    ///
    /// `InvalidNetwork` when a throat references a missing pore or
    /// connects a pore to itself, or when a coordinate is not finite.
    pub fn new(coords: Vec<[f64; 3]>, conns: Vec<[usize; 2]>) -> Result<Self> {
        let num_pores = coords.len();

        if let Some(pore) = coords.iter().position(|c| c.iter().any(|x| !x.is_finite())) {
            return Err(TransportError::InvalidNetwork(format!(
                "pore {} has a non-finite coordinate",
                pore
            )));
        }

        for (throat, [a, b]) in conns.iter().enumerate() {
            if *a >= num_pores || *b >= num_pores {
                return Err(TransportError::InvalidNetwork(format!(
                    "throat {} connects pores {}-{} but the network has {} pores",
                    throat, a, b, num_pores
                )));
            }
            if a == b {
                return Err(TransportError::InvalidNetwork(format!(
                    "throat {} connects pore {} to itself",
                    throat, a
                )));
            }
        }

        Ok(Self {
            coords,
            conns,
            labels: BTreeMap::new(),
            spacing: None,
        })
    }

    /// Attach a lattice spacing, used to pad domain extents
    pub fn with_spacing(mut self, spacing: [f64; 3]) -> Self {
        self.spacing = Some(spacing);
        self
    }

    // ===================================== Query methods =========================================

    /// Number of pores
    pub fn num_pores(&self) -> usize {
        self.coords.len()
    }

    /// Number of throats
    pub fn num_throats(&self) -> usize {
        self.conns.len()
    }

    /// Pore coordinates
    pub fn coords(&self) -> &[[f64; 3]] {
        &self.coords
    }

    /// Throat connections
    pub fn conns(&self) -> &[[usize; 2]] {
        &self.conns
    }

    /// Lattice spacing, if any
    pub fn spacing(&self) -> Option<[f64; 3]> {
        self.spacing
    }

    // ========================================= Labels ============================================

    /// Tag a set of pores with a label, replacing any previous set
    pub fn set_label(&mut self, name: impl Into<String>, pores: &[usize]) -> Result<()> {
        self.check_pores(pores)?;

        let mut sorted = pores.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        self.labels.insert(name.into(), sorted);
        Ok(())
    }

    /// Pores carrying a label
    ///
    /// The label `"all"` always matches every pore.
    pub fn pores(&self, label: &str) -> Result<Vec<usize>> {
        if label == ALL {
            return Ok((0..self.num_pores()).collect());
        }

        self.labels
            .get(label)
            .cloned()
            .ok_or_else(|| TransportError::MissingLabel(label.to_string()))
    }

    /// Known labels in alphabetical order
    pub fn labels(&self) -> Vec<&str> {
        self.labels.keys().map(|name| name.as_str()).collect()
    }

    /// Ensure every index refers to an existing pore
    pub fn check_pores(&self, pores: &[usize]) -> Result<()> {
        let num_pores = self.num_pores();
        match pores.iter().find(|&&pore| pore >= num_pores) {
            Some(&pore) => Err(TransportError::PoreOutOfRange { pore, num_pores }),
            None => Ok(()),
        }
    }

    // ======================================= Adjacency ===========================================

    /// Throats attached to a pore
    pub fn throats_of(&self, pore: usize) -> Vec<usize> {
        self.conns
            .iter()
            .enumerate()
            .filter(|(_, [a, b])| *a == pore || *b == pore)
            .map(|(throat, _)| throat)
            .collect()
    }

    /// Pores sharing a throat with `pore`
    pub fn neighbor_pores(&self, pore: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = self
            .conns
            .iter()
            .filter_map(|&[a, b]| {
                if a == pore {
                    Some(b)
                } else if b == pore {
                    Some(a)
                } else {
                    None
                }
            })
            .collect();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    /// Number of throats attached to each pore
    pub fn coordination_numbers(&self) -> Vec<usize> {
        let mut counts = vec![0; self.num_pores()];
        for &[a, b] in &self.conns {
            counts[a] += 1;
            counts[b] += 1;
        }
        counts
    }

    /// Pores with no throat at all
    pub fn isolated_pores(&self) -> Vec<usize> {
        let isolated: Vec<usize> = self
            .coordination_numbers()
            .iter()
            .enumerate()
            .filter(|(_, count)| **count == 0)
            .map(|(pore, _)| pore)
            .collect();

        if !isolated.is_empty() {
            warn!(count = isolated.len(), "network contains isolated pores");
        }
        isolated
    }

    // ==================================== Domain geometry ========================================

    /// Axis along which two faces are separated
    ///
    /// Chosen as the axis with the largest difference between the mean
    /// coordinates of the two faces.
    pub fn flow_axis(&self, face_a: &[usize], face_b: &[usize]) -> Result<usize> {
        let centre_a = self.mean_coords(face_a)?;
        let centre_b = self.mean_coords(face_b)?;

        let axis = (0..3)
            .max_by(|&i, &j| {
                let di = (centre_a[i] - centre_b[i]).abs();
                let dj = (centre_a[j] - centre_b[j]).abs();
                di.total_cmp(&dj)
            })
            .unwrap_or(0);

        Ok(axis)
    }

    /// Distance between two faces along their separation axis
    pub fn domain_length(&self, face_a: &[usize], face_b: &[usize]) -> Result<f64> {
        let axis = self.flow_axis(face_a, face_b)?;
        let length = (self.mean_coords(face_a)?[axis] - self.mean_coords(face_b)?[axis]).abs();

        if length <= 0.0 {
            return Err(TransportError::InvalidNetwork(
                "faces coincide: domain length is zero".to_string(),
            ));
        }
        Ok(length)
    }

    /// Cross-sectional area of a face normal to `axis`
    ///
    /// Product of the face extents on the two transverse axes. Each extent is
    /// padded by the lattice spacing when the network has one, so a face of
    /// `n × m` lattice pores covers `n·s × m·s`.
    pub fn domain_area(&self, face: &[usize], axis: usize) -> Result<f64> {
        if axis > 2 {
            return Err(TransportError::InvalidConfiguration(format!(
                "axis {} is not a spatial axis",
                axis
            )));
        }
        self.check_pores(face)?;
        if face.is_empty() {
            return Err(TransportError::InvalidNetwork("face has no pores".to_string()));
        }

        let area: f64 = (0..3)
            .filter(|&a| a != axis)
            .map(|a| {
                let (min, max) = face.iter().map(|&p| self.coords[p][a]).fold(
                    (f64::INFINITY, f64::NEG_INFINITY),
                    |(lo, hi), x| (lo.min(x), hi.max(x)),
                );
                let padding = self.spacing.map(|s| s[a]).unwrap_or(0.0);
                max - min + padding
            })
            .product();

        if area <= 0.0 {
            return Err(TransportError::InvalidNetwork("face has zero area".to_string()));
        }
        Ok(area)
    }

    /// Centroid of a set of pores
    fn mean_coords(&self, pores: &[usize]) -> Result<[f64; 3]> {
        self.check_pores(pores)?;
        if pores.is_empty() {
            return Err(TransportError::InvalidNetwork("face has no pores".to_string()));
        }

        let mut centre = [0.0; 3];
        for &pore in pores {
            for (axis, value) in centre.iter_mut().enumerate() {
                *value += self.coords[pore][axis];
            }
        }
        let n = pores.len() as f64;
        Ok(centre.map(|value| value / n))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
