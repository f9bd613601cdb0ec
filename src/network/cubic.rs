//! Simple cubic lattice generator

use super::Network;
use crate::error::{Result, TransportError};
use tracing::debug;

/// Simple cubic lattice of pores
///
/// Pore `(i, j, k)` sits at `((i + ½)·sx, (j + ½)·sy, (k + ½)·sz)` and is
/// connected to its six face neighbours. Faces are labelled
/// `left`/`right` (x), `front`/`back` (y) and `bottom`/`top` (z); the
/// union of the faces is `surface`, the rest `internal`.
///
/// # Example
///
/// ```rust
/// use pnm_rs::network::Cubic;
///
/// let network = Cubic::new([5, 5, 5], 1.0).build().unwrap();
/// assert_eq!(network.pores("bottom").unwrap().len(), 25);
/// assert_eq!(network.pores("internal").unwrap().len(), 27);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    shape: [usize; 3],
    spacing: [f64; 3],
}

impl Cubic {
    /// Isotropic lattice
    pub fn new(shape: [usize; 3], spacing: f64) -> Self {
        Self::anisotropic(shape, [spacing; 3])
    }

    /// Lattice with a different spacing along each axis
    pub fn anisotropic(shape: [usize; 3], spacing: [f64; 3]) -> Self {
        Self { shape, spacing }
    }

    /// Lattice shape (pores per axis)
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Validate the lattice parameters
    pub fn validate(&self) -> Result<()> {
        if self.shape.contains(&0) {
            return Err(TransportError::InvalidConfiguration(format!(
                "cubic shape must be at least 1 along every axis, got {:?}",
                self.shape
            )));
        }
        if self.spacing.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(TransportError::InvalidConfiguration(format!(
                "cubic spacing must be positive, got {:?}",
                self.spacing
            )));
        }
        Ok(())
    }

    /// Pore index of lattice site `(i, j, k)`
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        let [nx, ny, _] = self.shape;
        i + nx * (j + ny * k)
    }

    /// Generate the network
    pub fn build(&self) -> Result<Network> {
        self.validate()?;

        let [nx, ny, nz] = self.shape;
        let [sx, sy, sz] = self.spacing;
        let num_pores = nx * ny * nz;

        let mut coords = Vec::with_capacity(num_pores);
        let mut conns = Vec::with_capacity(3 * num_pores);

        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    coords.push([
                        (i as f64 + 0.5) * sx,
                        (j as f64 + 0.5) * sy,
                        (k as f64 + 0.5) * sz,
                    ]);

                    let pore = self.index(i, j, k);
                    if i + 1 < nx {
                        conns.push([pore, self.index(i + 1, j, k)]);
                    }
                    if j + 1 < ny {
                        conns.push([pore, self.index(i, j + 1, k)]);
                    }
                    if k + 1 < nz {
                        conns.push([pore, self.index(i, j, k + 1)]);
                    }
                }
            }
        }

        let mut network = Network::new(coords, conns)?.with_spacing(self.spacing);

        let mut faces: [(&str, Vec<usize>); 6] = [
            ("left", Vec::new()),
            ("right", Vec::new()),
            ("front", Vec::new()),
            ("back", Vec::new()),
            ("bottom", Vec::new()),
            ("top", Vec::new()),
        ];
        let mut surface = Vec::new();
        let mut internal = Vec::new();

        for k in 0..nz {
            for j in 0..ny {
                for i in 0..nx {
                    let pore = self.index(i, j, k);
                    let on_face = [i == 0, i == nx - 1, j == 0, j == ny - 1, k == 0, k == nz - 1];

                    for (face, hit) in faces.iter_mut().zip(on_face) {
                        if hit {
                            face.1.push(pore);
                        }
                    }

                    if on_face.iter().any(|&hit| hit) {
                        surface.push(pore);
                    } else {
                        internal.push(pore);
                    }
                }
            }
        }

        for (name, pores) in &faces {
            network.set_label(*name, pores)?;
        }
        network.set_label("surface", &surface)?;
        network.set_label("internal", &internal)?;

        debug!(
            pores = network.num_pores(),
            throats = network.num_throats(),
            shape = ?self.shape,
            "generated cubic network"
        );

        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_counts() {
        let network = Cubic::new([5, 5, 5], 1.0).build().unwrap();
        assert_eq!(network.num_pores(), 125);
        // 3 · n² · (n - 1)
        assert_eq!(network.num_throats(), 300);
    }

    #[test]
    fn test_cubic_coordinates() {
        let cubic = Cubic::anisotropic([2, 3, 4], [1.0, 2.0, 3.0]);
        let network = cubic.build().unwrap();
        let last = cubic.index(1, 2, 3);
        assert_eq!(network.coords()[0], [0.5, 1.0, 1.5]);
        assert_eq!(network.coords()[last], [1.5, 5.0, 10.5]);
    }

    #[test]
    fn test_cubic_face_labels() {
        let network = Cubic::new([3, 4, 5], 1.0).build().unwrap();
        assert_eq!(network.pores("left").unwrap().len(), 20);
        assert_eq!(network.pores("front").unwrap().len(), 15);
        assert_eq!(network.pores("top").unwrap().len(), 12);
        assert_eq!(network.pores("internal").unwrap().len(), 6);
        assert_eq!(
            network.pores("surface").unwrap().len() + network.pores("internal").unwrap().len(),
            network.num_pores()
        );
    }

    #[test]
    fn test_cubic_neighbours() {
        let cubic = Cubic::new([3, 3, 3], 1.0);
        let network = cubic.build().unwrap();
        let centre = cubic.index(1, 1, 1);
        assert_eq!(network.neighbor_pores(centre).len(), 6);
        assert_eq!(network.neighbor_pores(0).len(), 3);
    }

    #[test]
    fn test_cubic_domain() {
        let network = Cubic::new([5, 5, 5], 1.0).build().unwrap();
        let top = network.pores("top").unwrap();
        let bottom = network.pores("bottom").unwrap();

        assert_eq!(network.flow_axis(&top, &bottom).unwrap(), 2);
        assert_eq!(network.domain_length(&top, &bottom).unwrap(), 4.0);
        assert_eq!(network.domain_area(&top, 2).unwrap(), 25.0);
    }

    #[test]
    fn test_cubic_invalid_parameters() {
        assert!(Cubic::new([0, 2, 2], 1.0).build().is_err());
        assert!(Cubic::new([2, 2, 2], -1.0).build().is_err());
        assert!(Cubic::new([2, 2, 2], f64::NAN).build().is_err());
    }

    #[test]
    fn test_single_layer_lattice() {
        let network = Cubic::new([4, 4, 1], 1.0).build().unwrap();
        assert_eq!(network.pores("top").unwrap(), network.pores("bottom").unwrap());
        assert_eq!(network.num_throats(), 24);
    }
}
