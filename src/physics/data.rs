//! Property data types
//!
//! A property of a pore network is either uniform over all elements
//! (one scalar) or varies element by element (one value per pore or per
//! throat). Storing uniform properties as a single scalar keeps phases
//! compact and makes "uniform" an explicit, queryable fact.

use nalgebra::DVector;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Property values attached to pores or throats
///
/// # Storage Types
///
/// - **Scalar**: one value shared by every element
/// - **Vector**: one value per element
///
/// # Examples
///
/// ```rust
/// use pnm_rs::physics::PropertyData;
///
/// let temperature = PropertyData::from_scalar(298.0);
/// assert_eq!(temperature.broadcast(3).as_slice(), &[298.0, 298.0, 298.0]);
///
/// let diameter = PropertyData::from_vec(vec![1.0, 2.0, 3.0]);
/// assert_eq!(diameter.mean(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyData {
    /// Uniform value
    Scalar(f64),

    /// Per-element values
    Vector(DVector<f64>),
}

impl PropertyData {

    // ======================================= constructors =======================================

    /// Create from scalar
    pub fn from_scalar(value: f64) -> Self {
        Self::Scalar(value)
    }

    /// Create from vector
    pub fn from_vec(values: Vec<f64>) -> Self {
        Self::Vector(DVector::from_vec(values))
    }

    /// Create from DVector
    pub fn from_vector(values: DVector<f64>) -> Self {
        Self::Vector(values)
    }

    /// Create uniform vector
    pub fn uniform_vector(size: usize, value: f64) -> Self {
        Self::Vector(DVector::from_element(size, value))
    }

    // ========================================== Queries ==========================================

    /// Check data is scalar
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// Check data is a vector
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Number of stored values (1 for a scalar)
    pub fn len(&self) -> usize {
        match self {
            PropertyData::Scalar(_) => 1,
            PropertyData::Vector(v) => v.len(),
        }
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every value is finite
    pub fn is_finite(&self) -> bool {
        match self {
            PropertyData::Scalar(x) => x.is_finite(),
            PropertyData::Vector(v) => v.iter().all(|x| x.is_finite()),
        }
    }

    /// Arithmetic mean
    ///
    /// Returns NaN for an empty vector.
    pub fn mean(&self) -> f64 {
        match self {
            PropertyData::Scalar(x) => *x,
            PropertyData::Vector(v) if v.is_empty() => f64::NAN,
            PropertyData::Vector(v) => v.sum() / v.len() as f64,
        }
    }

    // ======================================== Extractions ========================================

    /// Try to extract as a scalar
    pub fn try_as_scalar(&self) -> Option<f64> {
        match self {
            PropertyData::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    /// Try to extract as a DVector
    pub fn try_as_vector(&self) -> Option<&DVector<f64>> {
        match self {
            PropertyData::Vector(value) => Some(value),
            _ => None,
        }
    }

    /// Expand to `size` values
    ///
    /// A scalar is repeated; a vector is returned as is (the caller is
    /// responsible for checking its length).
    pub fn broadcast(&self, size: usize) -> DVector<f64> {
        match self {
            PropertyData::Scalar(value) => DVector::from_element(size, *value),
            PropertyData::Vector(values) => values.clone(),
        }
    }

    // ====================================== Apply functions ======================================

    /// Apply a function f to every value
    ///
    /// Vectors larger than [`crate::solver::parallel_threshold()`] are
    /// processed with Rayon when the `parallel` feature is enabled.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(f64) -> f64 + Sync + Send,
    {
        match self {
            PropertyData::Scalar(value) => *value = f(*value),

            PropertyData::Vector(values) => {
                if values.len() > crate::solver::parallel_threshold() {
                    #[cfg(feature = "parallel")]
                    values.as_mut_slice().par_iter_mut().for_each(|x| *x = f(*x));
                    #[cfg(not(feature = "parallel"))]
                    values.iter_mut().for_each(|x| *x = f(*x));
                } else {
                    values.iter_mut().for_each(|x| *x = f(*x));
                }
            }
        }
    }
}

impl From<f64> for PropertyData {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for PropertyData {
    fn from(values: Vec<f64>) -> Self {
        Self::from_vec(values)
    }
}

impl From<DVector<f64>> for PropertyData {
    fn from(values: DVector<f64>) -> Self {
        Self::Vector(values)
    }
}

// ================================== Simple arithmetic functions ==================================

impl std::ops::Mul<f64> for PropertyData {
    type Output = PropertyData;
    fn mul(self, scalar: f64) -> Self::Output {
        match self {
            PropertyData::Scalar(x) => PropertyData::Scalar(x * scalar),
            PropertyData::Vector(x) => PropertyData::Vector(x * scalar),
        }
    }
}

// ======================== Display ============================

impl fmt::Display for PropertyData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyData::Scalar(value) => write!(f, "Scalar ({})", value),
            PropertyData::Vector(value) => write!(f, "Vector [{}]", value.len()),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar() {
        let data = PropertyData::Scalar(42.0);
        assert!(data.is_scalar());
        assert_eq!(data.len(), 1);
        assert_eq!(data.mean(), 42.0);
        assert_eq!(data.try_as_scalar(), Some(42.0));
        assert!(data.try_as_vector().is_none());
    }

    #[test]
    fn test_vector() {
        let data = PropertyData::uniform_vector(100, 1.0);
        assert!(data.is_vector());
        assert_eq!(data.len(), 100);
        assert_eq!(data.mean(), 1.0);
    }

    #[test]
    fn test_empty_vector_mean_is_nan() {
        let data = PropertyData::from_vec(vec![]);
        assert!(data.is_empty());
        assert!(data.mean().is_nan());
    }

    #[test]
    fn test_broadcast() {
        let scalar = PropertyData::from_scalar(2.0);
        assert_eq!(scalar.broadcast(4), DVector::from_element(4, 2.0));

        let vector = PropertyData::from_vec(vec![1.0, 2.0]);
        assert_eq!(vector.broadcast(2).as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_apply() {
        let mut data = PropertyData::from_vec(vec![1.0, 2.0, 3.0]);
        data.apply(|x| 2.0 * x);
        assert_eq!(data, PropertyData::from_vec(vec![2.0, 4.0, 6.0]));

        let mut scalar = PropertyData::from_scalar(3.0);
        scalar.apply(|x| x * x);
        assert_eq!(scalar, PropertyData::Scalar(9.0));
    }

    #[test]
    fn test_apply_above_threshold() {
        let _guard = crate::solver::ThresholdGuard::save(10);
        let mut data = PropertyData::uniform_vector(50, 1.0);
        data.apply(|x| x + 1.0);
        assert_eq!(data.mean(), 2.0);
    }

    #[test]
    fn test_finite() {
        assert!(PropertyData::from_vec(vec![1.0, 2.0]).is_finite());
        assert!(!PropertyData::from_vec(vec![1.0, f64::INFINITY]).is_finite());
        assert!(!PropertyData::Scalar(f64::NAN).is_finite());
    }

    #[test]
    fn test_multiplication() {
        let data = PropertyData::uniform_vector(10, 2.0);
        let result = data * 3.0;
        assert_eq!(result.try_as_vector().unwrap()[0], 6.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(PropertyData::Scalar(1.5).to_string(), "Scalar (1.5)");
        assert_eq!(PropertyData::uniform_vector(3, 0.0).to_string(), "Vector [3]");
    }
}
