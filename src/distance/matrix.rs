//! Dense distance matrix.

use super::geodesic::{geodesic_km, round_km};
use super::ArcCost;
use crate::error::ValidationError;
use crate::models::Location;

/// Tolerance used when checking that `d(i, j) == d(j, i)`.
pub const SYMMETRY_TOLERANCE: f64 = 1e-6;

/// A dense n×n distance matrix stored in row-major order.
///
/// # Examples
///
/// ```
/// use u_dispatch::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 8.0],
///     vec![5.0, 0.0, 3.0],
///     vec![8.0, 3.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(1, 2), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from a flat row-major grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Fails with [`ValidationError::RaggedRow`] if any row length differs
    /// from the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ValidationError::RaggedRow {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Ok(Self { data, size })
    }

    /// Builds the geodesic distance matrix (kilometres, rounded to metres)
    /// between every pair of locations.
    pub fn from_locations(locations: &[Location]) -> Self {
        let n = locations.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = round_km(geodesic_km(&locations[i], &locations[j]));
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.first_asymmetry(tol).is_none()
    }

    /// Returns a copy with rows and columns reordered so that new node `k`
    /// is old node `order[k]`.
    ///
    /// Returns `None` unless `order` is a permutation of `0..size`.
    pub fn permuted(&self, order: &[usize]) -> Option<Self> {
        if order.len() != self.size {
            return None;
        }
        let mut seen = vec![false; self.size];
        for &k in order {
            if k >= self.size || seen[k] {
                return None;
            }
            seen[k] = true;
        }
        let mut dm = Self::new(self.size);
        for (i, &oi) in order.iter().enumerate() {
            for (j, &oj) in order.iter().enumerate() {
                dm.set(i, j, self.get(oi, oj));
            }
        }
        Some(dm)
    }

    /// Checks the structural invariants of a routing distance matrix:
    /// non-empty, finite non-negative entries, zero diagonal, symmetric.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.size == 0 {
            return Err(ValidationError::EmptyMatrix);
        }
        for from in 0..self.size {
            for to in 0..self.size {
                let value = self.get(from, to);
                if !value.is_finite() || value < 0.0 {
                    return Err(ValidationError::InvalidDistance { from, to, value });
                }
            }
            let diagonal = self.get(from, from);
            if diagonal != 0.0 {
                return Err(ValidationError::NonZeroDiagonal {
                    node: from,
                    value: diagonal,
                });
            }
        }
        match self.first_asymmetry(SYMMETRY_TOLERANCE) {
            Some((from, to)) => Err(ValidationError::AsymmetricDistance { from, to }),
            None => Ok(()),
        }
    }

    fn first_asymmetry(&self, tol: f64) -> Option<(usize, usize)> {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl ArcCost for DistanceMatrix {
    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        self.get(from, to)
    }
}
