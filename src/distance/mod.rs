//! Distances and arc costs.
//!
//! Provides a dense distance matrix, the geodesic distance used to fill it
//! from order coordinates, and the [`ArcCost`] seam through which the search
//! evaluates moves.

mod geodesic;
mod matrix;

pub use geodesic::{geodesic_km, great_circle_km, round_km};
pub use matrix::{DistanceMatrix, SYMMETRY_TOLERANCE};

/// Cost of travelling along the arc `from → to`.
///
/// The plain [`DistanceMatrix`] is the real objective; guided local search
/// wraps it to add arc penalties.
pub trait ArcCost {
    /// Cost of the directed arc between two nodes.
    fn arc_cost(&self, from: usize, to: usize) -> f64;

    /// Cost of the closed tour `depot → route[0] → … → route[n-1] → depot`.
    ///
    /// An empty route costs nothing.
    fn route_cost(&self, route: &[usize], depot: usize) -> f64 {
        let (Some(&first), Some(&last)) = (route.first(), route.last()) else {
            return 0.0;
        };
        let inner: f64 = route.windows(2).map(|w| self.arc_cost(w[0], w[1])).sum();
        self.arc_cost(depot, first) + inner + self.arc_cost(last, depot)
    }
}

impl<C: ArcCost + ?Sized> ArcCost for &C {
    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        (**self).arc_cost(from, to)
    }
}
