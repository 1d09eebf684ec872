//! Extracted truck routes.

/// One customer stop on an extracted route.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Node visited.
    pub node: usize,
    /// Cumulative load after serving this node.
    pub load_after: f64,
}

/// The route one truck drives, as read back from an assignment.
///
/// The depot legs are implicit in `stops`; use [`TruckRoute::path`] for the
/// full node sequence.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Stop, TruckRoute};
///
/// let mut route = TruckRoute::new(0);
/// route.push_stop(Stop { node: 3, load_after: 5.0 });
/// route.set_distance(8.0);
/// assert_eq!(route.path(0), vec![0, 3, 0]);
/// assert_eq!(route.load(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TruckRoute {
    vehicle_id: usize,
    stops: Vec<Stop>,
    distance: f64,
    load: f64,
}

impl TruckRoute {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            distance: 0.0,
            load: 0.0,
        }
    }

    /// Appends a stop.
    pub fn push_stop(&mut self, stop: Stop) {
        self.load = stop.load_after;
        self.stops.push(stop);
    }

    /// Vehicle driving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Customer stops in visit order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Customer nodes in visit order.
    pub fn nodes(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.node).collect()
    }

    /// Returns `true` if the truck stays at the depot.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Number of customer stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Full node path `depot → stops → depot`, or just `[depot]` when unused.
    pub fn path(&self, depot: usize) -> Vec<usize> {
        if self.stops.is_empty() {
            return vec![depot];
        }
        std::iter::once(depot)
            .chain(self.stops.iter().map(|s| s.node))
            .chain(std::iter::once(depot))
            .collect()
    }

    /// Total distance driven.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total load delivered.
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Sets the total distance (used by the extractor).
    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = TruckRoute::new(4);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 4);
        assert_eq!(r.distance(), 0.0);
        assert_eq!(r.load(), 0.0);
        assert_eq!(r.path(0), vec![0]);
    }

    #[test]
    fn test_route_push_stop() {
        let mut r = TruckRoute::new(1);
        r.push_stop(Stop {
            node: 5,
            load_after: 20.0,
        });
        r.push_stop(Stop {
            node: 3,
            load_after: 35.0,
        });
        assert_eq!(r.len(), 2);
        assert_eq!(r.nodes(), vec![5, 3]);
        assert_eq!(r.load(), 35.0);
        assert_eq!(r.path(2), vec![2, 5, 3, 2]);
    }
}
