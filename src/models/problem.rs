//! The dispatch problem model.

use super::Vehicle;
use crate::distance::DistanceMatrix;
use crate::error::ValidationError;

/// Relative tolerance applied when comparing a summed load against a
/// capacity.
///
/// Only absorbs summation rounding: `0.1 + 0.2` fits into `0.3`, while a
/// load of `5.0000000005` does not fit into `5`.
pub const CAPACITY_TOLERANCE: f64 = 1e-12;

/// Returns `true` if `load` fits into `capacity`.
///
/// The slack is `CAPACITY_TOLERANCE` times the capacity (at least 1).
pub fn fits(load: f64, capacity: f64) -> bool {
    load <= capacity + CAPACITY_TOLERANCE * capacity.abs().max(1.0)
}

/// An immutable, validated CVRP instance: distances, demands, fleet, depot.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DispatchProblem;
///
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 4.0, 6.0],
///         vec![4.0, 0.0, 3.0],
///         vec![6.0, 3.0, 0.0],
///     ],
///     vec![0.0, 5.0, 5.0],
///     vec![10.0],
///     0,
/// )
/// .unwrap();
/// assert_eq!(problem.num_nodes(), 3);
/// assert_eq!(problem.num_vehicles(), 1);
/// assert_eq!(problem.total_demand(), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct DispatchProblem {
    distances: DistanceMatrix,
    demands: Vec<f64>,
    vehicles: Vec<Vehicle>,
    depot: usize,
}

impl DispatchProblem {
    /// Validates and bundles the problem data.
    pub fn new(
        distances: DistanceMatrix,
        demands: Vec<f64>,
        capacities: Vec<f64>,
        depot: usize,
    ) -> Result<Self, ValidationError> {
        distances.validate()?;
        let size = distances.size();

        if demands.len() != size {
            return Err(ValidationError::DemandLength {
                expected: size,
                actual: demands.len(),
            });
        }
        if let Some((node, &demand)) = demands
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d < 0.0)
        {
            return Err(ValidationError::InvalidDemand { node, demand });
        }

        if capacities.is_empty() {
            return Err(ValidationError::EmptyFleet);
        }
        if let Some((vehicle, &capacity)) = capacities
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_finite() || **c < 0.0)
        {
            return Err(ValidationError::InvalidCapacity { vehicle, capacity });
        }

        if depot >= size {
            return Err(ValidationError::DepotOutOfRange { depot, size });
        }
        if demands[depot] != 0.0 {
            return Err(ValidationError::DepotDemand {
                demand: demands[depot],
            });
        }

        let vehicles = capacities
            .into_iter()
            .enumerate()
            .map(|(id, capacity)| Vehicle::new(id, capacity))
            .collect();

        Ok(Self {
            distances,
            demands,
            vehicles,
            depot,
        })
    }

    /// Like [`DispatchProblem::new`], taking the matrix as nested rows.
    pub fn from_rows(
        rows: Vec<Vec<f64>>,
        demands: Vec<f64>,
        capacities: Vec<f64>,
        depot: usize,
    ) -> Result<Self, ValidationError> {
        Self::new(DistanceMatrix::from_rows(rows)?, demands, capacities, depot)
    }

    /// Distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Demand per node (depot included, always 0).
    pub fn demands(&self) -> &[f64] {
        &self.demands
    }

    /// Demand of one node.
    pub fn demand(&self, node: usize) -> f64 {
        self.demands[node]
    }

    /// The fleet, indexed by vehicle ID.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Capacity of one vehicle.
    pub fn capacity(&self, vehicle: usize) -> f64 {
        self.vehicles[vehicle].capacity()
    }

    /// Capacities in vehicle order.
    pub fn capacities(&self) -> Vec<f64> {
        self.vehicles.iter().map(Vehicle::capacity).collect()
    }

    /// Depot node index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of nodes, depot included.
    pub fn num_nodes(&self) -> usize {
        self.distances.size()
    }

    /// Number of customers (nodes other than the depot).
    pub fn num_customers(&self) -> usize {
        self.num_nodes() - 1
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Customer node indices in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_nodes()).filter(move |&n| n != self.depot)
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> f64 {
        self.demands.iter().sum()
    }

    /// Sum of all vehicle capacities.
    pub fn total_capacity(&self) -> f64 {
        self.vehicles.iter().map(Vehicle::capacity).sum()
    }

    /// Largest single vehicle capacity.
    pub fn max_capacity(&self) -> f64 {
        self.vehicles
            .iter()
            .map(Vehicle::capacity)
            .fold(0.0, f64::max)
    }
}
