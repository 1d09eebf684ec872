//! Solver outcomes: assignments, infeasibility, and constraint violations.

use std::fmt;
use std::time::Duration;

use super::IndexManager;

/// A type of constraint violation in a set of routes.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Vehicle capacity exceeded.
    CapacityExceeded {
        /// Vehicle index.
        vehicle: usize,
        /// Load carried by the route.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// A customer appears on no route.
    MissingCustomer {
        /// Customer node.
        node: usize,
    },
    /// A node appears more than once across all routes.
    DuplicateVisit {
        /// Node visited twice.
        node: usize,
    },
    /// A route lists the depot as a stop.
    DepotVisit {
        /// Vehicle index.
        vehicle: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Why no assignment exists for a problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasibility {
    /// A single order is larger than every truck.
    OversizedOrder {
        /// Customer node.
        node: usize,
        /// Its demand.
        demand: f64,
        /// Largest capacity in the fleet.
        max_capacity: f64,
    },
    /// Total demand exceeds total fleet capacity.
    InsufficientCapacity {
        /// Sum of demands.
        total_demand: f64,
        /// Sum of capacities.
        total_capacity: f64,
    },
    /// Construction and repair left customers without a feasible slot.
    NoFeasibleAssignment {
        /// Customers that could not be placed.
        unassigned: Vec<usize>,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OversizedOrder {
                node,
                demand,
                max_capacity,
            } => write!(
                f,
                "order at node {node} needs {demand}, largest truck holds {max_capacity}"
            ),
            Self::InsufficientCapacity {
                total_demand,
                total_capacity,
            } => write!(
                f,
                "total demand {total_demand} exceeds fleet capacity {total_capacity}"
            ),
            Self::NoFeasibleAssignment { unassigned } => {
                write!(f, "no feasible slot for nodes {unassigned:?}")
            }
        }
    }
}

/// Counters collected during one solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Objective of the constructed solution.
    pub initial_cost: f64,
    /// Improving moves applied.
    pub moves: usize,
    /// Local minima reached (each one triggers a penalty update).
    pub local_minima: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// A complete feasible assignment, stored as successor links over routing
/// indices (see [`IndexManager`]).
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Assignment, IndexManager};
///
/// let manager = IndexManager::new(3, 2, 0);
/// let assignment = Assignment::from_routes(manager, &[vec![2, 1], vec![]], 7.0).unwrap();
/// let m = assignment.manager();
/// let first = assignment.next(m.start(0));
/// assert_eq!(m.index_to_node(first), 2);
/// assert!(m.is_end(assignment.next(m.start(1))));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    manager: IndexManager,
    next: Vec<usize>,
    objective: f64,
    stats: SearchStats,
}

impl Assignment {
    /// Links per-vehicle node sequences into successor form.
    ///
    /// Returns `None` unless `routes` has one entry per vehicle and visits
    /// every customer exactly once (and never the depot).
    pub fn from_routes(manager: IndexManager, routes: &[Vec<usize>], objective: f64) -> Option<Self> {
        if routes.len() != manager.num_vehicles() {
            return None;
        }
        let mut next: Vec<Option<usize>> = vec![None; manager.num_indices()];
        let mut seen = vec![false; manager.num_customers()];
        for (vehicle, route) in routes.iter().enumerate() {
            let mut prev = manager.start(vehicle);
            for &node in route {
                let index = manager.node_to_index(node)?;
                if std::mem::replace(&mut seen[index], true) {
                    return None;
                }
                next[prev] = Some(index);
                prev = index;
            }
            next[prev] = Some(manager.end(vehicle));
            let end = manager.end(vehicle);
            next[end] = Some(end);
        }
        let next = next.into_iter().collect::<Option<Vec<usize>>>()?;
        Some(Self {
            manager,
            next,
            objective,
            stats: SearchStats::default(),
        })
    }

    /// Attaches search counters.
    pub fn with_stats(mut self, stats: SearchStats) -> Self {
        self.stats = stats;
        self
    }

    /// Index space of this assignment.
    pub fn manager(&self) -> &IndexManager {
        &self.manager
    }

    /// Successor of a routing index; end indices are their own successor.
    pub fn next(&self, index: usize) -> usize {
        self.next[index]
    }

    /// Total route distance.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Search counters.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
