//! Routing index space.
//!
//! The search works on a successor array over *routing indices*: one index
//! per customer, followed by one start and one end index per vehicle. Every
//! start and end index maps back to the depot node, so vehicles share the
//! depot without competing for it.
//!
//! ```text
//! [c_0 .. c_{C-1}] [start_0 .. start_{V-1}] [end_0 .. end_{V-1}]
//! ```

/// Maps routing indices to problem nodes and back.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::IndexManager;
///
/// // 4 nodes (depot 0), 2 vehicles
/// let manager = IndexManager::new(4, 2, 0);
/// assert_eq!(manager.num_indices(), 3 + 2 + 2);
/// assert_eq!(manager.index_to_node(manager.start(1)), 0);
/// assert_eq!(manager.index_to_node(manager.end(0)), 0);
/// assert_eq!(manager.node_to_index(2), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexManager {
    customers: Vec<usize>,
    customer_index: Vec<Option<usize>>,
    num_vehicles: usize,
    depot: usize,
}

impl IndexManager {
    /// Creates the index space for `num_nodes` nodes and `num_vehicles` vehicles.
    pub fn new(num_nodes: usize, num_vehicles: usize, depot: usize) -> Self {
        let customers: Vec<usize> = (0..num_nodes).filter(|&n| n != depot).collect();
        let mut customer_index = vec![None; num_nodes];
        for (index, &node) in customers.iter().enumerate() {
            customer_index[node] = Some(index);
        }
        Self {
            customers,
            customer_index,
            num_vehicles,
            depot,
        }
    }

    /// Total number of routing indices.
    pub fn num_indices(&self) -> usize {
        self.customers.len() + 2 * self.num_vehicles
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    /// Number of customer indices.
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Start index of a vehicle.
    pub fn start(&self, vehicle: usize) -> usize {
        self.customers.len() + vehicle
    }

    /// End index of a vehicle.
    pub fn end(&self, vehicle: usize) -> usize {
        self.customers.len() + self.num_vehicles + vehicle
    }

    /// Returns `true` for any vehicle start index.
    pub fn is_start(&self, index: usize) -> bool {
        let c = self.customers.len();
        (c..c + self.num_vehicles).contains(&index)
    }

    /// Returns `true` for any vehicle end index.
    pub fn is_end(&self, index: usize) -> bool {
        index >= self.customers.len() + self.num_vehicles
    }

    /// Node visited at a routing index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_indices()`.
    pub fn index_to_node(&self, index: usize) -> usize {
        assert!(index < self.num_indices(), "routing index out of range");
        self.customers.get(index).copied().unwrap_or(self.depot)
    }

    /// Routing index of a customer node; `None` for the depot.
    pub fn node_to_index(&self, node: usize) -> Option<usize> {
        self.customer_index.get(node).copied().flatten()
    }
}
