//! Working route representation used during search.

use crate::distance::ArcCost;

/// Per-vehicle customer sequences with cached loads.
///
/// Routes exclude the depot; a vehicle always leaves from and returns to it.
/// Every mutation keeps `loads[v]` equal to the demand sum of `routes[v]`.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::RoutePlan;
///
/// let demands = [0.0, 3.0, 4.0];
/// let mut plan = RoutePlan::new(2);
/// plan.push(0, 1, demands[1]);
/// plan.push(1, 2, demands[2]);
/// assert_eq!(plan.load(1), 4.0);
/// assert_eq!(plan.num_served(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    routes: Vec<Vec<usize>>,
    loads: Vec<f64>,
    unassigned: Vec<usize>,
}

impl RoutePlan {
    /// Creates a plan with one empty route per vehicle.
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            routes: vec![Vec::new(); num_vehicles],
            loads: vec![0.0; num_vehicles],
            unassigned: Vec::new(),
        }
    }

    /// Creates a plan from explicit routes, computing loads from `demands`.
    pub fn from_routes(routes: Vec<Vec<usize>>, demands: &[f64]) -> Self {
        let loads = routes
            .iter()
            .map(|r| r.iter().map(|&n| demands[n]).sum())
            .collect();
        Self {
            routes,
            loads,
            unassigned: Vec::new(),
        }
    }

    /// All routes, indexed by vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Customer sequence of one vehicle.
    pub fn route(&self, vehicle: usize) -> &[usize] {
        &self.routes[vehicle]
    }

    /// Current load of one vehicle.
    pub fn load(&self, vehicle: usize) -> f64 {
        self.loads[vehicle]
    }

    /// Loads, indexed by vehicle.
    pub fn loads(&self) -> &[f64] {
        &self.loads
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Customers the plan could not place.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Replaces the unassigned list.
    pub fn set_unassigned(&mut self, unassigned: Vec<usize>) {
        self.unassigned = unassigned;
    }

    /// Returns `true` if no customer is left unassigned.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Number of customers on routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Appends a customer to the end of a route.
    pub fn push(&mut self, vehicle: usize, node: usize, demand: f64) {
        self.routes[vehicle].push(node);
        self.loads[vehicle] += demand;
    }

    /// Inserts a customer before position `pos` of a route.
    pub fn insert(&mut self, vehicle: usize, pos: usize, node: usize, demand: f64) {
        self.routes[vehicle].insert(pos, node);
        self.loads[vehicle] += demand;
    }

    /// Removes and returns the customer at `pos`.
    pub fn remove(&mut self, vehicle: usize, pos: usize, demand: f64) -> usize {
        self.loads[vehicle] -= demand;
        self.routes[vehicle].remove(pos)
    }

    /// Moves `len` customers starting at `start` of route `from` to position
    /// `pos` of route `to`.
    ///
    /// For an intra-route move `pos` indexes the route after the segment has
    /// been taken out.
    pub fn move_segment(
        &mut self,
        from: usize,
        start: usize,
        len: usize,
        to: usize,
        pos: usize,
        demands: &[f64],
    ) {
        let segment: Vec<usize> = self.routes[from].drain(start..start + len).collect();
        let load: f64 = segment.iter().map(|&n| demands[n]).sum();
        self.loads[from] -= load;
        self.loads[to] += load;
        self.routes[to].splice(pos..pos, segment);
    }

    /// Reverses positions `i..=j` of a route.
    pub fn reverse(&mut self, vehicle: usize, i: usize, j: usize) {
        self.routes[vehicle][i..=j].reverse();
    }

    /// Exchanges the tails `r1[cut1..]` and `r2[cut2..]` of two routes.
    pub fn swap_tails(&mut self, r1: usize, cut1: usize, r2: usize, cut2: usize, demands: &[f64]) {
        let tail1: Vec<usize> = self.routes[r1].split_off(cut1);
        let tail2: Vec<usize> = self.routes[r2].split_off(cut2);
        let load1: f64 = tail1.iter().map(|&n| demands[n]).sum();
        let load2: f64 = tail2.iter().map(|&n| demands[n]).sum();
        self.loads[r1] += load2 - load1;
        self.loads[r2] += load1 - load2;
        self.routes[r1].extend(tail2);
        self.routes[r2].extend(tail1);
    }

    /// Total cost of all routes under the given arc cost.
    pub fn cost<C: ArcCost>(&self, cost: &C, depot: usize) -> f64 {
        self.routes.iter().map(|r| cost.route_cost(r, depot)).sum()
    }

    /// Every arc traversed by a non-empty route, depot legs included.
    pub fn arcs(&self, depot: usize) -> Vec<(usize, usize)> {
        let mut arcs = Vec::new();
        for route in self.routes.iter().filter(|r| !r.is_empty()) {
            let mut prev = depot;
            for &node in route {
                arcs.push((prev, node));
                prev = node;
            }
            arcs.push((prev, depot));
        }
        arcs
    }
}
