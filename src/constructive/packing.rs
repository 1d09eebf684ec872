//! Capacity-first construction for fleets the routing heuristics cannot fill.
//!
//! # Algorithm
//!
//! 1. Best-fit decreasing: take orders by decreasing demand and give each to
//!    the vehicle left with the least spare capacity after taking it.
//! 2. If some order fits nowhere, search assignments depth-first, largest
//!    order first. Vehicles with the same spare capacity are interchangeable
//!    for the current order, so only the first of them is tried.
//!
//! Each vehicle's orders are then sequenced by cheapest insertion. The search
//! stops early only once [`MIN_SEARCH_NODES`] assignments have been tried and
//! the deadline has expired.
//!
//! # Reference
//!
//! Martello, S. & Toth, P. (1990). *Knapsack Problems: Algorithms and
//! Computer Implementations*, ch. 8 (bin packing).

use crate::local_search::insertion_delta;
use crate::models::{fits, DispatchProblem, RoutePlan};
use crate::search::Deadline;

/// Assignments tried before the deadline is consulted.
pub const MIN_SEARCH_NODES: usize = 1 << 16;

/// Builds a complete plan by packing orders into vehicles by demand, or
/// returns `None` if no packing was found.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DispatchProblem;
/// use u_dispatch::constructive::pack_decreasing;
/// use u_dispatch::search::Deadline;
/// use std::time::Duration;
///
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 1.0, 1.0, 1.0, 1.0],
///         vec![1.0, 0.0, 1.0, 1.0, 1.0],
///         vec![1.0, 1.0, 0.0, 1.0, 1.0],
///         vec![1.0, 1.0, 1.0, 0.0, 1.0],
///         vec![1.0, 1.0, 1.0, 1.0, 0.0],
///     ],
///     vec![0.0, 4.0, 4.0, 6.0, 6.0],
///     vec![10.0, 10.0],
///     0,
/// )
/// .unwrap();
/// let plan = pack_decreasing(&problem, &Deadline::new(Duration::from_secs(1))).unwrap();
/// assert_eq!(plan.loads(), &[10.0, 10.0]);
/// ```
pub fn pack_decreasing(problem: &DispatchProblem, deadline: &Deadline) -> Option<RoutePlan> {
    let mut orders: Vec<usize> = problem.customers().collect();
    orders.sort_by(|&a, &b| {
        problem
            .demand(b)
            .total_cmp(&problem.demand(a))
            .then(a.cmp(&b))
    });

    let vehicles = best_fit(problem, &orders).or_else(|| {
        let mut search = PackingSearch {
            problem,
            orders: &orders,
            loads: vec![0.0; problem.num_vehicles()],
            choice: Vec::with_capacity(orders.len()),
            nodes: 0,
            deadline,
        };
        search.assign(0).then_some(search.choice)
    })?;

    Some(sequence(problem, &orders, &vehicles))
}

/// Vehicle per order (parallel to `orders`), or `None` if an order fits
/// nowhere.
fn best_fit(problem: &DispatchProblem, orders: &[usize]) -> Option<Vec<usize>> {
    let mut loads = vec![0.0; problem.num_vehicles()];
    let mut choice = Vec::with_capacity(orders.len());
    for &node in orders {
        let demand = problem.demand(node);
        let mut best: Option<(usize, f64)> = None;
        for (vehicle, &load) in loads.iter().enumerate() {
            let capacity = problem.capacity(vehicle);
            if !fits(load + demand, capacity) {
                continue;
            }
            let spare = capacity - load - demand;
            if best.is_none_or(|(_, s)| spare < s) {
                best = Some((vehicle, spare));
            }
        }
        let (vehicle, _) = best?;
        loads[vehicle] += demand;
        choice.push(vehicle);
    }
    Some(choice)
}

struct PackingSearch<'a> {
    problem: &'a DispatchProblem,
    orders: &'a [usize],
    loads: Vec<f64>,
    choice: Vec<usize>,
    nodes: usize,
    deadline: &'a Deadline,
}

impl PackingSearch<'_> {
    /// Places `orders[depth..]`; on success `choice` holds a vehicle per order.
    fn assign(&mut self, depth: usize) -> bool {
        let Some(&node) = self.orders.get(depth) else {
            return true;
        };
        let demand = self.problem.demand(node);
        let mut tried: Vec<f64> = Vec::new();

        for vehicle in 0..self.loads.len() {
            let capacity = self.problem.capacity(vehicle);
            let load = self.loads[vehicle];
            let spare = capacity - load;
            if !fits(load + demand, capacity) || tried.contains(&spare) {
                continue;
            }
            tried.push(spare);

            self.nodes += 1;
            if self.nodes >= MIN_SEARCH_NODES && self.nodes % 1024 == 0 && self.deadline.expired()
            {
                return false;
            }

            self.loads[vehicle] += demand;
            self.choice.push(vehicle);
            if self.assign(depth + 1) {
                return true;
            }
            self.choice.pop();
            self.loads[vehicle] = load;
        }
        false
    }
}

/// Orders each vehicle's share by cheapest insertion.
fn sequence(problem: &DispatchProblem, orders: &[usize], vehicles: &[usize]) -> RoutePlan {
    let depot = problem.depot();
    let distances = problem.distances();
    let mut plan = RoutePlan::new(problem.num_vehicles());
    for (&node, &vehicle) in orders.iter().zip(vehicles) {
        let route = plan.route(vehicle);
        let mut best = (0, f64::INFINITY);
        for pos in 0..=route.len() {
            let delta = insertion_delta(distances, route, pos, node, depot);
            if delta < best.1 {
                best = (pos, delta);
            }
        }
        plan.insert(vehicle, best.0, node, problem.demand(node));
    }
    plan
}
