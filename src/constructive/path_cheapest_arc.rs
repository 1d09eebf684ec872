//! Path-cheapest-arc constructive heuristic.
//!
//! Every vehicle grows a path from the depot. At each step the cheapest arc
//! from the end of any path to any unassigned customer that still fits into
//! that vehicle is appended. Construction stops when every customer is
//! placed or no path can be extended.
//!
//! Ties go to the lowest vehicle index, then the lowest node index.
//!
//! # Complexity
//!
//! O(n² × V) where n = number of customers, V = number of vehicles.

use crate::models::{fits, DispatchProblem, RoutePlan};

/// Constructs a plan by repeatedly extending the path with the cheapest
/// feasible next arc across all vehicles.
///
/// Customers that fit nowhere are left in [`RoutePlan::unassigned`].
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DispatchProblem;
/// use u_dispatch::constructive::path_cheapest_arc;
///
/// // depot 0 and three customers on a line
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 1.0, 2.0, 3.0],
///         vec![1.0, 0.0, 1.0, 2.0],
///         vec![2.0, 1.0, 0.0, 1.0],
///         vec![3.0, 2.0, 1.0, 0.0],
///     ],
///     vec![0.0, 10.0, 10.0, 10.0],
///     vec![30.0],
///     0,
/// )
/// .unwrap();
///
/// let plan = path_cheapest_arc(&problem);
/// assert_eq!(plan.route(0), &[1, 2, 3]);
/// assert!(plan.is_complete());
/// ```
pub fn path_cheapest_arc(problem: &DispatchProblem) -> RoutePlan {
    let depot = problem.depot();
    let distances = problem.distances();
    let mut plan = RoutePlan::new(problem.num_vehicles());
    let mut assigned = vec![false; problem.num_nodes()];
    assigned[depot] = true;

    loop {
        let mut best: Option<(usize, usize, f64)> = None;
        for vehicle in 0..problem.num_vehicles() {
            let last = plan.route(vehicle).last().copied().unwrap_or(depot);
            let capacity = problem.capacity(vehicle);
            for node in problem.customers() {
                if assigned[node] || !fits(plan.load(vehicle) + problem.demand(node), capacity) {
                    continue;
                }
                let d = distances.get(last, node);
                if best.is_none_or(|(_, _, b)| d < b) {
                    best = Some((vehicle, node, d));
                }
            }
        }

        match best {
            Some((vehicle, node, _)) => {
                plan.push(vehicle, node, problem.demand(node));
                assigned[node] = true;
            }
            None => break,
        }
    }

    plan.set_unassigned(problem.customers().filter(|&n| !assigned[n]).collect());
    plan
}
