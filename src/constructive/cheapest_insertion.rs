//! Cheapest-insertion constructive heuristic and insertion repair.
//!
//! # Algorithm
//!
//! Starting from empty routes, repeatedly evaluate every (vehicle, customer,
//! position) triple whose vehicle can still carry the customer and insert the
//! one with the lowest marginal cost:
//!
//! ```text
//! delta = d(prev, c) + d(c, next) - d(prev, next)
//! ```
//!
//! Ties go to the lowest vehicle index, then node index, then position.
//!
//! # Complexity
//!
//! O(n³) for n customers on a fixed fleet.

use crate::local_search::insertion_delta;
use crate::models::{fits, DispatchProblem, RoutePlan};

/// A candidate insertion: customer `node` before position `pos` of `vehicle`.
#[derive(Debug, Clone, Copy)]
struct Insertion {
    vehicle: usize,
    node: usize,
    pos: usize,
    delta: f64,
}

/// Constructs a plan by cheapest insertion over all vehicles.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DispatchProblem;
/// use u_dispatch::constructive::cheapest_insertion;
///
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
/// let plan = cheapest_insertion(&problem);
/// assert_eq!(plan.num_served(), 3);
/// assert!(plan.is_complete());
/// ```
pub fn cheapest_insertion(problem: &DispatchProblem) -> RoutePlan {
    let mut plan = RoutePlan::new(problem.num_vehicles());
    let mut pending: Vec<usize> = problem.customers().collect();

    while let Some(best) = best_insertion(problem, &plan, &pending) {
        plan.insert(best.vehicle, best.pos, best.node, problem.demand(best.node));
        pending.retain(|&n| n != best.node);
    }

    plan.set_unassigned(pending);
    plan
}

/// Places the plan's unassigned customers, largest demand first, each at its
/// cheapest feasible position. Customers that still fit nowhere stay
/// unassigned.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DispatchProblem, RoutePlan};
/// use u_dispatch::constructive::repair;
///
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 1.0, 1.0],
///         vec![1.0, 0.0, 1.0],
///         vec![1.0, 1.0, 0.0],
///     ],
///     vec![0.0, 4.0, 6.0],
///     vec![10.0],
///     0,
/// )
/// .unwrap();
///
/// let mut plan = RoutePlan::new(1);
/// plan.set_unassigned(vec![1, 2]);
/// repair(&problem, &mut plan);
/// assert!(plan.is_complete());
/// assert_eq!(plan.load(0), 10.0);
/// ```
pub fn repair(problem: &DispatchProblem, plan: &mut RoutePlan) {
    let mut pending = plan.unassigned().to_vec();
    pending.sort_by(|&a, &b| {
        problem
            .demand(b)
            .total_cmp(&problem.demand(a))
            .then(a.cmp(&b))
    });

    let mut left = Vec::new();
    for node in pending {
        match best_insertion(problem, plan, &[node]) {
            Some(best) => plan.insert(best.vehicle, best.pos, node, problem.demand(node)),
            None => left.push(node),
        }
    }
    left.sort_unstable();
    plan.set_unassigned(left);
}

fn best_insertion(
    problem: &DispatchProblem,
    plan: &RoutePlan,
    pending: &[usize],
) -> Option<Insertion> {
    let depot = problem.depot();
    let distances = problem.distances();
    let mut best: Option<Insertion> = None;

    for vehicle in 0..plan.num_vehicles() {
        let route = plan.route(vehicle);
        let capacity = problem.capacity(vehicle);
        for &node in pending {
            if !fits(plan.load(vehicle) + problem.demand(node), capacity) {
                continue;
            }
            for pos in 0..=route.len() {
                let delta = insertion_delta(distances, route, pos, node, depot);
                if best.is_none_or(|b| delta < b.delta) {
                    best = Some(Insertion {
                        vehicle,
                        node,
                        pos,
                        delta,
                    });
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_problem(capacities: Vec<f64>) -> DispatchProblem {
        // depot in the centre, 1 & 2 close together east, 3 & 4 close together west
        DispatchProblem::from_rows(
            vec![
                vec![0.0, 5.0, 5.0, 5.0, 5.0],
                vec![5.0, 0.0, 1.0, 10.0, 10.0],
                vec![5.0, 1.0, 0.0, 10.0, 10.0],
                vec![5.0, 10.0, 10.0, 0.0, 1.0],
                vec![5.0, 10.0, 10.0, 1.0, 0.0],
            ],
            vec![0.0, 5.0, 5.0, 5.0, 5.0],
            capacities,
            0,
        )
        .expect("valid")
    }

    #[test]
    fn test_clusters_by_route() {
        let plan = cheapest_insertion(&square_problem(vec![10.0, 10.0]));
        assert!(plan.is_complete());
        let mut r0 = plan.route(0).to_vec();
        let mut r1 = plan.route(1).to_vec();
        r0.sort_unstable();
        r1.sort_unstable();
        assert_eq!(r0, vec![1, 2]);
        assert_eq!(r1, vec![3, 4]);
    }

    #[test]
    fn test_insufficient_fleet() {
        let plan = cheapest_insertion(&square_problem(vec![10.0]));
        assert_eq!(plan.num_served(), 2);
        assert_eq!(plan.unassigned().len(), 2);
    }

    #[test]
    fn test_repair_places_largest_first() {
        // capacities 6 and 4; greedy arc order would strand the 6
        let problem = DispatchProblem::from_rows(
            vec![
                vec![0.0, 1.0, 2.0],
                vec![1.0, 0.0, 1.0],
                vec![2.0, 1.0, 0.0],
            ],
            vec![0.0, 4.0, 6.0],
            vec![6.0, 4.0],
            0,
        )
        .expect("valid");
        let mut plan = RoutePlan::new(2);
        plan.set_unassigned(vec![1, 2]);
        repair(&problem, &mut plan);
        assert!(plan.is_complete());
        assert_eq!(plan.route(0), &[2]);
        assert_eq!(plan.route(1), &[1]);
    }

    #[test]
    fn test_repair_keeps_unplaceable() {
        let problem = DispatchProblem::from_rows(
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            vec![0.0, 20.0],
            vec![10.0],
            0,
        )
        .expect("valid");
        let mut plan = RoutePlan::new(1);
        plan.set_unassigned(vec![1]);
        repair(&problem, &mut plan);
        assert_eq!(plan.unassigned(), &[1]);
        assert_eq!(plan.num_served(), 0);
    }
}
