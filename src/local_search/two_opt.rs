//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions i < j in a route, compute the change in cost
//! from reversing the segment between them:
//!
//! ```text
//! delta = c(prev_i, r[j]) + c(r[i], next_j) - c(prev_i, r[i]) - c(r[j], next_j)
//! ```
//!
//! where `prev_i` / `next_j` are the neighbours of the segment (the depot at
//! either end). Reversal never changes a route's load.
//!
//! # Complexity
//!
//! O(n²) per scan.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::{at, before, MoveContext, IMPROVEMENT_EPSILON};
use crate::distance::ArcCost;
use crate::models::RoutePlan;

/// Applies the first improving segment reversal. Returns `true` if one was
/// found.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DispatchProblem, RoutePlan};
/// use u_dispatch::local_search::{two_opt, MoveContext};
/// use u_dispatch::search::Deadline;
/// use std::time::Duration;
///
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 1.0, 2.0, 3.0],
///         vec![1.0, 0.0, 1.0, 2.0],
///         vec![2.0, 1.0, 0.0, 1.0],
///         vec![3.0, 2.0, 1.0, 0.0],
///     ],
///     vec![0.0, 1.0, 1.0, 1.0],
///     vec![3.0],
///     0,
/// )
/// .unwrap();
/// let mut plan = RoutePlan::from_routes(vec![vec![1, 3, 2]], problem.demands());
/// let capacities = problem.capacities();
/// let deadline = Deadline::new(Duration::from_secs(1));
/// let ctx = MoveContext {
///     cost: problem.distances(),
///     demands: problem.demands(),
///     capacities: &capacities,
///     depot: 0,
///     deadline: &deadline,
/// };
/// assert!(two_opt(&mut plan, &ctx));
/// assert_eq!(plan.route(0), &[1, 2, 3]);
/// ```
pub fn two_opt<C: ArcCost + ?Sized>(plan: &mut RoutePlan, ctx: &MoveContext<'_, C>) -> bool {
    for vehicle in 0..plan.num_vehicles() {
        let n = plan.route(vehicle).len();
        if n < 2 {
            continue;
        }
        for i in 0..n - 1 {
            if ctx.deadline.expired() {
                return false;
            }
            for j in i + 1..n {
                let delta = two_opt_delta(ctx.cost, plan.route(vehicle), ctx.depot, i, j);
                if delta < -IMPROVEMENT_EPSILON {
                    plan.reverse(vehicle, i, j);
                    return true;
                }
            }
        }
    }
    false
}

/// Cost change from reversing `route[i..=j]`.
fn two_opt_delta<C: ArcCost + ?Sized>(
    cost: &C,
    route: &[usize],
    depot: usize,
    i: usize,
    j: usize,
) -> f64 {
    let prev_i = before(route, i, depot);
    let next_j = at(route, j + 1, depot);

    let old_cost = cost.arc_cost(prev_i, route[i]) + cost.arc_cost(route[j], next_j);
    let new_cost = cost.arc_cost(prev_i, route[j]) + cost.arc_cost(route[i], next_j);

    new_cost - old_cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::search::Deadline;
    use std::time::Duration;

    /// Depot at the centre of a unit square's corners 1..=4 (clockwise).
    fn square() -> DistanceMatrix {
        let s = 2f64.sqrt();
        DistanceMatrix::from_rows(vec![
            vec![0.0, s / 2.0, s / 2.0, s / 2.0, s / 2.0],
            vec![s / 2.0, 0.0, 1.0, s, 1.0],
            vec![s / 2.0, 1.0, 0.0, 1.0, s],
            vec![s / 2.0, s, 1.0, 0.0, 1.0],
            vec![s / 2.0, 1.0, s, 1.0, 0.0],
        ])
        .expect("square")
    }

    fn improve(plan: &mut RoutePlan, dm: &DistanceMatrix) -> usize {
        let deadline = Deadline::new(Duration::from_secs(5));
        let demands = [0.0; 5];
        let capacities = vec![0.0; plan.num_vehicles()];
        let ctx = MoveContext {
            cost: dm,
            demands: &demands,
            capacities: &capacities,
            depot: 0,
            deadline: &deadline,
        };
        let mut moves = 0;
        while two_opt(plan, &ctx) {
            moves += 1;
        }
        moves
    }

    #[test]
    fn test_uncrosses_route() {
        let dm = square();
        // 1 → 3 → 2 → 4 crosses the square's diagonals
        let mut plan = RoutePlan::from_routes(vec![vec![1, 3, 2, 4]], &[0.0; 5]);
        let initial = plan.cost(&dm, 0);
        assert!(improve(&mut plan, &dm) > 0);
        assert!(plan.cost(&dm, 0) < initial);
        let expected = 2f64.sqrt() + 3.0;
        assert!((plan.cost(&dm, 0) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_already_optimal() {
        let dm = square();
        let mut plan = RoutePlan::from_routes(vec![vec![1, 2, 3, 4]], &[0.0; 5]);
        assert_eq!(improve(&mut plan, &dm), 0);
        assert_eq!(plan.route(0), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_short_routes() {
        let dm = square();
        let mut plan = RoutePlan::from_routes(vec![vec![], vec![2]], &[0.0; 5]);
        assert_eq!(improve(&mut plan, &dm), 0);
    }

    #[test]
    fn test_delta_matches_cost_change() {
        let dm = square();
        let route = [1, 3, 2, 4];
        let before_cost = dm.route_cost(&route, 0);
        let delta = two_opt_delta(&dm, &route, 0, 1, 2);
        let mut reversed = route;
        reversed[1..=2].reverse();
        let after_cost = dm.route_cost(&reversed, 0);
        assert!((after_cost - before_cost - delta).abs() < 1e-10);
    }
}
