//! Customer relocation operator.
//!
//! # Algorithm
//!
//! Tries moving each customer from its current position to every other
//! position, in its own route or in any route whose vehicle can carry it.
//! The first move that lowers the cost is applied.
//!
//! # Complexity
//!
//! O(n²) per scan where n = number of customers.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{insertion_delta, removal_delta, MoveContext, IMPROVEMENT_EPSILON};
use crate::distance::ArcCost;
use crate::models::{fits, RoutePlan};

/// Applies the first improving relocate move. Returns `true` if one was found.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DispatchProblem, RoutePlan};
/// use u_dispatch::local_search::{relocate, MoveContext};
/// use u_dispatch::search::Deadline;
/// use std::time::Duration;
///
/// // 1 and 2 sit together, 3 is across the depot
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 5.0, 5.0, 5.0],
///         vec![5.0, 0.0, 1.0, 10.0],
///         vec![5.0, 1.0, 0.0, 10.0],
///         vec![5.0, 10.0, 10.0, 0.0],
///     ],
///     vec![0.0, 1.0, 1.0, 1.0],
///     vec![2.0, 2.0],
///     0,
/// )
/// .unwrap();
/// let mut plan = RoutePlan::from_routes(vec![vec![1, 3], vec![2]], problem.demands());
/// let capacities = problem.capacities();
/// let deadline = Deadline::new(Duration::from_secs(1));
/// let ctx = MoveContext {
///     cost: problem.distances(),
///     demands: problem.demands(),
///     capacities: &capacities,
///     depot: 0,
///     deadline: &deadline,
/// };
/// assert!(relocate(&mut plan, &ctx));
/// assert!(plan.cost(problem.distances(), 0) < 30.0);
/// ```
pub fn relocate<C: ArcCost + ?Sized>(plan: &mut RoutePlan, ctx: &MoveContext<'_, C>) -> bool {
    for from in 0..plan.num_vehicles() {
        for from_pos in 0..plan.route(from).len() {
            if ctx.deadline.expired() {
                return false;
            }
            let node = plan.route(from)[from_pos];
            let demand = ctx.demands[node];
            let removal = removal_delta(ctx.cost, plan.route(from), from_pos, 1, ctx.depot);

            for to in 0..plan.num_vehicles() {
                if to == from {
                    let mut reduced = plan.route(from).to_vec();
                    reduced.remove(from_pos);
                    for pos in (0..=reduced.len()).filter(|&p| p != from_pos) {
                        let delta =
                            removal + insertion_delta(ctx.cost, &reduced, pos, node, ctx.depot);
                        if delta < -IMPROVEMENT_EPSILON {
                            plan.remove(from, from_pos, demand);
                            plan.insert(from, pos, node, demand);
                            return true;
                        }
                    }
                    continue;
                }

                if !fits(plan.load(to) + demand, ctx.capacities[to]) {
                    continue;
                }
                for pos in 0..=plan.route(to).len() {
                    let delta =
                        removal + insertion_delta(ctx.cost, plan.route(to), pos, node, ctx.depot);
                    if delta < -IMPROVEMENT_EPSILON {
                        plan.remove(from, from_pos, demand);
                        plan.insert(to, pos, node, demand);
                        return true;
                    }
                }
            }
        }
    }
    false
}
