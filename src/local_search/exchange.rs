//! Inter-route tail exchange (2-opt*).
//!
//! Cutting route `a` after position `i` and route `b` after position `j`
//! and reconnecting the head of each to the tail of the other:
//!
//! ```text
//! a: D → a₁ … aᵢ | aᵢ₊₁ … → D        a': D → a₁ … aᵢ → bⱼ₊₁ … → D
//! b: D → b₁ … bⱼ | bⱼ₊₁ … → D   ⇒   b': D → b₁ … bⱼ → aᵢ₊₁ … → D
//! ```
//!
//! Cutting at the very start or end of a route lets the move merge two
//! routes into one. Only the two reconnecting arcs change, so the delta is
//! O(1); loads come from running prefix sums.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An exchange heuristic for routeing
//! problems with time windows", *J. Operational Research Society* 46(12),
//! 1433-1446.

use super::{at, before, MoveContext, IMPROVEMENT_EPSILON};
use crate::distance::ArcCost;
use crate::models::{fits, RoutePlan};

/// Applies the first improving tail exchange between two routes. Returns
/// `true` if one was found.
pub fn exchange<C: ArcCost + ?Sized>(plan: &mut RoutePlan, ctx: &MoveContext<'_, C>) -> bool {
    let num_vehicles = plan.num_vehicles();
    for r1 in 0..num_vehicles {
        for r2 in r1 + 1..num_vehicles {
            if plan.route(r1).is_empty() && plan.route(r2).is_empty() {
                continue;
            }
            if let Some((cut1, cut2)) = find_exchange(plan, r1, r2, ctx) {
                plan.swap_tails(r1, cut1, r2, cut2, ctx.demands);
                return true;
            }
        }
    }
    false
}

/// First improving feasible pair of cut positions between `r1` and `r2`.
fn find_exchange<C: ArcCost + ?Sized>(
    plan: &RoutePlan,
    r1: usize,
    r2: usize,
    ctx: &MoveContext<'_, C>,
) -> Option<(usize, usize)> {
    let route1 = plan.route(r1);
    let route2 = plan.route(r2);
    let (load1, load2) = (plan.load(r1), plan.load(r2));
    let (cap1, cap2) = (ctx.capacities[r1], ctx.capacities[r2]);

    let mut head1 = 0.0;
    for cut1 in 0..=route1.len() {
        if ctx.deadline.expired() {
            return None;
        }
        if cut1 > 0 {
            head1 += ctx.demands[route1[cut1 - 1]];
        }
        let tail1 = load1 - head1;
        let a1 = before(route1, cut1, ctx.depot);
        let b1 = at(route1, cut1, ctx.depot);
        let removed1 = ctx.cost.arc_cost(a1, b1);

        let mut head2 = 0.0;
        for cut2 in 0..=route2.len() {
            if cut2 > 0 {
                head2 += ctx.demands[route2[cut2 - 1]];
            }
            let tail2 = load2 - head2;
            if !fits(head1 + tail2, cap1) || !fits(head2 + tail1, cap2) {
                continue;
            }
            let a2 = before(route2, cut2, ctx.depot);
            let b2 = at(route2, cut2, ctx.depot);
            let delta = ctx.cost.arc_cost(a1, b2) + ctx.cost.arc_cost(a2, b1)
                - removed1
                - ctx.cost.arc_cost(a2, b2);
            if delta < -IMPROVEMENT_EPSILON {
                return Some((cut1, cut2));
            }
        }
    }
    None
}
