//! Or-opt segment relocation.
//!
//! # Algorithm
//!
//! Tries moving segments of 2 or 3 consecutive customers to every other
//! position, within the same route or into another route that can carry the
//! segment's load. Each target is tried with the segment in its original
//! order and reversed. Single-customer moves are left to
//! [`relocate`](super::relocate).
//!
//! # Complexity
//!
//! O(n²) per scan.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::{at, before, removal_delta, MoveContext, IMPROVEMENT_EPSILON};
use crate::distance::ArcCost;
use crate::models::{fits, RoutePlan};

const SEGMENT_LENGTHS: [usize; 2] = [2, 3];

/// Applies the first improving segment move. Returns `true` if one was found.
pub fn or_opt<C: ArcCost + ?Sized>(plan: &mut RoutePlan, ctx: &MoveContext<'_, C>) -> bool {
    for seg_len in SEGMENT_LENGTHS {
        for from in 0..plan.num_vehicles() {
            let len = plan.route(from).len();
            if len < seg_len {
                continue;
            }
            for start in 0..=len - seg_len {
                if ctx.deadline.expired() {
                    return false;
                }
                if try_segment(plan, ctx, from, start, seg_len) {
                    return true;
                }
            }
        }
    }
    false
}

fn try_segment<C: ArcCost + ?Sized>(
    plan: &mut RoutePlan,
    ctx: &MoveContext<'_, C>,
    from: usize,
    start: usize,
    seg_len: usize,
) -> bool {
    let route = plan.route(from);
    let first = route[start];
    let last = route[start + seg_len - 1];
    let load: f64 = route[start..start + seg_len]
        .iter()
        .map(|&n| ctx.demands[n])
        .sum();
    let removal = removal_delta(ctx.cost, route, start, seg_len, ctx.depot);

    for to in 0..plan.num_vehicles() {
        let target: Vec<usize> = if to == from {
            let mut reduced = plan.route(from).to_vec();
            reduced.drain(start..start + seg_len);
            reduced
        } else {
            if !fits(plan.load(to) + load, ctx.capacities[to]) {
                continue;
            }
            plan.route(to).to_vec()
        };

        for pos in 0..=target.len() {
            let prev = before(&target, pos, ctx.depot);
            let next = at(&target, pos, ctx.depot);
            let base = removal - ctx.cost.arc_cost(prev, next);
            let forward = base + ctx.cost.arc_cost(prev, first) + ctx.cost.arc_cost(last, next);
            let reversed = base + ctx.cost.arc_cost(prev, last) + ctx.cost.arc_cost(first, next);
            let unchanged = to == from && pos == start;

            if !unchanged && forward < -IMPROVEMENT_EPSILON {
                plan.move_segment(from, start, seg_len, to, pos, ctx.demands);
                return true;
            }
            if reversed < -IMPROVEMENT_EPSILON {
                plan.move_segment(from, start, seg_len, to, pos, ctx.demands);
                plan.reverse(to, pos, pos + seg_len - 1);
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::search::Deadline;
    use std::time::Duration;

    fn run(plan: &mut RoutePlan, dm: &DistanceMatrix, demands: &[f64], capacities: &[f64]) -> bool {
        let deadline = Deadline::new(Duration::from_secs(5));
        let ctx = MoveContext {
            cost: dm,
            demands,
            capacities,
            depot: 0,
            deadline: &deadline,
        };
        or_opt(plan, &ctx)
    }

    /// Depot plus two tight pairs: (1, 2) east and (3, 4) west.
    fn pairs() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 5.0, 5.0, 5.0],
            vec![5.0, 0.0, 1.0, 20.0, 20.0],
            vec![5.0, 1.0, 0.0, 20.0, 20.0],
            vec![5.0, 20.0, 20.0, 0.0, 1.0],
            vec![5.0, 20.0, 20.0, 1.0, 0.0],
        ])
        .expect("square")
    }

    #[test]
    fn test_moves_pair_to_other_route() {
        let dm = pairs();
        let demands = [0.0, 1.0, 1.0, 1.0, 1.0];
        // route 0 carries both pairs, route 1 is empty
        let mut plan = RoutePlan::from_routes(vec![vec![1, 2, 3, 4], vec![]], &demands);
        let before = plan.cost(&dm, 0);
        assert!(run(&mut plan, &dm, &demands, &[4.0, 4.0]));
        assert!(plan.cost(&dm, 0) < before);
        assert_eq!(plan.num_served(), 4);
        assert!((plan.loads().iter().sum::<f64>() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_capacity_blocks_move() {
        let dm = pairs();
        let demands = [0.0, 1.0, 1.0, 1.0, 1.0];
        let mut plan = RoutePlan::from_routes(vec![vec![1, 2, 3, 4], vec![]], &demands);
        assert!(!run(&mut plan, &dm, &demands, &[4.0, 1.0]));
    }

    #[test]
    fn test_moves_segment_within_route() {
        // line 0 - 1 - 2 - 3 - 4
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![1.0, 0.0, 1.0, 2.0, 3.0],
            vec![2.0, 1.0, 0.0, 1.0, 2.0],
            vec![3.0, 2.0, 1.0, 0.0, 1.0],
            vec![4.0, 3.0, 2.0, 1.0, 0.0],
        ])
        .expect("square");
        let demands = [0.0, 1.0, 1.0, 1.0, 1.0];
        // 0→4→3→1→2→0 = 4 + 1 + 2 + 1 + 2 = 10
        let mut plan = RoutePlan::from_routes(vec![vec![4, 3, 1, 2]], &demands);
        assert!(run(&mut plan, &dm, &demands, &[4.0]));
        assert!(plan.cost(&dm, 0) < 10.0);
        let mut nodes = plan.route(0).to_vec();
        nodes.sort_unstable();
        assert_eq!(nodes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_short_routes_skipped() {
        let dm = pairs();
        let demands = [0.0, 1.0, 1.0, 1.0, 1.0];
        let mut plan = RoutePlan::from_routes(vec![vec![1], vec![3]], &demands);
        assert!(!run(&mut plan, &dm, &demands, &[4.0, 4.0]));
    }
}
