//! Local search operators for improving dispatch plans.
//!
//! - [`relocate`]: Move one customer to another position, same or other route
//! - [`or_opt`]: Move a segment of 2–3 customers, optionally reversed
//! - [`two_opt`]: Intra-route segment reversal
//! - [`exchange`]: Inter-route tail exchange (2-opt*)
//!
//! Every operator is first-improvement: it applies the first move that lowers
//! the plan cost under the context's [`ArcCost`] and reports whether it found
//! one. No move ever pushes a route over its vehicle's capacity. Operators
//! assume symmetric arc costs.

mod exchange;
mod or_opt;
mod relocate;
mod two_opt;

pub use exchange::exchange;
pub use or_opt::or_opt;
pub use relocate::relocate;
pub use two_opt::two_opt;

use crate::distance::ArcCost;
use crate::models::RoutePlan;
use crate::search::Deadline;

/// A move must lower the cost by more than this to count as improving.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Everything a move needs besides the plan itself.
pub struct MoveContext<'a, C: ArcCost + ?Sized> {
    /// Arc cost the moves minimize.
    pub cost: &'a C,
    /// Demand per node.
    pub demands: &'a [f64],
    /// Capacity per vehicle.
    pub capacities: &'a [f64],
    /// Depot node.
    pub depot: usize,
    /// Scans stop early once this expires.
    pub deadline: &'a Deadline,
}

/// The neighborhoods explored by the search, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighborhood {
    /// See [`relocate`].
    Relocate,
    /// See [`or_opt`].
    OrOpt,
    /// See [`two_opt`].
    TwoOpt,
    /// See [`exchange`].
    Exchange,
}

impl Neighborhood {
    /// All neighborhoods in application order.
    pub const ALL: [Neighborhood; 4] = [
        Neighborhood::TwoOpt,
        Neighborhood::Relocate,
        Neighborhood::OrOpt,
        Neighborhood::Exchange,
    ];

    /// Applies the first improving move of this neighborhood, if any.
    pub fn apply<C: ArcCost + ?Sized>(self, plan: &mut RoutePlan, ctx: &MoveContext<'_, C>) -> bool {
        match self {
            Self::Relocate => relocate(plan, ctx),
            Self::OrOpt => or_opt(plan, ctx),
            Self::TwoOpt => two_opt(plan, ctx),
            Self::Exchange => exchange(plan, ctx),
        }
    }
}

/// Applies improving moves until no neighborhood finds one or the deadline
/// expires. Returns the number of moves applied.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DispatchProblem, RoutePlan};
/// use u_dispatch::local_search::{descend, MoveContext};
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
/// let mut plan = RoutePlan::from_routes(vec![vec![2, 1, 3]], problem.demands());
/// let capacities = problem.capacities();
/// let deadline = Deadline::new(Duration::from_secs(1));
/// let ctx = MoveContext {
///     cost: problem.distances(),
///     demands: problem.demands(),
///     capacities: &capacities,
///     depot: 0,
///     deadline: &deadline,
/// };
/// descend(&mut plan, &ctx);
/// assert_eq!(plan.cost(problem.distances(), 0), 6.0);
/// ```
pub fn descend<C: ArcCost + ?Sized>(plan: &mut RoutePlan, ctx: &MoveContext<'_, C>) -> usize {
    let mut moves = 0;
    while !ctx.deadline.expired() {
        let improved = Neighborhood::ALL.iter().any(|n| n.apply(plan, ctx));
        if !improved {
            break;
        }
        moves += 1;
    }
    moves
}

/// Node before position `pos` of a route, or the depot.
fn before(route: &[usize], pos: usize, depot: usize) -> usize {
    if pos == 0 {
        depot
    } else {
        route[pos - 1]
    }
}

/// Node at position `pos` of a route, or the depot past the end.
fn at(route: &[usize], pos: usize, depot: usize) -> usize {
    route.get(pos).copied().unwrap_or(depot)
}

/// Cost change of inserting `node` before position `pos` of `route`.
pub(crate) fn insertion_delta<C: ArcCost + ?Sized>(
    cost: &C,
    route: &[usize],
    pos: usize,
    node: usize,
    depot: usize,
) -> f64 {
    let prev = before(route, pos, depot);
    let next = at(route, pos, depot);
    cost.arc_cost(prev, node) + cost.arc_cost(node, next) - cost.arc_cost(prev, next)
}

/// Cost change of removing `len` customers starting at `start` from `route`.
fn removal_delta<C: ArcCost + ?Sized>(
    cost: &C,
    route: &[usize],
    start: usize,
    len: usize,
    depot: usize,
) -> f64 {
    let prev = before(route, start, depot);
    let next = at(route, start + len, depot);
    cost.arc_cost(prev, next)
        - cost.arc_cost(prev, route[start])
        - cost.arc_cost(route[start + len - 1], next)
}
