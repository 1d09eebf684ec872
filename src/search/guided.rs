//! Guided local search.
//!
//! # Algorithm
//!
//! 1. Descend to a local minimum under the real arc cost.
//! 2. Penalize the arcs of that minimum with maximum utility
//!    `d(i, j) / (1 + p(i, j))`.
//! 3. Descend again under the augmented cost `d(i, j) + λ·p(i, j)`, where
//!    `λ = penalty_factor · cost(first minimum) / arcs(first minimum)`.
//! 4. Keep the best plan seen by real cost; repeat from 2 until the deadline.
//!
//! Penalties are symmetric: penalizing `i → j` also penalizes `j → i`.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its application
//! to the traveling salesman problem", *European J. Operational Research*
//! 113(2), 469-499.

use log::{debug, trace};

use super::Deadline;
use crate::distance::{ArcCost, DistanceMatrix};
use crate::local_search::{descend, MoveContext, IMPROVEMENT_EPSILON};
use crate::models::{DispatchProblem, RoutePlan};

/// Arc penalty counters.
#[derive(Debug, Clone)]
pub struct Penalties {
    counts: Vec<u32>,
    size: usize,
}

impl Penalties {
    /// No penalties over `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
        }
    }

    /// Penalty on the arc `from → to`.
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.counts[from * self.size + to]
    }

    /// Increments the penalty of an arc and its reverse.
    pub fn increment(&mut self, from: usize, to: usize) {
        self.counts[from * self.size + to] += 1;
        if from != to {
            self.counts[to * self.size + from] += 1;
        }
    }

    /// Penalizes the arcs of `plan` whose utility `d / (1 + p)` is maximal.
    /// Returns the number of arcs penalized.
    pub fn penalize(&mut self, plan: &RoutePlan, distances: &DistanceMatrix, depot: usize) -> usize {
        let utility = |p: &Self, (from, to): (usize, usize)| {
            distances.get(from, to) / (1.0 + f64::from(p.get(from, to)))
        };
        let arcs = plan.arcs(depot);
        let max = arcs
            .iter()
            .map(|&arc| utility(self, arc))
            .fold(0.0, f64::max);
        if max <= 0.0 {
            return 0;
        }
        let chosen: Vec<(usize, usize)> = arcs
            .into_iter()
            .filter(|&arc| utility(self, arc) >= max - IMPROVEMENT_EPSILON)
            .collect();
        for &(from, to) in &chosen {
            self.increment(from, to);
            trace!("penalized arc {from} -> {to}: {}", self.get(from, to));
        }
        chosen.len()
    }
}

/// Distances plus weighted arc penalties.
pub struct GuidedCost<'a> {
    distances: &'a DistanceMatrix,
    penalties: &'a Penalties,
    lambda: f64,
}

impl<'a> GuidedCost<'a> {
    /// Augments `distances` with `lambda`-weighted `penalties`.
    pub fn new(distances: &'a DistanceMatrix, penalties: &'a Penalties, lambda: f64) -> Self {
        Self {
            distances,
            penalties,
            lambda,
        }
    }
}

impl ArcCost for GuidedCost<'_> {
    fn arc_cost(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to) + self.lambda * f64::from(self.penalties.get(from, to))
    }
}

/// Result of an improvement phase.
#[derive(Debug, Clone)]
pub struct Improvement {
    /// Best plan found by real cost.
    pub plan: RoutePlan,
    /// Its real cost.
    pub cost: f64,
    /// Improving moves applied.
    pub moves: usize,
    /// Local minima reached.
    pub local_minima: usize,
}

/// Descends to the first local minimum under the real distances.
pub fn greedy_descent(
    problem: &DispatchProblem,
    mut plan: RoutePlan,
    deadline: &Deadline,
) -> Improvement {
    let capacities = problem.capacities();
    let ctx = MoveContext {
        cost: problem.distances(),
        demands: problem.demands(),
        capacities: &capacities,
        depot: problem.depot(),
        deadline,
    };
    let moves = descend(&mut plan, &ctx);
    let cost = plan.cost(problem.distances(), problem.depot());
    debug!("local minimum {cost:.3} after {moves} moves");
    Improvement {
        plan,
        cost,
        moves,
        local_minima: 1,
    }
}

/// Runs guided local search from `plan` until `deadline` expires.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{DispatchProblem, RoutePlan};
/// use u_dispatch::search::{guided_local_search, Deadline};
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
/// let plan = RoutePlan::from_routes(vec![vec![3, 1, 2]], problem.demands());
/// let deadline = Deadline::new(Duration::from_millis(20));
/// let result = guided_local_search(&problem, plan, 0.1, &deadline);
/// assert_eq!(result.cost, 6.0);
/// ```
pub fn guided_local_search(
    problem: &DispatchProblem,
    plan: RoutePlan,
    penalty_factor: f64,
    deadline: &Deadline,
) -> Improvement {
    let first = greedy_descent(problem, plan, deadline);
    let depot = problem.depot();
    let distances = problem.distances();

    let arcs = first.plan.arcs(depot).len();
    if arcs == 0 || first.cost <= 0.0 {
        return first;
    }
    let lambda = penalty_factor * first.cost / arcs as f64;
    debug!("guided local search: lambda = {lambda:.6}");

    let capacities = problem.capacities();
    let mut penalties = Penalties::new(problem.num_nodes());
    let mut current = first.plan.clone();
    let mut best = first;

    while !deadline.expired() {
        if penalties.penalize(&current, distances, depot) == 0 {
            break;
        }
        let guided = GuidedCost::new(distances, &penalties, lambda);
        let ctx = MoveContext {
            cost: &guided,
            demands: problem.demands(),
            capacities: &capacities,
            depot,
            deadline,
        };
        best.moves += descend(&mut current, &ctx);
        best.local_minima += 1;

        let cost = current.cost(distances, depot);
        if cost < best.cost - IMPROVEMENT_EPSILON {
            debug!("new best {cost:.3} at local minimum {}", best.local_minima);
            best.plan = current.clone();
            best.cost = cost;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn line_problem() -> DispatchProblem {
        DispatchProblem::from_rows(
            vec![
                vec![0.0, 1.0, 2.0, 3.0],
                vec![1.0, 0.0, 1.0, 2.0],
                vec![2.0, 1.0, 0.0, 1.0],
                vec![3.0, 2.0, 1.0, 0.0],
            ],
            vec![0.0, 1.0, 1.0, 1.0],
            vec![2.0, 2.0],
            0,
        )
        .expect("valid problem")
    }

    #[test]
    fn test_penalties_symmetric() {
        let mut p = Penalties::new(3);
        p.increment(0, 2);
        assert_eq!(p.get(0, 2), 1);
        assert_eq!(p.get(2, 0), 1);
        assert_eq!(p.get(1, 2), 0);
    }

    #[test]
    fn test_penalize_max_utility() {
        let problem = line_problem();
        let plan = RoutePlan::from_routes(vec![vec![1, 2], vec![3]], problem.demands());
        let mut p = Penalties::new(4);
        // arcs: 0-1 (1), 1-2 (1), 2-0 (2), 0-3 (3), 3-0 (3)
        assert_eq!(p.penalize(&plan, problem.distances(), 0), 2);
        assert_eq!(p.get(0, 3), 2);
        assert_eq!(p.get(2, 0), 0);
        // utility of 0-3 drops to 1, so 2-0 now leads
        assert_eq!(p.penalize(&plan, problem.distances(), 0), 1);
        assert_eq!(p.get(0, 2), 1);
    }

    #[test]
    fn test_guided_cost() {
        let problem = line_problem();
        let mut p = Penalties::new(4);
        p.increment(1, 2);
        let cost = GuidedCost::new(problem.distances(), &p, 0.5);
        assert_eq!(cost.arc_cost(1, 2), 1.5);
        assert_eq!(cost.arc_cost(2, 1), 1.5);
        assert_eq!(cost.arc_cost(0, 3), 3.0);
    }

    #[test]
    fn test_keeps_best_and_capacity() {
        let problem = line_problem();
        let plan = RoutePlan::from_routes(vec![vec![3], vec![1, 2]], problem.demands());
        let initial = plan.cost(problem.distances(), 0);
        let deadline = Deadline::new(Duration::from_millis(30));
        let result = guided_local_search(&problem, plan, 0.1, &deadline);
        assert!(result.cost <= initial);
        assert!(result.local_minima >= 1);
        for v in 0..2 {
            assert!(result.plan.load(v) <= 2.0);
        }
        assert_eq!(result.plan.num_served(), 3);
        let real = result.plan.cost(problem.distances(), 0);
        assert!((real - result.cost).abs() < 1e-10);
    }

    #[test]
    fn test_greedy_descent_single_minimum() {
        let problem = line_problem();
        let plan = RoutePlan::from_routes(vec![vec![2, 1], vec![3]], problem.demands());
        let deadline = Deadline::new(Duration::from_secs(5));
        let result = greedy_descent(&problem, plan, &deadline);
        assert_eq!(result.local_minima, 1);
        assert!(result.cost <= 10.0);
    }
}
