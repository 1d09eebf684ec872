//! The solve entry point: checks, construction, improvement, assignment.

use log::{debug, info, warn};

use super::guided::{greedy_descent, guided_local_search};
use super::{Deadline, FirstSolutionStrategy, Metaheuristic, SearchParameters};
use crate::constructive::{cheapest_insertion, pack_decreasing, path_cheapest_arc, repair};
use crate::error::ConfigurationError;
use crate::evaluation::PlanEvaluator;
use crate::models::{
    fits, Assignment, DispatchProblem, IndexManager, Infeasibility, RoutePlan, SearchStats,
};

/// Outcome of [`solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// Every customer is routed within capacity.
    Solved(Assignment),
    /// No feasible assignment was found.
    Infeasible(Infeasibility),
}

impl SolveOutcome {
    /// The assignment, if solved.
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Solved(assignment) => Some(assignment),
            Self::Infeasible(_) => None,
        }
    }

    /// Returns `true` if an assignment was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }
}

/// Solves a capacitated vehicle routing problem within the configured time
/// limit.
///
/// Construction always runs to completion; the time limit bounds the
/// improvement phase. Infeasible fleets are reported as
/// [`SolveOutcome::Infeasible`], only invalid parameters are errors.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DispatchProblem;
/// use u_dispatch::search::{solve, SearchParameters, SolveOutcome};
///
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 4.0, 4.0],
///         vec![4.0, 0.0, 2.0],
///         vec![4.0, 2.0, 0.0],
///     ],
///     vec![0.0, 5.0, 5.0],
///     vec![10.0],
///     0,
/// )
/// .unwrap();
/// let params = SearchParameters::default().with_time_limit_secs(0.05);
/// let SolveOutcome::Solved(assignment) = solve(&problem, &params).unwrap() else {
///     panic!("feasible");
/// };
/// assert_eq!(assignment.objective(), 10.0);
/// ```
pub fn solve(
    problem: &DispatchProblem,
    params: &SearchParameters,
) -> Result<SolveOutcome, ConfigurationError> {
    params.validate()?;
    let deadline = Deadline::new(params.time_limit());
    let manager = IndexManager::new(problem.num_nodes(), problem.num_vehicles(), problem.depot());

    if let Some(infeasibility) = check_capacity(problem) {
        warn!("infeasible: {infeasibility}");
        return Ok(SolveOutcome::Infeasible(infeasibility));
    }

    let mut plan = match params.first_solution {
        FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(problem),
        FirstSolutionStrategy::CheapestInsertion => cheapest_insertion(problem),
    };
    if !plan.is_complete() {
        debug!("repairing {} unassigned customers", plan.unassigned().len());
        repair(problem, &mut plan);
    }
    if !plan.is_complete() {
        debug!("repair left {:?}, packing by demand", plan.unassigned());
        match pack_decreasing(problem, &deadline) {
            Some(packed) => plan = packed,
            None => {
                let infeasibility = Infeasibility::NoFeasibleAssignment {
                    unassigned: plan.unassigned().to_vec(),
                };
                warn!("infeasible: {infeasibility}");
                return Ok(SolveOutcome::Infeasible(infeasibility));
            }
        }
    }

    let initial_cost = plan.cost(problem.distances(), problem.depot());
    debug!(
        "{:?} built {} routes, cost {initial_cost:.3}",
        params.first_solution,
        plan.routes().iter().filter(|r| !r.is_empty()).count()
    );

    let constructed = plan.clone();
    let improvement = match params.metaheuristic {
        Metaheuristic::GuidedLocalSearch => {
            guided_local_search(problem, plan, params.penalty_factor, &deadline)
        }
        Metaheuristic::GreedyDescent => greedy_descent(problem, plan, &deadline),
    };

    let stats = SearchStats {
        initial_cost,
        moves: improvement.moves,
        local_minima: improvement.local_minima,
        elapsed: deadline.elapsed(),
    };
    Ok(finish(problem, manager, [improvement.plan, constructed], stats))
}

/// Detects fleets that cannot carry the orders before any search.
fn check_capacity(problem: &DispatchProblem) -> Option<Infeasibility> {
    let max_capacity = problem.max_capacity();
    if let Some(node) = problem
        .customers()
        .find(|&node| !fits(problem.demand(node), max_capacity))
    {
        return Some(Infeasibility::OversizedOrder {
            node,
            demand: problem.demand(node),
            max_capacity,
        });
    }
    let total_demand = problem.total_demand();
    let total_capacity = problem.total_capacity();
    if !fits(total_demand, total_capacity) {
        return Some(Infeasibility::InsufficientCapacity {
            total_demand,
            total_capacity,
        });
    }
    None
}

/// Turns the first valid plan into an assignment. Plans are tried in order,
/// so the improved plan goes first and the construction result after it.
fn finish(
    problem: &DispatchProblem,
    manager: IndexManager,
    plans: impl IntoIterator<Item = RoutePlan>,
    stats: SearchStats,
) -> SolveOutcome {
    let evaluator = PlanEvaluator::new(problem);
    let mut unassigned = Vec::new();

    for plan in plans {
        let violations = evaluator.violations(plan.routes());
        let objective = evaluator.total_distance(plan.routes());
        let assignment = violations
            .is_empty()
            .then(|| Assignment::from_routes(manager.clone(), plan.routes(), objective))
            .flatten();
        match assignment {
            Some(assignment) => {
                info!(
                    "solved: objective {objective:.3}, {} moves, {} local minima in {:?}",
                    stats.moves, stats.local_minima, stats.elapsed
                );
                return SolveOutcome::Solved(assignment.with_stats(stats));
            }
            None => {
                warn!("discarding invalid plan: {violations:?}");
                unassigned = problem
                    .customers()
                    .filter(|&node| !plan.routes().iter().any(|r| r.contains(&node)))
                    .collect();
            }
        }
    }
    SolveOutcome::Infeasible(Infeasibility::NoFeasibleAssignment { unassigned })
}
