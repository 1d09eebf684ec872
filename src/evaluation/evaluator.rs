//! Plan evaluator that computes distance, load, and feasibility.

use crate::distance::ArcCost;
use crate::models::{fits, DispatchProblem, Violation, ViolationType};

/// Evaluates per-vehicle customer sequences against a problem: route
/// distances, cumulative loads, and the capacity and coverage constraints.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::DispatchProblem;
/// use u_dispatch::evaluation::PlanEvaluator;
///
/// let problem = DispatchProblem::from_rows(
///     vec![
///         vec![0.0, 5.0, 8.0],
///         vec![5.0, 0.0, 3.0],
///         vec![8.0, 3.0, 0.0],
///     ],
///     vec![0.0, 10.0, 20.0],
///     vec![100.0],
///     0,
/// )
/// .unwrap();
/// let evaluator = PlanEvaluator::new(&problem);
/// assert_eq!(evaluator.route_distance(&[1, 2]), 16.0);
/// assert!(evaluator.violations(&[vec![1, 2]]).is_empty());
/// ```
pub struct PlanEvaluator<'a> {
    problem: &'a DispatchProblem,
}

impl<'a> PlanEvaluator<'a> {
    /// Creates a new evaluator for the given problem.
    pub fn new(problem: &'a DispatchProblem) -> Self {
        Self { problem }
    }

    /// Distance of `depot → route → depot`; zero for an empty route.
    pub fn route_distance(&self, route: &[usize]) -> f64 {
        self.problem
            .distances()
            .route_cost(route, self.problem.depot())
    }

    /// Sum of all route distances.
    pub fn total_distance(&self, routes: &[Vec<usize>]) -> f64 {
        routes.iter().map(|r| self.route_distance(r)).sum()
    }

    /// Cumulative load after each stop.
    pub fn load_profile(&self, route: &[usize]) -> Vec<f64> {
        route
            .iter()
            .scan(0.0, |load, &node| {
                *load += self.problem.demand(node);
                Some(*load)
            })
            .collect()
    }

    /// Checks capacity at every prefix of every route, and that each
    /// customer is visited exactly once.
    pub fn violations(&self, routes: &[Vec<usize>]) -> Vec<Violation> {
        let mut violations = Vec::new();
        let depot = self.problem.depot();
        let mut visits = vec![0usize; self.problem.num_nodes()];

        for (vehicle, route) in routes.iter().enumerate() {
            let capacity = self.problem.capacity(vehicle);
            if let Some(&load) = self
                .load_profile(route)
                .iter()
                .find(|&&load| !fits(load, capacity))
            {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle,
                    load,
                    capacity,
                }));
            }

            for &node in route {
                if node == depot {
                    violations.push(Violation::new(ViolationType::DepotVisit { vehicle }));
                    continue;
                }
                visits[node] += 1;
                if visits[node] == 2 {
                    violations.push(Violation::new(ViolationType::DuplicateVisit { node }));
                }
            }
        }

        for node in self.problem.customers() {
            if visits[node] == 0 {
                violations.push(Violation::new(ViolationType::MissingCustomer { node }));
            }
        }

        violations
    }

    /// Returns `true` if the routes satisfy every constraint.
    pub fn is_feasible(&self, routes: &[Vec<usize>]) -> bool {
        self.violations(routes).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> DispatchProblem {
        DispatchProblem::from_rows(
            vec![
                vec![0.0, 5.0, 8.0, 10.0],
                vec![5.0, 0.0, 5.0, 6.0],
                vec![8.0, 5.0, 0.0, 4.0],
                vec![10.0, 6.0, 4.0, 0.0],
            ],
            vec![0.0, 10.0, 20.0, 15.0],
            vec![50.0, 25.0],
            0,
        )
        .expect("valid")
    }

    #[test]
    fn test_route_distance_empty() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        assert_eq!(eval.route_distance(&[]), 0.0);
    }

    #[test]
    fn test_route_distance_single() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        // depot->1 = 5, 1->depot = 5
        assert!((eval.route_distance(&[1]) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_load_profile() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        assert_eq!(eval.load_profile(&[2, 1, 3]), vec![20.0, 30.0, 45.0]);
        assert!(eval.load_profile(&[]).is_empty());
    }

    #[test]
    fn test_feasible() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        assert!(eval.is_feasible(&[vec![1, 2], vec![3]]));
        assert!((eval.total_distance(&[vec![1, 2], vec![3]]) - 38.0).abs() < 1e-10);
    }

    #[test]
    fn test_capacity_violated() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        // vehicle 1 holds 25: 15 + 20 = 35
        let violations = eval.violations(&[vec![1], vec![3, 2]]);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                vehicle: 1,
                load: 35.0,
                capacity: 25.0
            }
        );
    }

    #[test]
    fn test_missing_and_duplicate() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        let violations = eval.violations(&[vec![1, 2], vec![1]]);
        assert!(violations.contains(&Violation::new(ViolationType::DuplicateVisit { node: 1 })));
        assert!(violations.contains(&Violation::new(ViolationType::MissingCustomer { node: 3 })));
    }

    #[test]
    fn test_depot_visit() {
        let p = setup();
        let eval = PlanEvaluator::new(&p);
        let violations = eval.violations(&[vec![1, 0, 2, 3], vec![]]);
        assert_eq!(
            violations,
            vec![Violation::new(ViolationType::DepotVisit { vehicle: 0 })]
        );
    }
}
