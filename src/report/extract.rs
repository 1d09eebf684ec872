//! Reads truck routes back out of an assignment.

use crate::distance::ArcCost;
use crate::models::{Assignment, DispatchProblem, Stop, TruckRoute};

/// Walks each vehicle's successor links from its start index to its end
/// index and returns one [`TruckRoute`] per vehicle, in vehicle order.
///
/// Loads accumulate from zero at the depot. The distance covers both depot
/// legs; unused trucks get no stops and zero distance.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Assignment, DispatchProblem, IndexManager};
/// use u_dispatch::report::extract_routes;
///
/// let problem = DispatchProblem::from_rows(
///     vec![vec![0.0, 3.0], vec![3.0, 0.0]],
///     vec![0.0, 4.0],
///     vec![10.0, 10.0],
///     0,
/// )
/// .unwrap();
/// let manager = IndexManager::new(2, 2, 0);
/// let assignment = Assignment::from_routes(manager, &[vec![1], vec![]], 6.0).unwrap();
///
/// let routes = extract_routes(&problem, &assignment);
/// assert_eq!(routes[0].path(0), vec![0, 1, 0]);
/// assert_eq!(routes[0].distance(), 6.0);
/// assert_eq!(routes[0].load(), 4.0);
/// assert!(routes[1].is_empty());
/// ```
pub fn extract_routes(problem: &DispatchProblem, assignment: &Assignment) -> Vec<TruckRoute> {
    let manager = assignment.manager();
    let distances = problem.distances();

    (0..manager.num_vehicles())
        .map(|vehicle| {
            let mut route = TruckRoute::new(vehicle);
            let mut load = 0.0;
            let mut index = assignment.next(manager.start(vehicle));
            while !manager.is_end(index) {
                let node = manager.index_to_node(index);
                load += problem.demand(node);
                route.push_stop(Stop {
                    node,
                    load_after: load,
                });
                index = assignment.next(index);
            }
            route.set_distance(distances.route_cost(&route.nodes(), problem.depot()));
            route
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndexManager;

    fn problem() -> DispatchProblem {
        DispatchProblem::from_rows(
            vec![
                vec![0.0, 5.0, 8.0, 12.0],
                vec![5.0, 0.0, 3.0, 7.0],
                vec![8.0, 3.0, 0.0, 4.0],
                vec![12.0, 7.0, 4.0, 0.0],
            ],
            vec![0.0, 2.0, 3.0, 4.0],
            vec![5.0, 10.0],
            0,
        )
        .expect("valid problem")
    }

    #[test]
    fn test_cumulative_loads() {
        let problem = problem();
        let assignment =
            Assignment::from_routes(IndexManager::new(4, 2, 0), &[vec![2], vec![1, 3]], 36.0)
                .expect("valid");
        let routes = extract_routes(&problem, &assignment);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].nodes(), vec![2]);
        assert_eq!(routes[0].distance(), 16.0);
        let loads: Vec<f64> = routes[1].stops().iter().map(|s| s.load_after).collect();
        assert_eq!(loads, vec![2.0, 6.0]);
        assert_eq!(routes[1].load(), 6.0);
        assert_eq!(routes[1].distance(), 5.0 + 7.0 + 12.0);
        assert_eq!(routes[1].vehicle_id(), 1);
    }

    #[test]
    fn test_idempotent() {
        let problem = problem();
        let assignment =
            Assignment::from_routes(IndexManager::new(4, 2, 0), &[vec![], vec![3, 2, 1]], 24.0)
                .expect("valid");
        assert_eq!(
            extract_routes(&problem, &assignment),
            extract_routes(&problem, &assignment)
        );
    }
}
