//! Output records, one per truck.

use serde::Serialize;

use crate::distance::round_km;
use crate::models::{DispatchProblem, TruckRoute};

/// The result row of one truck.
///
/// `route` lists the depot and every stop with the cumulative load after it:
/// `"Total_Load: 0 @ Location: 0 -> Total_Load: 5 @ Location: 3"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckRecord {
    /// Vehicle index.
    pub id: usize,
    /// Compact rendering of the route.
    pub route: String,
    /// Total distance driven, rounded to three decimals.
    pub route_distance: f64,
    /// Total volume delivered.
    pub route_load: f64,
}

impl TruckRecord {
    /// Builds the record of an extracted route.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::models::{DispatchProblem, Stop, TruckRoute};
    /// use u_dispatch::report::TruckRecord;
    ///
    /// let problem = DispatchProblem::from_rows(
    ///     vec![vec![0.0, 1.2345], vec![1.2345, 0.0]],
    ///     vec![0.0, 5.0],
    ///     vec![10.0],
    ///     0,
    /// )
    /// .unwrap();
    /// let mut route = TruckRoute::new(0);
    /// route.push_stop(Stop { node: 1, load_after: 5.0 });
    /// route.set_distance(2.469);
    ///
    /// let record = TruckRecord::from_route(&route, &problem);
    /// assert_eq!(record.route, "Total_Load: 0 @ Location: 0 -> Total_Load: 5 @ Location: 1");
    /// assert_eq!(record.route_distance, 2.469);
    /// ```
    pub fn from_route(route: &TruckRoute, problem: &DispatchProblem) -> Self {
        let depot = std::iter::once((0.0, problem.depot()));
        let stops = route.stops().iter().map(|s| (s.load_after, s.node));
        let rendered: Vec<String> = depot
            .chain(stops)
            .map(|(load, node)| format!("Total_Load: {load} @ Location: {node}"))
            .collect();
        Self {
            id: route.vehicle_id(),
            route: rendered.join(" -> "),
            route_distance: round_km(route.distance()),
            route_load: route.load(),
        }
    }
}

/// Builds one record per route.
pub fn truck_records(routes: &[TruckRoute], problem: &DispatchProblem) -> Vec<TruckRecord> {
    routes
        .iter()
        .map(|route| TruckRecord::from_route(route, problem))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    fn problem() -> DispatchProblem {
        DispatchProblem::from_rows(
            vec![
                vec![0.0, 1.0, 1.0],
                vec![1.0, 0.0, 1.0],
                vec![1.0, 1.0, 0.0],
            ],
            vec![0.0, 2.5, 4.0],
            vec![10.0, 10.0],
            0,
        )
        .expect("valid problem")
    }

    #[test]
    fn test_unused_truck() {
        let record = TruckRecord::from_route(&TruckRoute::new(1), &problem());
        assert_eq!(record.id, 1);
        assert_eq!(record.route, "Total_Load: 0 @ Location: 0");
        assert_eq!(record.route_distance, 0.0);
        assert_eq!(record.route_load, 0.0);
    }

    #[test]
    fn test_rounding_and_rendering() {
        let mut route = TruckRoute::new(0);
        route.push_stop(Stop {
            node: 2,
            load_after: 4.0,
        });
        route.push_stop(Stop {
            node: 1,
            load_after: 6.5,
        });
        route.set_distance(3.000_4);
        let record = TruckRecord::from_route(&route, &problem());
        assert_eq!(
            record.route,
            "Total_Load: 0 @ Location: 0 -> Total_Load: 4 @ Location: 2 -> \
             Total_Load: 6.5 @ Location: 1"
        );
        assert_eq!(record.route_distance, 3.0);
        assert_eq!(record.route_load, 6.5);
    }

    #[test]
    fn test_serialize() {
        let records = truck_records(&[TruckRoute::new(0)], &problem());
        let json = serde_json::to_value(&records).expect("serializable");
        assert_eq!(json[0]["id"], 0);
        assert_eq!(json[0]["route_distance"], 0.0);
        assert_eq!(json[0]["route"], "Total_Load: 0 @ Location: 0");
    }
}
