//! End-to-end delivery planning from order records.
//!
//! Turns a list of orders (depot first) and truck capacities into one
//! [`TruckRecord`] per truck: geodesic distance matrix, problem model,
//! search, extraction, report.

use log::info;

use crate::distance::DistanceMatrix;
use crate::error::DispatchError;
use crate::models::{DispatchProblem, Infeasibility, Order, TruckRoute};
use crate::report::{extract_routes, truck_records, TruckRecord};
use crate::search::{solve, SearchParameters, SolveOutcome};

/// A solved delivery plan.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchPlan {
    /// One record per truck, in fleet order.
    pub records: Vec<TruckRecord>,
    /// The extracted routes behind the records.
    pub routes: Vec<TruckRoute>,
    /// Total distance in kilometres.
    pub objective: f64,
}

/// Outcome of [`plan_deliveries`].
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Every order is assigned to a truck.
    Planned(DispatchPlan),
    /// The fleet cannot carry the orders.
    Infeasible(Infeasibility),
}

/// Plans truck routes for `orders`, where `orders[0]` is the depot.
///
/// Distances are geodesic kilometres rounded to metres.
///
/// # Errors
///
/// Returns [`DispatchError::Validation`] for a depot with volume or invalid
/// volumes or capacities, and
/// [`DispatchError::Configuration`] for invalid parameters.
///
/// # Examples
///
/// ```
/// use u_dispatch::dispatch::{plan_deliveries, DispatchOutcome};
/// use u_dispatch::models::{Location, Order};
/// use u_dispatch::search::SearchParameters;
///
/// let at = |lat, lon| Location::new(lat, lon).unwrap();
/// let orders = vec![
///     Order::depot(at(52.52, 13.40)),
///     Order::new(at(52.53, 13.41), 10.0),
///     Order::new(at(52.51, 13.39), 15.0),
/// ];
/// let params = SearchParameters::default().with_time_limit_secs(0.05);
/// let outcome = plan_deliveries(&orders, &[30.0, 30.0], &params).unwrap();
/// let DispatchOutcome::Planned(plan) = outcome else {
///     panic!("fleet is large enough");
/// };
/// assert_eq!(plan.records.len(), 2);
/// let delivered: f64 = plan.records.iter().map(|r| r.route_load).sum();
/// assert_eq!(delivered, 25.0);
/// ```
pub fn plan_deliveries(
    orders: &[Order],
    capacities: &[f64],
    params: &SearchParameters,
) -> Result<DispatchOutcome, DispatchError> {
    params.validate()?;

    let locations: Vec<_> = orders.iter().map(|o| o.location).collect();
    let distances = DistanceMatrix::from_locations(&locations);
    let demands = orders.iter().map(|o| o.volume).collect();
    let problem = DispatchProblem::new(distances, demands, capacities.to_vec(), 0)?;

    let assignment = match solve(&problem, params)? {
        SolveOutcome::Solved(assignment) => assignment,
        SolveOutcome::Infeasible(infeasibility) => {
            return Ok(DispatchOutcome::Infeasible(infeasibility))
        }
    };

    let routes = extract_routes(&problem, &assignment);
    let records = truck_records(&routes, &problem);
    info!(
        "planned {} orders on {} of {} trucks",
        problem.num_customers(),
        routes.iter().filter(|r| !r.is_empty()).count(),
        routes.len()
    );
    Ok(DispatchOutcome::Planned(DispatchPlan {
        records,
        routes,
        objective: assignment.objective(),
    }))
}
