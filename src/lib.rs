//! # u-dispatch
//!
//! Delivery truck dispatch: assigns orders to capacity-limited trucks and
//! routes them from a shared depot, minimizing total distance (CVRP).
//!
//! ## Modules
//!
//! - [`models`]: Orders, trucks, the validated problem, routing indices, assignments
//! - [`distance`]: Distance matrix and geodesic distances on WGS-84
//! - [`evaluation`]: Route distance, load profiles, and feasibility checks
//! - [`constructive`]: First solutions (path cheapest arc, cheapest insertion, repair)
//! - [`local_search`]: Relocate, or-opt, 2-opt, and 2-opt* operators
//! - [`search`]: Time-bounded solve with guided local search
//! - [`report`]: Route extraction and per-truck records
//! - [`dispatch`]: Orders in, truck records out
//!
//! ## Quick start
//!
//! ```
//! use u_dispatch::models::DispatchProblem;
//! use u_dispatch::report::extract_routes;
//! use u_dispatch::search::{solve, SearchParameters, SolveOutcome};
//!
//! let problem = DispatchProblem::from_rows(
//!     vec![
//!         vec![0.0, 2.0, 2.0, 3.0],
//!         vec![2.0, 0.0, 1.0, 4.0],
//!         vec![2.0, 1.0, 0.0, 4.0],
//!         vec![3.0, 4.0, 4.0, 0.0],
//!     ],
//!     vec![0.0, 4.0, 4.0, 6.0],
//!     vec![10.0, 10.0],
//!     0,
//! )
//! .unwrap();
//!
//! let params = SearchParameters::default().with_time_limit_secs(0.1);
//! if let SolveOutcome::Solved(assignment) = solve(&problem, &params).unwrap() {
//!     for route in extract_routes(&problem, &assignment) {
//!         assert!(route.load() <= problem.capacity(route.vehicle_id()));
//!     }
//! }
//! ```

pub mod constructive;
pub mod dispatch;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod local_search;
pub mod models;
pub mod report;
pub mod search;
