//! Domain model types for truck dispatch.
//!
//! Provides orders and locations, trucks, the validated problem model, the
//! routing index space, the search's working route plan, and the solver's
//! outcomes.

mod index;
mod order;
mod plan;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use index::IndexManager;
pub use order::{Location, Order};
pub use plan::RoutePlan;
pub use problem::{fits, DispatchProblem, CAPACITY_TOLERANCE};
pub use route::{Stop, TruckRoute};
pub use solution::{Assignment, Infeasibility, SearchStats, Violation, ViolationType};
pub use vehicle::{random_capacities, Vehicle};
