//! Route search engine.
//!
//! [`solve`] builds a first solution with a constructive heuristic, repairs
//! it if customers were left over, and improves it with local search under a
//! wall-clock [`Deadline`], guided by arc penalties by default.

mod deadline;
mod guided;
mod params;
mod solver;

pub use deadline::Deadline;
pub use guided::{greedy_descent, guided_local_search, GuidedCost, Improvement, Penalties};
pub use params::{FirstSolutionStrategy, Metaheuristic, SearchParameters};
pub use solver::{solve, SolveOutcome};
