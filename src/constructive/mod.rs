//! Constructive heuristics for building initial dispatch plans.
//!
//! - [`path_cheapest_arc`]: Extend the path with the cheapest feasible arc, O(n²V)
//! - [`cheapest_insertion`]: Insert the customer with least marginal cost, O(n³)
//! - [`repair`]: Place leftover customers, largest demand first
//! - [`pack_decreasing`]: Rebuild from scratch by packing orders by demand

mod cheapest_insertion;
mod packing;
mod path_cheapest_arc;

pub use cheapest_insertion::{cheapest_insertion, repair};
pub use packing::{pack_decreasing, MIN_SEARCH_NODES};
pub use path_cheapest_arc::path_cheapest_arc;
