//! Solution extraction and per-truck result records.

mod extract;
mod record;

pub use extract::extract_routes;
pub use record::{truck_records, TruckRecord};
