//! Route evaluation: distances, load profiles and constraint checks.

mod evaluator;

pub use evaluator::PlanEvaluator;
