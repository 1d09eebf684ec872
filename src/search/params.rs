//! Search configuration.

use crate::error::ConfigurationError;
use serde::Deserialize;
use std::time::Duration;

/// How the first solution is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirstSolutionStrategy {
    /// Extend routes with the cheapest arc from their last node.
    #[default]
    PathCheapestArc,
    /// Insert the customer with the least marginal cost at its best position.
    CheapestInsertion,
}

/// How the first solution is improved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metaheuristic {
    /// Penalize features of local minima and keep searching until the
    /// deadline.
    #[default]
    GuidedLocalSearch,
    /// Stop at the first local minimum.
    GreedyDescent,
}

/// Parameters of [`solve`](crate::search::solve).
///
/// # Examples
///
/// ```
/// use u_dispatch::search::{Metaheuristic, SearchParameters};
///
/// let params = SearchParameters::default()
///     .with_time_limit_secs(0.5)
///     .with_metaheuristic(Metaheuristic::GreedyDescent);
/// assert!(params.validate().is_ok());
/// assert!(SearchParameters::default().with_time_limit_secs(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchParameters {
    /// Wall-clock budget of the improvement phase, in seconds. Default 1.
    pub time_limit_secs: f64,
    /// Construction heuristic. Default [`FirstSolutionStrategy::PathCheapestArc`].
    pub first_solution: FirstSolutionStrategy,
    /// Improvement strategy. Default [`Metaheuristic::GuidedLocalSearch`].
    pub metaheuristic: Metaheuristic,
    /// Scales the guided local search penalty weight. Default 0.1.
    pub penalty_factor: f64,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            time_limit_secs: 1.0,
            first_solution: FirstSolutionStrategy::default(),
            metaheuristic: Metaheuristic::default(),
            penalty_factor: 0.1,
        }
    }
}

impl SearchParameters {
    /// Sets the time limit in seconds.
    pub fn with_time_limit_secs(mut self, secs: f64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Sets the construction heuristic.
    pub fn with_first_solution(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution = strategy;
        self
    }

    /// Sets the improvement strategy.
    pub fn with_metaheuristic(mut self, metaheuristic: Metaheuristic) -> Self {
        self.metaheuristic = metaheuristic;
        self
    }

    /// Sets the guided local search penalty factor.
    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    /// Checks that the time limit is a positive [`Duration`] and the penalty
    /// factor is positive and finite.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let representable = Duration::try_from_secs_f64(self.time_limit_secs).is_ok();
        if !representable || self.time_limit_secs <= 0.0 {
            return Err(ConfigurationError::InvalidTimeLimit(self.time_limit_secs));
        }
        if !self.penalty_factor.is_finite() || self.penalty_factor <= 0.0 {
            return Err(ConfigurationError::InvalidPenaltyFactor(self.penalty_factor));
        }
        Ok(())
    }

    /// The time limit as a [`Duration`].
    ///
    /// Limits that [`validate`](Self::validate) rejects map to zero.
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs).unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = SearchParameters::default();
        assert_eq!(params.time_limit_secs, 1.0);
        assert_eq!(params.first_solution, FirstSolutionStrategy::PathCheapestArc);
        assert_eq!(params.metaheuristic, Metaheuristic::GuidedLocalSearch);
        assert_eq!(params.penalty_factor, 0.1);
        assert_eq!(params.time_limit(), Duration::from_secs(1));
    }

    #[test]
    fn test_invalid_time_limit() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = SearchParameters::default().with_time_limit_secs(secs);
            assert!(matches!(
                params.validate(),
                Err(ConfigurationError::InvalidTimeLimit(_))
            ));
        }
    }

    #[test]
    fn test_time_limit_beyond_duration() {
        let params = SearchParameters::default().with_time_limit_secs(1e300);
        assert_eq!(
            params.validate(),
            Err(ConfigurationError::InvalidTimeLimit(1e300))
        );
        assert_eq!(params.time_limit(), Duration::ZERO);

        let long = SearchParameters::default().with_time_limit_secs(86_400.0 * 365.0);
        assert!(long.validate().is_ok());
        assert_eq!(long.time_limit(), Duration::from_secs(86_400 * 365));
    }

    #[test]
    fn test_invalid_penalty_factor() {
        let params = SearchParameters::default().with_penalty_factor(0.0);
        assert_eq!(
            params.validate(),
            Err(ConfigurationError::InvalidPenaltyFactor(0.0))
        );
    }

    #[test]
    fn test_deserialize_partial() {
        let params: SearchParameters =
            serde_json::from_str(r#"{"timeLimitSecs": 2.5, "firstSolution": "cheapestInsertion"}"#)
                .expect("valid json");
        assert_eq!(params.time_limit_secs, 2.5);
        assert_eq!(params.first_solution, FirstSolutionStrategy::CheapestInsertion);
        assert_eq!(params.metaheuristic, Metaheuristic::GuidedLocalSearch);
        assert_eq!(params.penalty_factor, 0.1);
    }
}
