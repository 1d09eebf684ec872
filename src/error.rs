//! Error types.
//!
//! Validation and configuration problems are caller mistakes and surface as
//! errors. An infeasible fleet is an expected outcome and is reported as a
//! value instead (see [`Infeasibility`](crate::models::Infeasibility)).

use std::fmt;

/// A malformed problem model, detected before any search starts.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The distance matrix has no rows.
    EmptyMatrix,
    /// A matrix row does not have `expected` entries.
    RaggedRow {
        /// Row index.
        row: usize,
        /// Actual row length.
        len: usize,
        /// Expected row length (matrix size).
        expected: usize,
    },
    /// A distance is negative, NaN or infinite.
    InvalidDistance {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
        /// Offending value.
        value: f64,
    },
    /// A diagonal entry is not zero.
    NonZeroDiagonal {
        /// Node index.
        node: usize,
        /// Offending value.
        value: f64,
    },
    /// `d(from, to)` differs from `d(to, from)`.
    AsymmetricDistance {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
    },
    /// Demand vector length differs from the matrix size.
    DemandLength {
        /// Matrix size.
        expected: usize,
        /// Demand vector length.
        actual: usize,
    },
    /// A demand is negative, NaN or infinite.
    InvalidDemand {
        /// Node index.
        node: usize,
        /// Offending value.
        demand: f64,
    },
    /// The depot carries a demand.
    DepotDemand {
        /// Depot demand.
        demand: f64,
    },
    /// No vehicles were given.
    EmptyFleet,
    /// A capacity is negative, NaN or infinite.
    InvalidCapacity {
        /// Vehicle index.
        vehicle: usize,
        /// Offending value.
        capacity: f64,
    },
    /// The depot index is outside the matrix.
    DepotOutOfRange {
        /// Depot index.
        depot: usize,
        /// Matrix size.
        size: usize,
    },
    /// Coordinates are non-finite or outside latitude `[-90, 90]` /
    /// longitude `[-180, 180]`.
    InvalidCoordinates {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMatrix => write!(f, "distance matrix is empty"),
            Self::RaggedRow { row, len, expected } => write!(
                f,
                "distance matrix row {row} has {len} entries, expected {expected}"
            ),
            Self::InvalidDistance { from, to, value } => {
                write!(f, "invalid distance {value} from node {from} to node {to}")
            }
            Self::NonZeroDiagonal { node, value } => {
                write!(f, "distance from node {node} to itself is {value}, expected 0")
            }
            Self::AsymmetricDistance { from, to } => {
                write!(f, "distance matrix is not symmetric at ({from}, {to})")
            }
            Self::DemandLength { expected, actual } => {
                write!(f, "expected {expected} demands, got {actual}")
            }
            Self::InvalidDemand { node, demand } => {
                write!(f, "invalid demand {demand} at node {node}")
            }
            Self::DepotDemand { demand } => write!(f, "depot demand must be 0, got {demand}"),
            Self::EmptyFleet => write!(f, "at least one vehicle is required"),
            Self::InvalidCapacity { vehicle, capacity } => {
                write!(f, "invalid capacity {capacity} for vehicle {vehicle}")
            }
            Self::DepotOutOfRange { depot, size } => {
                write!(f, "depot index {depot} is outside a matrix of size {size}")
            }
            Self::InvalidCoordinates {
                latitude,
                longitude,
            } => write!(f, "invalid coordinates ({latitude}, {longitude})"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Invalid search parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The time limit is zero, negative, not finite or beyond a `Duration`.
    InvalidTimeLimit(f64),
    /// The guided local search penalty factor is not a positive finite number.
    InvalidPenaltyFactor(f64),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeLimit(secs) => {
                write!(f, "time limit must be a positive number of seconds, got {secs}")
            }
            Self::InvalidPenaltyFactor(factor) => {
                write!(f, "penalty factor must be positive, got {factor}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Any error raised by [`plan_deliveries`](crate::dispatch::plan_deliveries).
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchError {
    /// Input data failed validation.
    Validation(ValidationError),
    /// Search parameters are invalid.
    Configuration(ConfigurationError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "invalid problem: {err}"),
            Self::Configuration(err) => write!(f, "invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Configuration(err) => Some(err),
        }
    }
}

impl From<ValidationError> for DispatchError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<ConfigurationError> for DispatchError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ValidationError::RaggedRow {
            row: 2,
            len: 3,
            expected: 4,
        };
        assert_eq!(
            err.to_string(),
            "distance matrix row 2 has 3 entries, expected 4"
        );
    }

    #[test]
    fn test_dispatch_error_from() {
        let err: DispatchError = ConfigurationError::InvalidTimeLimit(0.0).into();
        assert!(matches!(err, DispatchError::Configuration(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
