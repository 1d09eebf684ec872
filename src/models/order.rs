//! Order and location types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A geographic point in decimal degrees.
///
/// Latitude lies in `[-90, 90]` and longitude in `[-180, 180]`, both finite.
/// Construction and deserialization both enforce this.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Location;
///
/// let depot = Location::new(52.2297, 21.0122).unwrap();
/// assert_eq!(depot.latitude(), 52.2297);
/// assert!(Location::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Coordinates")]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

/// Unchecked wire form of a [`Location`].
#[derive(Deserialize)]
struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<Coordinates> for Location {
    type Error = ValidationError;

    fn try_from(raw: Coordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl Location {
    /// Creates a location.
    ///
    /// Fails with [`ValidationError::InvalidCoordinates`] if either
    /// coordinate is non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let in_range = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !in_range {
            return Err(ValidationError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Geodesic distance to another location in kilometres.
    pub fn distance_km(&self, other: &Location) -> f64 {
        crate::distance::geodesic_km(self, other)
    }
}

/// A delivery order: where it goes and how much truck volume it takes.
///
/// In a dispatch request the first order is the depot and carries no volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Delivery location.
    pub location: Location,
    /// Volume consumed on the truck.
    pub volume: f64,
}

impl Order {
    /// Creates an order.
    pub fn new(location: Location, volume: f64) -> Self {
        Self { location, volume }
    }

    /// Creates a zero-volume depot record.
    pub fn depot(location: Location) -> Self {
        Self::new(location, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_valid() {
        let l = Location::new(-33.8688, 151.2093).expect("valid");
        assert_eq!(l.latitude(), -33.8688);
        assert_eq!(l.longitude(), 151.2093);
    }

    #[test]
    fn test_location_invalid() {
        assert_eq!(
            Location::new(90.5, 0.0),
            Err(ValidationError::InvalidCoordinates {
                latitude: 90.5,
                longitude: 0.0
            })
        );
        assert!(Location::new(0.0, -180.1).is_err());
        assert!(Location::new(f64::NAN, 0.0).is_err());
        assert!(Location::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_location_bounds_inclusive() {
        assert!(Location::new(90.0, 180.0).is_ok());
        assert!(Location::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn test_deserialize_checks_range() {
        let ok: Location = serde_json::from_str(r#"{"latitude": 10.0, "longitude": 20.0}"#)
            .expect("in range");
        assert_eq!(ok, Location::new(10.0, 20.0).expect("valid"));
        let err = serde_json::from_str::<Location>(r#"{"latitude": 95.0, "longitude": 0.0}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let order = Order::new(Location::new(1.5, -2.5).expect("valid"), 7.0);
        let json = serde_json::to_string(&order).expect("serializable");
        let back: Order = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, order);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Location::new(1.0, 2.0).expect("valid");
        let b = Location::new(4.0, 6.0).expect("valid");
        assert!((a.distance_km(&b) - b.distance_km(&a)).abs() < 1e-9);
    }

    #[test]
    fn test_order_depot() {
        let depot = Order::depot(Location::new(0.0, 0.0).expect("valid"));
        assert_eq!(depot.volume, 0.0);
    }
}
