//! Truck type and fleet fixtures.

use rand::Rng;

/// A truck with a volume capacity. Every truck starts and ends at the depot.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Vehicle;
///
/// let v = Vehicle::new(0, 40.0);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 40.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: usize,
    capacity: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    pub fn new(id: usize, capacity: f64) -> Self {
        Self { id, capacity }
    }

    /// Vehicle ID (its index in the fleet).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }
}

/// Draws `count` whole-number capacities uniformly from `[low, high)`.
///
/// Synthetic fleets for tests and demos; the solver always takes capacities
/// as explicit input. Returns `None` if the range is empty.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::random_capacities;
///
/// let mut rng = rand::rng();
/// let caps = random_capacities(3, 30, 50, &mut rng).unwrap();
/// assert_eq!(caps.len(), 3);
/// assert!(caps.iter().all(|&c| (30.0..50.0).contains(&c)));
/// ```
pub fn random_capacities<R: Rng + ?Sized>(
    count: usize,
    low: u32,
    high: u32,
    rng: &mut R,
) -> Option<Vec<f64>> {
    if low >= high {
        return None;
    }
    Some(
        (0..count)
            .map(|_| f64::from(rng.random_range(low..high)))
            .collect(),
    )
}
