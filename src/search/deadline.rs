//! Wall-clock search budget.

use std::time::{Duration, Instant};

/// A soft wall-clock deadline, started on creation.
///
/// Operators poll [`expired`](Deadline::expired) between candidate scans, so
/// the search may overrun the limit by at most one scan.
///
/// # Examples
///
/// ```
/// use u_dispatch::search::Deadline;
/// use std::time::Duration;
///
/// assert!(Deadline::new(Duration::ZERO).expired());
/// assert!(!Deadline::new(Duration::from_secs(60)).expired());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    /// Starts a deadline that expires `limit` from now.
    pub fn new(limit: Duration) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// Time elapsed since the deadline started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The configured limit.
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Returns `true` once the limit has been reached.
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.limit
    }
}
