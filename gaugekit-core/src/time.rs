//! Clock abstraction for threshold projection
//!
//! Effective bounds are projected forward from the last recorded reading,
//! so every calculation needs a notion of "now". The current time is read
//! once per calculation through the [`TimeSource`] trait, which keeps the
//! projection math deterministic under test.

/// Timestamp in milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Milliseconds in a day: 1000 * 60 * 60 * 24.
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Source of time for bound projection.
pub trait TimeSource {
    /// Get current timestamp in milliseconds.
    fn now(&self) -> Timestamp;
}

/// Wall clock time source backed by the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime, UNIX_EPOCH};

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Fixed time source for testing.
#[derive(Debug, Clone, Copy)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Create a source frozen at the given timestamp.
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Replace the frozen timestamp.
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the frozen timestamp forward.
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Absolute distance between two timestamps as a fractional day count.
///
/// Zero elapsed time yields 0 days, which zeroes any projected increase;
/// callers must tolerate a zero result.
pub fn days_between(a: Timestamp, b: Timestamp) -> f64 {
    a.abs_diff(b) as f64 / MS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn days_between_is_symmetric() {
        assert_eq!(days_between(0, 86_400_000), 1.0);
        assert_eq!(days_between(86_400_000, 0), 1.0);
    }

    #[test]
    fn days_between_same_instant_is_zero() {
        assert_eq!(days_between(1234, 1234), 0.0);
    }

    #[test]
    fn fractional_days() {
        // Half a day
        assert_eq!(days_between(0, 43_200_000), 0.5);
    }
}
