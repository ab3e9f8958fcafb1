//! Validity and statistics engine for GaugeKit
//!
//! Field operators record periodic readings against meters identified by
//! NFC tags; this crate decides whether those readings are acceptable and
//! summarizes their history. It owns no storage, no wire format, and no UI:
//! collaborators hand in fully populated [`Meter`]/[`Gauge`] structures and
//! get classifications, statistics, effective bounds, and alerts back.
//!
//! The pieces, leaf first:
//! - [`GaugeStatistics`] derives last value, average, and median (plus
//!   per-day rate averages for cumulative gauges) from a gauge's history.
//! - [`ThresholdCalculator`] blends static limits with history-projected
//!   bounds so that running totals keep a meaningful min/max.
//! - [`GaugeValidator`] classifies values, gauges, meters, and collections
//!   into a [`ValueValidity`] verdict.
//! - [`alerts::scan_meter`] raises threshold alerts from the same
//!   structures, whether they came from a form or a parsed logger file.
//!
//! Everything is synchronous, allocation-light, and pure: the engine reads
//! the data it is given and never caches between calls. The current time
//! enters exclusively through [`TimeSource`], so projections are
//! deterministic under test.
//!
//! ```
//! use gaugekit_core::{Gauge, GaugeValue, GaugeValidator, ValueValidity};
//!
//! let mut gauge = Gauge::new("temperature");
//! gauge.min = Some(0.0);
//! gauge.max = Some(30.0);
//! gauge.push_value(GaugeValue::new("21.5", 1_700_000_000_000));
//!
//! let validator = GaugeValidator::at(1_700_000_100_000);
//! assert_eq!(validator.classify_gauge(&gauge), ValueValidity::Valid);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alerts;
pub mod errors;
pub mod gauge;
pub mod meter;
pub mod stats;
pub mod thresholds;
pub mod time;
pub mod validity;

// Public API
pub use alerts::{Alert, AlertKind, AlertStatus};
pub use errors::ParseError;
pub use gauge::{DataType, Gauge, GaugeOption, GaugeValue};
pub use meter::Meter;
pub use stats::GaugeStatistics;
pub use thresholds::{Bounds, ThresholdCalculator};
pub use time::{days_between, FixedTime, SystemClock, TimeSource, Timestamp};
pub use validity::{GaugeValidator, ValueValidity};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
