//! Effective bound computation
//!
//! Static min/max limits go stale on cumulative gauges: a running total
//! climbs past any fixed ceiling eventually. The effective bound is
//! therefore re-derived on every call from the most recent reading plus an
//! expected rate of change - either the configured per-day increase or the
//! historical average rate - with the static limits acting as an absolute
//! ceiling/floor only where tighter. Non-cumulative gauges keep their
//! static limits unchanged.
//!
//! A parse failure of the last recorded value never aborts the
//! calculation; it is logged and the static bound is used instead.

use log::{debug, warn};

use crate::gauge::{display_number, Gauge, GaugeValue};
use crate::stats::GaugeStatistics;
use crate::time::{days_between, TimeSource, Timestamp};

/// Effective validation bounds for one gauge, both optional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Effective lower limit.
    pub min: Option<f64>,
    /// Effective upper limit.
    pub max: Option<f64>,
}

impl Bounds {
    /// Render the `"min – max (unit)"` hint shown next to an input field.
    ///
    /// Missing sides are left blank around the en dash; the result is empty
    /// when neither bound is set.
    pub fn display(&self, unit: Option<&str>) -> String {
        if self.min.is_none() && self.max.is_none() {
            return String::new();
        }
        let mut out = String::new();
        if let Some(min) = self.min {
            out.push_str(&display_number(min));
        }
        out.push_str(" \u{2013} ");
        if let Some(max) = self.max {
            out.push_str(&display_number(max));
        }
        if let Some(unit) = unit {
            out.push_str(" (");
            out.push_str(unit);
            out.push(')');
        }
        out
    }
}

/// Derives effective min/max bounds from static limits, configured daily
/// increase rates, and the gauge's statistics.
///
/// Holds the single `now` timestamp the projection is anchored to; build it
/// from an injected [`TimeSource`] so tests can freeze the clock.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdCalculator {
    now: Timestamp,
}

impl ThresholdCalculator {
    /// Anchor the calculation at the given instant.
    pub fn at(now: Timestamp) -> Self {
        Self { now }
    }

    /// Anchor the calculation at the clock's current time, read once.
    pub fn from_clock(clock: &dyn TimeSource) -> Self {
        Self { now: clock.now() }
    }

    /// Both effective bounds as a pair.
    pub fn bounds(&self, gauge: &Gauge, stats: &GaugeStatistics) -> Bounds {
        Bounds {
            min: self.min_limit(gauge, stats),
            max: self.max_limit(gauge, stats),
        }
    }

    /// Effective upper limit.
    ///
    /// Non-cumulative gauges use the static `max` unchanged. Cumulative
    /// gauges project forward from the last reading: by the configured
    /// `max_increase` per day when set, otherwise by twice the historical
    /// average daily rate (the doubling compensates for the missing
    /// explicit rate). The static `max` still caps the projection.
    pub fn max_limit(&self, gauge: &Gauge, stats: &GaugeStatistics) -> Option<f64> {
        if !gauge.cumulative {
            return gauge.max;
        }

        let projected = if let Some(max_increase) = gauge.max_increase {
            let Some(last) = &stats.last_value else {
                debug!("gauge {}: previous value unknown, using static max", gauge.id);
                return gauge.max;
            };
            let Some((updated, value)) = numeric_reading(&gauge.id, last) else {
                return gauge.max;
            };
            value + max_increase * days_between(updated, self.now)
        } else {
            let (Some(last), Some(average)) = (&stats.last_value, stats.average) else {
                return gauge.max;
            };
            let Some((updated, value)) = numeric_reading(&gauge.id, last) else {
                return gauge.max;
            };
            value + average * days_between(updated, self.now) * 2.0
        };

        match gauge.max {
            Some(max) if projected >= max => Some(max),
            _ => Some(projected),
        }
    }

    /// Effective lower limit.
    ///
    /// A cumulative numeric counter cannot validly decrease, so when
    /// history is available the floor is anchored to the last reading plus
    /// a quarter of the average daily rate, overriding any static `min`.
    /// Otherwise the configured `min_increase` projects the floor forward,
    /// with the static `min` as an absolute floor where higher.
    pub fn min_limit(&self, gauge: &Gauge, stats: &GaugeStatistics) -> Option<f64> {
        if gauge.cumulative && gauge.data_type.is_numeric() {
            if let (Some(last), Some(average)) = (&stats.last_value, stats.average) {
                return match numeric_reading(&gauge.id, last) {
                    Some((updated, value)) => {
                        Some(value + average / 4.0 * days_between(updated, self.now))
                    }
                    None => gauge.min,
                };
            }
        }

        let Some(min_increase) = gauge.min_increase else {
            return gauge.min;
        };
        let Some(last) = &stats.last_value else {
            debug!("gauge {}: previous value unknown, using static min", gauge.id);
            return gauge.min;
        };
        let Some((updated, value)) = numeric_reading(&gauge.id, last) else {
            return gauge.min;
        };

        let projected = value + min_increase * days_between(updated, self.now);
        match gauge.min {
            Some(min) if projected <= min => Some(min),
            _ => Some(projected),
        }
    }
}

/// Timestamp and numeric value of a reading, or `None` (logged) when the
/// value cannot anchor a projection.
fn numeric_reading(gauge_id: &str, last: &GaugeValue) -> Option<(Timestamp, f64)> {
    let updated = last.updated?;
    let raw = last.value()?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some((updated, value)),
        _ => {
            warn!("gauge {gauge_id}: last value `{raw}` is not numeric, using static limit");
            None
        }
    }
}
