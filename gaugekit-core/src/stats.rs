//! Historical statistics for gauge readings
//!
//! Summarizes a gauge's recorded history into the figures the rest of the
//! engine consumes: the last value, the running average, and for
//! non-cumulative gauges the median plus population variance/deviation.
//! Cumulative gauges (running totals) get a different treatment: their
//! "average" is the mean per-day rate of change between consecutive
//! readings, which is what the threshold projection needs.
//!
//! The aggregator sorts readings by timestamp before doing anything else.
//! Producers disagree on value ordering (measurement forms insert newest
//! first, storage returns oldest first), so chronological order is enforced
//! here instead of being a caller obligation.

use log::debug;

use crate::gauge::{Gauge, GaugeValue};
use crate::time::{days_between, Timestamp};

/// Derived statistics for one gauge's history.
///
/// Returned by [`GaugeStatistics::compute`] as an explicit value object;
/// the gauge itself is never mutated. Every field is genuinely absent when
/// the history cannot support it - no NaN, no infinity.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeStatistics {
    /// Mean of the numeric readings, or mean per-day rate for cumulative gauges.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub average: Option<f64>,

    /// Median of the numeric readings. Never set for cumulative gauges.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub median: Option<f64>,

    /// Population variance of the numeric readings (non-cumulative only).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub variance: Option<f64>,

    /// Population standard deviation (non-cumulative only).
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "stdDeviation",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub std_deviation: Option<f64>,

    /// The chronologically newest reading.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "lastValue", default, skip_serializing_if = "Option::is_none")
    )]
    pub last_value: Option<GaugeValue>,
}

impl GaugeStatistics {
    /// Compute statistics over the gauge's recorded history.
    ///
    /// Readings without a timestamp cannot be ordered and are skipped;
    /// readings whose value does not parse as a finite number are skipped
    /// from the numeric figures but still count for `last_value`. A single
    /// reading yields `last_value` only.
    pub fn compute(gauge: &Gauge) -> Self {
        let mut ordered: Vec<&GaugeValue> = gauge
            .values
            .iter()
            .filter(|v| v.updated.is_some())
            .collect();
        if ordered.len() < gauge.values.len() {
            debug!(
                "gauge {}: skipped {} reading(s) without a timestamp",
                gauge.id,
                gauge.values.len() - ordered.len()
            );
        }
        ordered.sort_by_key(|v| v.updated);

        let mut stats = Self::default();
        let Some(last) = ordered.last() else {
            return stats;
        };
        stats.last_value = Some((*last).clone());
        if ordered.len() < 2 {
            return stats;
        }

        // Numeric samples in chronological order.
        let samples: Vec<(Timestamp, f64)> = ordered
            .iter()
            .filter_map(|v| {
                let timestamp = v.updated?;
                let raw = v.value()?;
                match raw.parse::<f64>() {
                    Ok(n) if n.is_finite() => Some((timestamp, n)),
                    _ => {
                        debug!("gauge {}: skipping non-numeric reading `{raw}`", gauge.id);
                        None
                    }
                }
            })
            .collect();

        if gauge.cumulative {
            stats.average = cumulative_rate_average(&samples);
        } else if !samples.is_empty() {
            stats.fill_from_samples(&samples);
        }
        stats
    }

    /// Running sum plus ordered insertion into an ascending working list;
    /// O(n) per insert, fine for operator-entered history sizes.
    fn fill_from_samples(&mut self, samples: &[(Timestamp, f64)]) {
        let mut sum = 0.0;
        let mut sorted: Vec<f64> = Vec::with_capacity(samples.len());
        for &(_, value) in samples {
            let at = sorted.partition_point(|&existing| existing < value);
            sorted.insert(at, value);
            sum += value;
        }

        let count = sorted.len() as f64;
        let mean = sum / count;
        self.average = Some(mean);
        self.median = Some(median_of_sorted(&sorted));

        let variance = sorted.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count;
        self.variance = Some(variance);
        self.std_deviation = Some(variance.sqrt());
    }
}

/// Mean per-day rate of change between consecutive readings of a running
/// total. Pairs sharing a timestamp would divide by zero, and pairs where
/// the value did not increase are counter resets rather than usable rate
/// samples; both are excluded. Returns `None` when no pair qualifies.
fn cumulative_rate_average(samples: &[(Timestamp, f64)]) -> Option<f64> {
    let mut sum = 0.0;
    let mut rate_count = 0u32;
    for pair in samples.windows(2) {
        let (previous_ts, previous) = pair[0];
        let (current_ts, current) = pair[1];
        if current_ts != previous_ts && current > previous {
            sum += (current - previous) / days_between(current_ts, previous_ts);
            rate_count += 1;
        }
    }
    (rate_count > 0).then(|| sum / f64::from(rate_count))
}

/// Median of an ascending list: the middle element, or the mean of the two
/// middle elements for an even count. The list must be non-empty.
fn median_of_sorted(values: &[f64]) -> f64 {
    let count = values.len();
    let mid = count / 2;
    if count % 2 == 0 {
        (values[mid] + values[mid - 1]) / 2.0
    } else {
        values[mid]
    }
}
