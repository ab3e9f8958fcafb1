//! Reading classification
//!
//! Decides whether recorded readings are acceptable: each value is checked
//! against the gauge's declared data type and its effective bounds, and the
//! verdicts roll up from value to gauge to meter to a whole collection of
//! meters. The UI uses the outcome to highlight fields; the server uses it
//! to reject a submission. Classification is a pure function of the data
//! passed in - nothing is cached and nothing is mutated.

use log::debug;

use crate::gauge::{DataType, Gauge, GaugeOption, GaugeValue};
use crate::meter::Meter;
use crate::stats::GaugeStatistics;
use crate::thresholds::{Bounds, ThresholdCalculator};
use crate::time::{TimeSource, Timestamp};

/// Outcome of classifying a value, gauge, meter, or collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ValueValidity {
    /// Every checked value is acceptable.
    Valid,
    /// A value is missing, unparseable, or a required gauge has no readings.
    Invalid,
    /// Nothing recorded; the neutral default.
    NoValues,
    /// A numeric value exceeds the effective maximum.
    AboveThreshold,
    /// A numeric value is below the effective minimum.
    BelowThreshold,
}

impl ValueValidity {
    /// Whether this outcome should abort an aggregation immediately.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Self::Invalid | Self::AboveThreshold | Self::BelowThreshold
        )
    }
}

/// Classifies readings against data types and effective bounds.
///
/// Carries the instant the threshold projection is anchored to; construct
/// per classification pass, typically via [`GaugeValidator::from_clock`].
#[derive(Debug, Clone, Copy)]
pub struct GaugeValidator {
    thresholds: ThresholdCalculator,
}

impl GaugeValidator {
    /// Validator anchored at the given instant.
    pub fn at(now: Timestamp) -> Self {
        Self {
            thresholds: ThresholdCalculator::at(now),
        }
    }

    /// Validator anchored at the clock's current time, read once.
    pub fn from_clock(clock: &dyn TimeSource) -> Self {
        Self {
            thresholds: ThresholdCalculator::from_clock(clock),
        }
    }

    /// The threshold calculator this validator classifies against.
    pub fn thresholds(&self) -> &ThresholdCalculator {
        &self.thresholds
    }

    /// Classify a single reading against a data type and effective bounds.
    ///
    /// A reading with no timestamp or no value is invalid outright. Numeric
    /// types must parse (a value without a parseable representation is
    /// invalid, not absent) and must sit inside the bounds, both inclusive.
    /// String readings pass without numeric checks.
    pub fn classify_value(
        value: &GaugeValue,
        data_type: DataType,
        bounds: &Bounds,
    ) -> ValueValidity {
        if value.updated.is_none() {
            return ValueValidity::Invalid;
        }
        let Some(raw) = value.value() else {
            return ValueValidity::Invalid;
        };

        match data_type.parse(raw) {
            Err(err) => {
                debug!("reading rejected: {err}");
                ValueValidity::Invalid
            }
            Ok(None) => ValueValidity::Valid,
            Ok(Some(numeric)) => {
                if let Some(min) = bounds.min {
                    if numeric < min {
                        return ValueValidity::BelowThreshold;
                    }
                }
                if let Some(max) = bounds.max {
                    if numeric > max {
                        return ValueValidity::AboveThreshold;
                    }
                }
                ValueValidity::Valid
            }
        }
    }

    /// Classify a gauge, computing fresh statistics for the threshold
    /// projection first.
    pub fn classify_gauge(&self, gauge: &Gauge) -> ValueValidity {
        self.classify_gauge_with(gauge, &GaugeStatistics::compute(gauge))
    }

    /// Classify a gauge against statistics the caller already computed.
    ///
    /// A required gauge without readings is invalid; an optional one is
    /// merely [`ValueValidity::NoValues`]. Otherwise every reading is
    /// checked in list order and the first failure wins.
    pub fn classify_gauge_with(&self, gauge: &Gauge, stats: &GaugeStatistics) -> ValueValidity {
        if gauge.values.is_empty() {
            if gauge.has_option(GaugeOption::Required) {
                return ValueValidity::Invalid;
            }
            return ValueValidity::NoValues;
        }

        let bounds = self.thresholds.bounds(gauge, stats);
        for value in &gauge.values {
            let validity = Self::classify_value(value, gauge.data_type, &bounds);
            if validity != ValueValidity::Valid {
                return validity;
            }
        }
        ValueValidity::Valid
    }

    /// Classify a meter as a whole.
    ///
    /// Failures short-circuit; a valid gauge upgrades the running verdict
    /// from [`ValueValidity::NoValues`] but gauges without readings leave
    /// it untouched, so the result does not depend on gauge order except
    /// for which failure is reported first.
    pub fn classify_meter(&self, meter: &Meter) -> ValueValidity {
        self.accumulate(meter.gauges.iter().map(|gauge| self.classify_gauge(gauge)))
    }

    /// Classify a collection of meters with the same accumulation rule as
    /// [`GaugeValidator::classify_meter`].
    pub fn classify_meters(&self, meters: &[Meter]) -> ValueValidity {
        self.accumulate(meters.iter().map(|meter| self.classify_meter(meter)))
    }

    fn accumulate(&self, outcomes: impl Iterator<Item = ValueValidity>) -> ValueValidity {
        let mut verdict = ValueValidity::NoValues;
        for outcome in outcomes {
            match outcome {
                ValueValidity::Valid => verdict = ValueValidity::Valid,
                ValueValidity::NoValues => {}
                failure => return failure,
            }
        }
        verdict
    }
}
