//! Threshold alerts
//!
//! The server raises an alert when readings land outside a gauge's
//! effective bounds. Only the most recent violation in each direction
//! matters per gauge - a logger file dump can contain hundreds of
//! out-of-range samples, and the operator cares about the latest low and
//! the latest high, not every single one. The scan consumes the same
//! in-memory structures as live form input, so parsed logger data and
//! operator-entered readings are treated identically.

use crate::gauge::GaugeValue;
use crate::meter::Meter;
use crate::stats::GaugeStatistics;
use crate::validity::{GaugeValidator, ValueValidity};

/// Direction of a threshold violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AlertKind {
    /// A reading fell below the effective minimum.
    BelowMinimum,
    /// A reading exceeded the effective maximum.
    AboveMaximum,
}

/// Handling state of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AlertStatus {
    /// Raised and not yet seen by anyone.
    New,
    /// Acknowledged; superseded by newer data.
    Checked,
}

/// A raised threshold alert.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alert {
    /// The gauge whose reading violated its bounds.
    #[cfg_attr(feature = "serde", serde(rename = "gaugeId"))]
    pub gauge_id: String,

    /// The meter (tag) the gauge belongs to.
    #[cfg_attr(feature = "serde", serde(rename = "tagId"))]
    pub tag_id: String,

    /// Which bound was violated.
    pub kind: AlertKind,

    /// Handling state; scans always raise [`AlertStatus::New`] alerts.
    pub status: AlertStatus,

    /// The offending reading.
    pub value: GaugeValue,
}

/// Scan a meter's gauges for threshold violations.
///
/// For each gauge the readings are walked in chronological order against
/// the gauge's effective bounds, and at most one [`AlertKind::BelowMinimum`]
/// and one [`AlertKind::AboveMaximum`] alert is kept: the most recent
/// violation in each direction. Readings that are invalid for other
/// reasons (missing timestamp, unparseable value) do not raise alerts.
pub fn scan_meter(meter: &Meter, validator: &GaugeValidator) -> Vec<Alert> {
    let mut alerts = Vec::new();

    for gauge in &meter.gauges {
        let stats = GaugeStatistics::compute(gauge);
        let bounds = validator.thresholds().bounds(gauge, &stats);

        let mut ordered: Vec<&GaugeValue> = gauge
            .values
            .iter()
            .filter(|v| v.updated.is_some())
            .collect();
        ordered.sort_by_key(|v| v.updated);

        let mut last_low: Option<&GaugeValue> = None;
        let mut last_high: Option<&GaugeValue> = None;
        for value in ordered {
            match GaugeValidator::classify_value(value, gauge.data_type, &bounds) {
                ValueValidity::BelowThreshold => last_low = Some(value),
                ValueValidity::AboveThreshold => last_high = Some(value),
                _ => {}
            }
        }

        if let Some(value) = last_low {
            alerts.push(alert(gauge.id.clone(), meter, AlertKind::BelowMinimum, value));
        }
        if let Some(value) = last_high {
            alerts.push(alert(gauge.id.clone(), meter, AlertKind::AboveMaximum, value));
        }
    }

    alerts
}

fn alert(gauge_id: String, meter: &Meter, kind: AlertKind, value: &GaugeValue) -> Alert {
    Alert {
        gauge_id,
        tag_id: meter.id.clone(),
        kind,
        status: AlertStatus::New,
        value: value.clone(),
    }
}
