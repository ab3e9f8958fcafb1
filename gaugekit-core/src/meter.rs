//! Meter records
//!
//! A meter is a named collection of gauges tied to one physical measurement
//! point, identified in the field by an NFC tag id.

use crate::gauge::Gauge;

/// A named collection of gauges tied to one measurement point.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meter {
    /// Meter (tag) identifier.
    pub id: String,

    /// Human-readable name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,

    /// The gauges belonging to this meter, in display order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub gauges: Vec<Gauge>,
}

impl Meter {
    /// Create an empty meter with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Append a gauge.
    pub fn push_gauge(&mut self, gauge: Gauge) {
        self.gauges.push(gauge);
    }

    /// Meter identity is compared by id.
    pub fn same_meter(&self, other: &Meter) -> bool {
        !self.id.is_empty() && self.id == other.id
    }

    /// Mark every reading of every gauge as sent (or unsent).
    pub fn mark_sent(&mut self, sent: bool) {
        for gauge in &mut self.gauges {
            gauge.mark_sent(sent);
        }
    }
}
