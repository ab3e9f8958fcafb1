//! Gauge and reading records
//!
//! A [`Gauge`] is a single measurable quantity belonging to a meter: it
//! carries the declared data type, the static min/max limits, optional
//! per-day increase rates, and the chronological list of recorded
//! [`GaugeValue`] readings. The engine only reads these fields; derived
//! statistics live in [`GaugeStatistics`](crate::stats::GaugeStatistics)
//! rather than on the gauge itself, so there is no hidden ordering
//! dependency between aggregation and validation calls.
//!
//! Readings keep their value as the raw string the operator entered (or the
//! logger emitted) and are interpreted per the gauge's [`DataType`] at
//! classification time. An empty string is normalized away at construction:
//! a reading either has a non-empty value or none at all.

use crate::errors::ParseError;
use crate::time::Timestamp;

/// Declared type of a gauge's values.
///
/// Defaults to [`DataType::Double`] when unset in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DataType {
    /// Free-form text, no numeric checks.
    String,
    /// Whole numbers, compared against the double-valued bounds.
    Integer,
    /// Decimal numbers.
    #[default]
    Double,
}

impl DataType {
    /// Interpret a raw value string according to this data type.
    ///
    /// Returns `Ok(None)` for [`DataType::String`], which has no numeric
    /// representation. Non-finite numbers (NaN, infinities) are rejected:
    /// downstream threshold math relies on every parsed value being a
    /// meaningful number.
    pub fn parse(&self, raw: &str) -> Result<Option<f64>, ParseError> {
        match self {
            Self::String => Ok(None),
            Self::Double => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(ParseError::NotDecimal(raw.to_owned())),
            },
            Self::Integer => raw
                .parse::<i64>()
                .map(|v| Some(v as f64))
                .map_err(|_| ParseError::NotInteger(raw.to_owned())),
        }
    }

    /// Whether values of this type carry a numeric interpretation.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Double)
    }
}

/// Per-gauge collection option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum GaugeOption {
    /// The gauge must have at least one reading to be valid.
    Required,
    /// The gauge may be left without readings.
    Optional,
}

/// A single recorded reading of a gauge.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaugeValue {
    /// Opaque row identifier assigned by storage, never by this engine.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub row_id: Option<i64>,

    /// Raw value string; `Some` is always non-empty.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            deserialize_with = "de_value",
            skip_serializing_if = "Option::is_none"
        )
    )]
    value: Option<String>,

    /// When the reading was taken, milliseconds since epoch.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "updated", default, skip_serializing_if = "Option::is_none")
    )]
    pub updated: Option<Timestamp>,

    /// Client-side housekeeping: whether the reading was forwarded upstream.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub sent: bool,
}

/// Empty strings on the wire become an absent value.
#[cfg(feature = "serde")]
fn de_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()))
}

impl GaugeValue {
    /// Create a reading from a raw value string.
    ///
    /// An empty string is normalized to an absent value.
    pub fn new(value: impl Into<String>, updated: Timestamp) -> Self {
        let mut reading = Self {
            updated: Some(updated),
            ..Self::default()
        };
        reading.set_value(Some(value.into()));
        reading
    }

    /// Create a reading from a number, formatted for display.
    pub fn from_number(value: f64, updated: Timestamp) -> Self {
        Self::new(display_number(value), updated)
    }

    /// The raw value string, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Replace the value, normalizing an empty string to absent.
    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value.filter(|s| !s.is_empty());
    }
}

/// Round to two decimals and drop trailing zeros, matching how the
/// measurement forms render numbers.
pub(crate) fn display_number(value: f64) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// A single measurable quantity belonging to a meter.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gauge {
    /// Gauge identifier, unique within its meter.
    pub id: String,

    /// Human-readable name.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,

    /// Longer description shown on the measurement form.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub description: Option<String>,

    /// Measurement unit for display (e.g. `"C"`).
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub unit: Option<String>,

    /// Declared value type; defaults to double.
    #[cfg_attr(feature = "serde", serde(rename = "dataType", default))]
    pub data_type: DataType,

    /// Static lower limit.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub min: Option<f64>,

    /// Static upper limit.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub max: Option<f64>,

    /// Configured minimum increase per day.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "minIncrease",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub min_increase: Option<f64>,

    /// Configured maximum increase per day.
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "maxIncrease",
            default,
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub max_increase: Option<f64>,

    /// Whether values represent a running total that only increases.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cumulative: bool,

    /// Collection options for this gauge.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "option", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub options: Vec<GaugeOption>,

    /// Recorded readings, chronological oldest first by convention.
    ///
    /// The statistics aggregator re-sorts by timestamp before use, so a
    /// producer inserting newest-first does not skew the results.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub values: Vec<GaugeValue>,
}

impl Gauge {
    /// Create an empty gauge with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Whether the given option is set on this gauge.
    pub fn has_option(&self, option: GaugeOption) -> bool {
        self.options.contains(&option)
    }

    /// Append a reading.
    pub fn push_value(&mut self, value: GaugeValue) {
        self.values.push(value);
    }

    /// Gauge identity is compared by id.
    pub fn same_gauge(&self, other: &Gauge) -> bool {
        !self.id.is_empty() && self.id == other.id
    }

    /// Mark every reading as sent (or unsent).
    pub fn mark_sent(&mut self, sent: bool) {
        for value in &mut self.values {
            value.sent = sent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_normalized_to_absent() {
        let reading = GaugeValue::new("", 1000);
        assert_eq!(reading.value(), None);

        let mut reading = GaugeValue::new("5.0", 1000);
        assert_eq!(reading.value(), Some("5.0"));
        reading.set_value(Some(String::new()));
        assert_eq!(reading.value(), None);
    }

    #[test]
    fn parse_per_data_type() {
        assert_eq!(DataType::Double.parse("5.5"), Ok(Some(5.5)));
        assert_eq!(DataType::Integer.parse("42"), Ok(Some(42.0)));
        assert_eq!(DataType::String.parse("anything"), Ok(None));

        assert!(DataType::Double.parse("abc").is_err());
        assert!(DataType::Integer.parse("5.5").is_err());
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert!(DataType::Double.parse("NaN").is_err());
        assert!(DataType::Double.parse("inf").is_err());
    }

    #[test]
    fn display_formatting_trims_trailing_zeros() {
        assert_eq!(display_number(10.0), "10");
        assert_eq!(display_number(10.456), "10.46");
        assert_eq!(display_number(0.5), "0.5");
    }

    #[test]
    fn gauge_identity_by_id() {
        let a = Gauge::new("g1");
        let mut b = Gauge::new("g1");
        b.name = Some("other fields differ".into());
        assert!(a.same_gauge(&b));

        let c = Gauge::new("g2");
        assert!(!a.same_gauge(&c));

        // Missing ids never match
        assert!(!Gauge::new("").same_gauge(&Gauge::new("")));
    }

    #[test]
    fn mark_sent_cascades_to_values() {
        let mut gauge = Gauge::new("g1");
        gauge.push_value(GaugeValue::new("1", 100));
        gauge.push_value(GaugeValue::new("2", 200));

        gauge.mark_sent(true);
        assert!(gauge.values.iter().all(|v| v.sent));
    }
}
