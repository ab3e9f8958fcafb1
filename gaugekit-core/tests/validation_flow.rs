//! End-to-end flow: aggregate history, derive bounds, classify readings.
//!
//! Mirrors how the measurement form and the server use the engine: the
//! statistics come from stored history, the classification runs over the
//! newly entered readings, and alerts are raised from the same structures.

use gaugekit_core::{
    alerts::{self, AlertKind},
    Bounds, Gauge, GaugeStatistics, GaugeValidator, GaugeValue, Meter, ThresholdCalculator,
    ValueValidity,
};

const DAY_MS: u64 = 86_400_000;

/// Cumulative history: 90 at day 0, 100 at day 1. Average daily rate 10.
fn history() -> Gauge {
    let mut gauge = Gauge::new("water-total");
    gauge.cumulative = true;
    gauge.push_value(GaugeValue::new("90", 0));
    gauge.push_value(GaugeValue::new("100", DAY_MS));
    gauge
}

#[test]
fn newest_entry_on_the_static_boundary_is_valid() {
    let mut gauge = history();
    gauge.max = Some(100.0);

    let stats = GaugeStatistics::compute(&gauge);
    assert_eq!(stats.average, Some(10.0));

    // Anchored at the last reading: zero elapsed days, so the projected
    // bounds collapse onto the last value itself.
    let validator = GaugeValidator::at(DAY_MS);
    let bounds = validator.thresholds().bounds(&gauge, &stats);
    assert_eq!(bounds.max, Some(100.0));
    assert_eq!(bounds.min, Some(100.0));

    let newest = stats.last_value.clone().expect("history has readings");
    assert_eq!(
        GaugeValidator::classify_value(&newest, gauge.data_type, &bounds),
        ValueValidity::Valid
    );
}

#[test]
fn projected_bounds_flag_a_runaway_counter() {
    let gauge = history();
    let stats = GaugeStatistics::compute(&gauge);

    // One day after the last reading, no configured rates:
    // ceiling = 100 + 10 * 1 * 2, floor = 100 + 10/4 * 1
    let calc = ThresholdCalculator::at(2 * DAY_MS);
    let bounds = calc.bounds(&gauge, &stats);
    assert_eq!(bounds.max, Some(120.0));
    assert_eq!(bounds.min, Some(102.5));

    let classify = |raw: &str| {
        GaugeValidator::classify_value(
            &GaugeValue::new(raw, 2 * DAY_MS),
            gauge.data_type,
            &bounds,
        )
    };
    assert_eq!(classify("110"), ValueValidity::Valid);
    assert_eq!(classify("200"), ValueValidity::AboveThreshold);
    // A running total must not fall back below the derived floor
    assert_eq!(classify("95"), ValueValidity::BelowThreshold);
}

#[test]
fn stale_history_keeps_static_bounds() {
    // Two readings sharing one timestamp: no usable rate sample
    let mut gauge = Gauge::new("water-total");
    gauge.cumulative = true;
    gauge.max = Some(500.0);
    gauge.push_value(GaugeValue::new("90", DAY_MS));
    gauge.push_value(GaugeValue::new("100", DAY_MS));

    let stats = GaugeStatistics::compute(&gauge);
    assert_eq!(stats.average, None);

    let calc = ThresholdCalculator::at(2 * DAY_MS);
    assert_eq!(calc.max_limit(&gauge, &stats), Some(500.0));
}

#[test]
fn range_hint_follows_the_effective_bounds() {
    let gauge = history();
    let stats = GaugeStatistics::compute(&gauge);

    let bounds = ThresholdCalculator::at(2 * DAY_MS).bounds(&gauge, &stats);
    assert_eq!(bounds.display(Some("m3")), "102.5 \u{2013} 120 (m3)");
    assert_eq!(Bounds::default().display(Some("m3")), "");
}

#[test]
fn meter_verdict_and_alerts_agree() {
    let mut temperature = Gauge::new("temperature");
    temperature.min = Some(0.0);
    temperature.max = Some(30.0);
    temperature.push_value(GaugeValue::new("21.5", 1000));
    temperature.push_value(GaugeValue::new("35.0", 2000));

    let mut note = Gauge::new("note");
    note.data_type = gaugekit_core::DataType::String;

    let mut meter = Meter::new("tag-1");
    meter.push_gauge(temperature);
    meter.push_gauge(note);

    let validator = GaugeValidator::at(3000);
    assert_eq!(
        validator.classify_meter(&meter),
        ValueValidity::AboveThreshold
    );

    let alerts = alerts::scan_meter(&meter, &validator);
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].kind, AlertKind::AboveMaximum);
    assert_eq!(alerts[0].gauge_id, "temperature");
    assert_eq!(alerts[0].tag_id, "tag-1");
    assert_eq!(alerts[0].value.value(), Some("35.0"));
}

#[test]
fn parsed_logger_data_and_form_input_are_treated_identically() {
    // Same readings, one gauge populated as a parser would (oldest first),
    // one as the form does (newest first)
    let readings = [("5.0", 1000u64), ("12.0", 2000), ("7.5", 3000)];

    let mut from_parser = Gauge::new("g");
    from_parser.max = Some(10.0);
    for (raw, ts) in readings {
        from_parser.push_value(GaugeValue::new(raw, ts));
    }

    let mut from_form = from_parser.clone();
    from_form.values.reverse();

    let validator = GaugeValidator::at(4000);
    assert_eq!(
        GaugeStatistics::compute(&from_parser),
        GaugeStatistics::compute(&from_form)
    );
    assert_eq!(
        validator.classify_gauge(&from_parser),
        validator.classify_gauge(&from_form)
    );
}
