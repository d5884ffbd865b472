use crate::config::ExtractionConfig;
use crate::models::{LabMeasurement, LabResult, LabStatus};

/// Default width of the `Near` band at each edge of a reference range, as a
/// fraction of the range width (`ref_high - ref_low`).
///
/// Placeholder pending confirmation against reference behavior; overridable
/// through `ExtractionConfig`.
pub const NEAR_BAND_FRACTION: f64 = 0.05;

/// Classify a value against its reference range.
///
/// - `value < ref_low` → `Low`
/// - `value > ref_high` → `High`
/// - within `band_fraction * (ref_high - ref_low)` of either edge → `Near`
/// - otherwise `Normal`
///
/// A zero-width range has no `Near` band.
///
/// # Panics
///
/// Panics if `ref_low > ref_high` or any input is not finite. The record
/// builder guarantees both, so a violation is a bug upstream.
pub fn classify_value(value: f64, ref_low: f64, ref_high: f64, band_fraction: f64) -> LabStatus {
    assert!(
        value.is_finite() && ref_low.is_finite() && ref_high.is_finite(),
        "classifier received non-finite input: value={value}, range=[{ref_low}, {ref_high}]"
    );
    assert!(
        ref_low <= ref_high,
        "classifier received inverted reference range [{ref_low}, {ref_high}]"
    );

    if value < ref_low {
        return LabStatus::Low;
    }
    if value > ref_high {
        return LabStatus::High;
    }

    let band = (ref_high - ref_low) * band_fraction;
    if band > 0.0 && (value - ref_low <= band || ref_high - value <= band) {
        LabStatus::Near
    } else {
        LabStatus::Normal
    }
}

/// Assign a status to a built measurement.
pub fn classify(measurement: LabMeasurement, config: &ExtractionConfig) -> LabResult {
    let status = classify_value(
        measurement.value,
        measurement.ref_low,
        measurement.ref_high,
        config.near_band_fraction(),
    );
    LabResult::from_measurement(measurement, status)
}

/// Classify a sequence, keeping its order.
pub fn classify_all(measurements: Vec<LabMeasurement>, config: &ExtractionConfig) -> Vec<LabResult> {
    measurements
        .into_iter()
        .map(|m| classify(m, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn status(value: f64, low: f64, high: f64) -> LabStatus {
        classify_value(value, low, high, NEAR_BAND_FRACTION)
    }

    #[test]
    fn below_range_is_low() {
        assert_eq!(status(65.0, 70.0, 100.0), LabStatus::Low);
    }

    #[test]
    fn above_range_is_high() {
        assert_eq!(status(210.0, 0.0, 200.0), LabStatus::High);
    }

    #[test]
    fn middle_of_range_is_normal() {
        assert_eq!(status(95.0, 70.0, 100.0), LabStatus::Normal);
    }

    #[test]
    fn close_to_upper_edge_is_near() {
        // Width 130, band 6.5: 128 is 2 below the upper edge
        assert_eq!(status(128.0, 0.0, 130.0), LabStatus::Near);
    }

    #[test]
    fn close_to_lower_edge_is_near() {
        assert_eq!(status(71.0, 70.0, 100.0), LabStatus::Near);
    }

    #[test]
    fn exact_edges_are_near() {
        assert_eq!(status(70.0, 70.0, 100.0), LabStatus::Near);
        assert_eq!(status(100.0, 70.0, 100.0), LabStatus::Near);
    }

    #[test]
    fn band_edge_is_inclusive() {
        // Width 100, band 5
        assert_eq!(status(95.0, 0.0, 100.0), LabStatus::Near);
        assert_eq!(status(94.0, 0.0, 100.0), LabStatus::Normal);
    }

    #[test]
    fn zero_width_range_has_no_near_band() {
        assert_eq!(status(5.0, 5.0, 5.0), LabStatus::Normal);
        assert_eq!(status(4.9, 5.0, 5.0), LabStatus::Low);
        assert_eq!(status(5.1, 5.0, 5.0), LabStatus::High);
    }

    #[test]
    fn zero_fraction_disables_near() {
        assert_eq!(classify_value(100.0, 70.0, 100.0, 0.0), LabStatus::Normal);
        assert_eq!(classify_value(100.5, 70.0, 100.0, 0.0), LabStatus::High);
    }

    #[test]
    fn wider_fraction_widens_band() {
        assert_eq!(classify_value(90.0, 70.0, 100.0, 0.05), LabStatus::Normal);
        assert_eq!(classify_value(90.0, 70.0, 100.0, 0.4), LabStatus::Near);
    }

    #[test]
    #[should_panic(expected = "inverted reference range")]
    fn inverted_range_is_a_bug() {
        status(5.0, 10.0, 1.0);
    }

    #[test]
    #[should_panic(expected = "non-finite")]
    fn nan_input_is_a_bug() {
        status(f64::NAN, 1.0, 10.0);
    }

    #[test]
    fn classify_uses_config_fraction() {
        let measurement = LabMeasurement {
            test: "LDL".into(),
            value: 120.0,
            unit: "mg/dL".into(),
            ref_low: 0.0,
            ref_high: 130.0,
        };
        let narrow = ExtractionConfig::default();
        let wide = ExtractionConfig::default().with_near_band_fraction(0.1).unwrap();
        assert_eq!(classify(measurement.clone(), &narrow).status, LabStatus::Normal);
        assert_eq!(classify(measurement, &wide).status, LabStatus::Near);
    }

    #[test]
    fn classify_all_keeps_order() {
        let make = |test: &str, value: f64| LabMeasurement {
            test: test.into(),
            value,
            unit: String::new(),
            ref_low: 10.0,
            ref_high: 20.0,
        };
        let results = classify_all(
            vec![make("a", 5.0), make("b", 15.0), make("c", 25.0)],
            &ExtractionConfig::default(),
        );
        let got: Vec<(&str, LabStatus)> = results.iter().map(|r| (r.test.as_str(), r.status)).collect();
        assert_eq!(
            got,
            vec![("a", LabStatus::Low), ("b", LabStatus::Normal), ("c", LabStatus::High)]
        );
    }

    /// Finite, moderately sized range with `low <= high`.
    fn range() -> impl Strategy<Value = (f64, f64)> {
        (-1.0e6..1.0e6f64, 0.0..1.0e6f64).prop_map(|(low, width)| (low, low + width))
    }

    proptest! {
        #[test]
        fn below_low_is_always_low((low, high) in range(), gap in 1.0e-3..1.0e6f64) {
            prop_assert_eq!(status(low - gap, low, high), LabStatus::Low);
        }

        #[test]
        fn above_high_is_always_high((low, high) in range(), gap in 1.0e-3..1.0e6f64) {
            prop_assert_eq!(status(high + gap, low, high), LabStatus::High);
        }

        #[test]
        fn inside_range_outside_band_is_normal((low, high) in range(), t in 0.1..0.9f64) {
            let width = high - low;
            prop_assume!(width > 1.0e-6);
            let value = low + width * t;
            prop_assert_eq!(status(value, low, high), LabStatus::Normal);
        }

        #[test]
        fn degenerate_range_exact_value_is_normal(v in -1.0e6..1.0e6f64) {
            prop_assert_eq!(status(v, v, v), LabStatus::Normal);
        }

        #[test]
        fn inside_range_is_never_low_or_high((low, high) in range(), t in 0.0..=1.0f64) {
            let value = (low + (high - low) * t).clamp(low, high);
            let s = status(value, low, high);
            prop_assert!(s == LabStatus::Normal || s == LabStatus::Near);
        }

        #[test]
        fn classification_is_deterministic(value in -1.0e6..1.0e6f64, (low, high) in range()) {
            prop_assert_eq!(status(value, low, high), status(value, low, high));
        }
    }
}
