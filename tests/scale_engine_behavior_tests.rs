use approx::assert_relative_eq;
use outcome_chart::ChartError;
use outcome_chart::core::{LinearScale, ScaleYType, TimeScale, ValueScale, Viewport};
use proptest::prelude::*;

#[test]
fn linear_value_scale_includes_peak_above_capacity() {
    let scale = ValueScale::from_extent(Some((0.0, 150.0)), ScaleYType::Linear, 128.0)
        .expect("scale");
    let (start, end) = scale.domain();
    assert!(start <= 0.0 && end >= 150.0);
    assert!(scale.value_to_pixel(150.0) >= 0.0);
    // capacity sits inside the band.
    let capacity_y = scale.value_to_pixel(100.0);
    assert!(capacity_y > 0.0 && capacity_y < 128.0);
}

#[test]
fn log_value_scale_remaps_zero_and_clamps_small_values() {
    let scale = ValueScale::from_extent(Some((0.0, 5_000.0)), ScaleYType::Logarithmic, 128.0)
        .expect("scale");
    assert_eq!(scale.domain(), (1.0, 10_000.0));
    assert_relative_eq!(scale.value_to_pixel(0.5), scale.value_to_pixel(1.0));
    assert_relative_eq!(scale.value_to_pixel(1.0), 128.0);
    assert_relative_eq!(scale.value_to_pixel(100.0), 64.0);
}

#[test]
fn log_value_scale_keeps_positive_lower_bound() {
    let scale = ValueScale::from_extent(Some((3.0, 700.0)), ScaleYType::Logarithmic, 100.0)
        .expect("scale");
    assert_eq!(scale.domain(), (1.0, 1_000.0));
    assert!(scale.is_round_tick(100.0));
    assert!(!scale.is_round_tick(300.0));
}

#[test]
fn non_finite_extent_is_rejected() {
    let err = ValueScale::from_extent(Some((0.0, f64::INFINITY)), ScaleYType::Linear, 100.0)
        .expect_err("infinite extent");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn time_scale_rescale_keeps_start() {
    let scale = TimeScale::new(0.0, 1_000.0, Viewport::new(500, 100)).expect("scale");
    let wider = scale.rescaled(2_000.0, 1_000.0).expect("rescaled");
    assert_eq!(wider.domain(), (0.0, 2_000.0));
    assert_relative_eq!(wider.time_to_pixel(1_000.0), 500.0);
}

proptest! {
    #[test]
    fn linear_nice_covers_extent(min in -1.0e6f64..1.0e6, span in 1.0e-3f64..1.0e6) {
        let max = min + span;
        let (start, end) = LinearScale::new(min, max).expect("scale").nice(10).domain();
        let tolerance = 1e-9 * span.max(1.0);
        prop_assert!(start <= min + tolerance);
        prop_assert!(end >= max - tolerance);
    }

    #[test]
    fn value_scale_round_trip(min in 0.0f64..1.0e5, span in 1.0f64..1.0e6, factor in 0.0f64..1.0) {
        let scale = ValueScale::from_extent(Some((min, min + span)), ScaleYType::Linear, 128.0)
            .expect("scale");
        let (start, end) = scale.domain();
        let value = start + factor * (end - start);
        let recovered = scale.pixel_to_value(scale.value_to_pixel(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * (end - start).max(1.0));
    }
}
