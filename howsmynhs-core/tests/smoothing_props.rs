use howsmynhs_core::{DEFAULT_WINDOW, moving_average, smooth_aligned};
use proptest::prelude::*;

#[test]
fn default_window_is_three() {
    assert_eq!(DEFAULT_WINDOW, 3);
    let out = moving_average(&[3.0, 6.0, 9.0, 12.0], DEFAULT_WINDOW).unwrap();
    assert_eq!(out, vec![6.0, 9.0]);
}

proptest! {
    #[test]
    fn output_is_shorter_by_window_minus_one(
        values in proptest::collection::vec(-1e6f64..1e6, 0..200),
        window in 1usize..12,
    ) {
        let out = moving_average(&values, window).unwrap();
        let expected = values.len().saturating_sub(window - 1);
        let expected = if values.len() < window { 0 } else { expected };
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn constant_series_stays_constant(
        c in -100_000i32..100_000,
        n in 1usize..300,
        window in 1usize..10,
    ) {
        let values = vec![f64::from(c); n];
        for v in moving_average(&values, window).unwrap() {
            prop_assert_eq!(v, f64::from(c));
        }
    }

    #[test]
    fn window_of_one_is_identity(values in proptest::collection::vec(0u32..1_000_000, 0..100)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        prop_assert_eq!(moving_average(&values, 1).unwrap(), values);
    }

    #[test]
    fn smoothed_time_axis_stays_aligned(n in 0usize..100, window in 1usize..8) {
        let times: Vec<f64> = (0..n).map(|i| 2020.0 + i as f64 / 12.0).collect();
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let (t, v) = smooth_aligned(&times, &values, window).unwrap();
        prop_assert_eq!(t.len(), v.len());
        if let Some(last) = t.last() {
            prop_assert_eq!(*last, times[n - 1]);
        }
    }
}
