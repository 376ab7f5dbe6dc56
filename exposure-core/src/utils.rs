//! Numeric helpers shared by the engine and the summary
//!
//! Pure functions, no allocation. Rounding goes through `libm` so results
//! are identical with and without `std`.

use crate::constants::exposure::{EXPOSURE_ROUNDING_DECIMALS, EXPOSURE_ZERO_THRESHOLD};

/// Round to `decimals` places, ties to even
///
/// Ties-to-even matches how the values were historically rounded for
/// display, so `0.005` rounds to `0.00` and `0.015` to `0.02`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = libm::pow(10.0, decimals as f64);
    libm::rint(value * scale) / scale
}

/// True when a value displays as zero on a report
pub fn is_effectively_zero(value: f64) -> bool {
    round_to(value, EXPOSURE_ROUNDING_DECIMALS) < EXPOSURE_ZERO_THRESHOLD
}

/// Negative raw values mark ignorable samples and contribute nothing
#[inline]
pub fn clamp_sample(raw_value: f64) -> f64 {
    if raw_value < 0.0 {
        0.0
    } else {
        raw_value
    }
}

/// Number of samples of `recording_interval_seconds` that fit in `period_seconds`, rounded up
pub fn samples_per_period(period_seconds: u32, recording_interval_seconds: i32) -> usize {
    libm::ceil(period_seconds as f64 / recording_interval_seconds as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_ties_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(7.0, 0), 7.0);
    }

    #[test]
    fn zero_threshold() {
        assert!(is_effectively_zero(0.0));
        assert!(is_effectively_zero(0.003472));
        assert!(is_effectively_zero(0.0049));
        assert!(!is_effectively_zero(0.0051));
        assert!(!is_effectively_zero(0.1111));
    }

    #[test]
    fn negative_samples_clamp_to_zero() {
        assert_eq!(clamp_sample(-1.0), 0.0);
        assert_eq!(clamp_sample(0.0), 0.0);
        assert_eq!(clamp_sample(4.5), 4.5);
    }

    #[test]
    fn window_length_rounds_up() {
        assert_eq!(samples_per_period(900, 1), 900);
        assert_eq!(samples_per_period(900, 7), 129);
        assert_eq!(samples_per_period(900, 60), 15);
        assert_eq!(samples_per_period(900, 3600), 1);
    }
}
