//! Exposure Computation Constants
//!
//! Values that define how STEL and TWA are reconstructed from a datalog.
//! These follow occupational exposure regulations (OSHA 29 CFR 1910.1000,
//! EN 689) as implemented by portable gas detectors.

use super::time::SECONDS_PER_MINUTE;

// ===== STEL =====

/// Length of the STEL averaging period in minutes.
///
/// Short-term exposure limits are defined over a rolling 15 minute window.
pub const STEL_PERIOD_MINUTES: u32 = 15;

/// Length of the STEL averaging period in seconds.
pub const STEL_PERIOD_SECONDS: u32 = STEL_PERIOD_MINUTES * SECONDS_PER_MINUTE;

// ===== TWA =====

/// Default TWA time base in hours (one standard work shift).
pub const DEFAULT_TWA_TIME_BASE_HOURS: i32 = 8;

// ===== ZERO SUPPRESSION =====

/// Number of decimal places exposure values are rounded to before the
/// zero check. Reports display two decimals.
pub const EXPOSURE_ROUNDING_DECIMALS: u32 = 2;

/// A rounded exposure value below this counts as zero.
pub const EXPOSURE_ZERO_THRESHOLD: f64 = 0.01;

// ===== ALARMS =====

/// Raw value instruments and upstream records use for "alarm not set".
///
/// Converted to `None` at the data model boundary.
pub const UNDEFINED_ALARM: f64 = f64::MIN;

/// Raw alarm values at or below this are treated as the undefined sentinel.
///
/// Serialized sentinels do not always survive a text round trip bit-exact.
pub const UNDEFINED_ALARM_THRESHOLD: f64 = -1.0e300;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stel_period_is_fifteen_minutes() {
        assert_eq!(STEL_PERIOD_SECONDS, 900);
    }

    #[test]
    fn sentinel_is_below_threshold() {
        assert!(UNDEFINED_ALARM <= UNDEFINED_ALARM_THRESHOLD);
    }
}
