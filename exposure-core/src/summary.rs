//! Per-sensor exposure summary
//!
//! Collected while the engine walks a session, so reports can show peak and
//! maximum values without rescanning every reading.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::datalog::{AlarmThresholds, ExposurePair};

/// Why a session produced no exposure values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkipReason {
    /// Gas is not on the STEL/TWA allow-list
    IneligibleGas,
    /// Recording interval was zero or negative
    NonPositiveRecordingInterval,
    /// TWA time base was zero or negative
    NonPositiveTimeBase,
    /// Neither a STEL nor a TWA alarm is configured
    NoExposureAlarms,
}

/// Result of running the engine over one sensor session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExposureOutcome {
    /// Exposure was computed
    Computed(ExposureSummary),
    /// Session did not qualify; no reading was touched
    NotApplicable(SkipReason),
}

impl ExposureOutcome {
    /// True when the session passed the eligibility gate
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }

    /// Summary of a computed session
    pub fn summary(&self) -> Option<&ExposureSummary> {
        match self {
            Self::Computed(summary) => Some(summary),
            Self::NotApplicable(_) => None,
        }
    }
}

/// Peak and maximum values over a computed session
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExposureSummary {
    /// Highest clamped raw value seen
    pub peak_reading: f64,

    /// Highest retained TWA value
    pub max_twa: f64,

    /// Highest retained STEL value
    pub max_stel: f64,

    /// TWA alarm is set and `max_twa` reached it
    pub twa_alarm_exceeded: bool,

    /// STEL alarm is set and `max_stel` reached it
    pub stel_alarm_exceeded: bool,

    /// Samples processed, i.e. the sum of repeat counts
    pub computed_samples: u64,
}

impl ExposureSummary {
    /// Account for one processed sample
    pub(crate) fn record_sample(&mut self, clamped_value: f64) {
        self.computed_samples += 1;
        if clamped_value > self.peak_reading {
            self.peak_reading = clamped_value;
        }
    }

    /// Fold in the pairs of a reading that kept its exposure
    pub(crate) fn record_retained(&mut self, pairs: &[ExposurePair]) {
        for pair in pairs {
            self.max_twa = self.max_twa.max(pair.twa);
            self.max_stel = self.max_stel.max(pair.stel);
        }
    }

    /// Compare maxima against the configured alarms
    pub(crate) fn finish(&mut self, alarms: &AlarmThresholds) {
        let reached = |alarm: Option<f64>, value: f64| {
            alarm.map_or(false, |limit| limit > 0.0 && value >= limit)
        };
        self.twa_alarm_exceeded = reached(alarms.twa, self.max_twa);
        self.stel_alarm_exceeded = reached(alarms.stel, self.max_stel);
    }
}
