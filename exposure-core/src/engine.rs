//! Datalog Exposure Engine
//!
//! ## Overview
//!
//! Reconstructs, for every recorded sample, the TWA and STEL values a
//! compliance report displays. Input is a sensor session whose readings are
//! run-length compressed: one [`Reading`] stands for `repeat_count`
//! identical samples taken `recording_interval_seconds` apart.
//!
//! ## Computation
//!
//! ```text
//! stel_window_length = ceil(900 / recording_interval_seconds)
//! twa_factor         = recording_interval_seconds / (twa_time_base_hours × 3600)
//!
//! for each period:                       window and window total reset
//!   for each reading:
//!     repeat repeat_count times:         v = max(raw_value, 0)
//!       cumulative   += v                never reset inside a session
//!       twa           = cumulative × twa_factor
//!       window_total += v
//!       if window full: pop sill, subtract it if > 0
//!       push v
//!       stel          = window_total / stel_window_length
//! ```
//!
//! STEL always divides by the full window length, so it ramps up over the
//! first 15 minutes of a period rather than averaging a partial window.
//!
//! ## Zero Suppression
//!
//! Most of a healthy deployment reads zero. After a reading's pairs are
//! produced, they are kept only if at least one TWA or STEL value rounds
//! (2 decimals) to 0.01 or more; otherwise the sequence is dropped and the
//! reading keeps an empty exposure.
//!
//! ## Eligibility
//!
//! Checked once, before any reading is touched. A session is skipped when
//! its gas is not STEL/TWA eligible, when either parameter is not positive,
//! or when both the STEL and TWA alarms are below zero (an undefined alarm
//! counts as below zero). Skipping is an outcome, not an error; it empties
//! any exposure left over from an earlier computation.
//!
//! ## Preconditions
//!
//! Periods and readings must be in chronological order. This cannot be
//! detected here; out-of-order input silently produces wrong values.
//!
//! ## Usage Example
//!
//! ```rust
//! use exposure_core::{compute_exposure, AlarmThresholds, GasTable, Period, Reading, SensorSession};
//!
//! let alarms = AlarmThresholds { twa: Some(25.0), stel: Some(100.0), ..Default::default() };
//! let mut session = SensorSession::new("G0001", alarms)?
//!     .with_period(Period::new(vec![Reading::new(100.0, 1)?]));
//!
//! let outcome = compute_exposure(&mut session, 1, 8, &GasTable::default_table());
//! assert!(outcome.is_computed());
//!
//! let pair = session.periods[0].readings[0].exposure[0];
//! assert!((pair.stel - 100.0 / 900.0).abs() < 1e-12);
//! # Ok::<(), exposure_core::DatalogError>(())
//! ```

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    buffer::SlidingWindow,
    constants::{
        exposure::{DEFAULT_TWA_TIME_BASE_HOURS, STEL_PERIOD_SECONDS},
        time::{DEFAULT_RECORDING_INTERVAL_SECONDS, SECONDS_PER_HOUR},
    },
    datalog::{DatalogSession, ExposurePair, SensorSession},
    errors::{DatalogError, DatalogResult},
    summary::{ExposureOutcome, ExposureSummary, SkipReason},
    traits::GasEligibility,
    utils::{clamp_sample, is_effectively_zero, samples_per_period},
};

#[cfg(doc)]
use crate::datalog::Reading;

/// Session-wide recording parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExposureParameters {
    /// Seconds between recorded samples
    pub recording_interval_seconds: i32,

    /// TWA averaging base in hours
    pub twa_time_base_hours: i32,
}

impl Default for ExposureParameters {
    fn default() -> Self {
        Self {
            recording_interval_seconds: DEFAULT_RECORDING_INTERVAL_SECONDS,
            twa_time_base_hours: DEFAULT_TWA_TIME_BASE_HOURS,
        }
    }
}

impl ExposureParameters {
    /// Create parameters without validation
    pub fn new(recording_interval_seconds: i32, twa_time_base_hours: i32) -> Self {
        Self {
            recording_interval_seconds,
            twa_time_base_hours,
        }
    }

    /// Reject non-positive values
    ///
    /// The engine treats them as "not applicable"; this is for callers that
    /// want to report bad configuration instead.
    pub fn validate(&self) -> DatalogResult<()> {
        if self.recording_interval_seconds <= 0 {
            return Err(DatalogError::InvalidParameter {
                name: "recording_interval_seconds",
                value: self.recording_interval_seconds as i64,
            });
        }
        if self.twa_time_base_hours <= 0 {
            return Err(DatalogError::InvalidParameter {
                name: "twa_time_base_hours",
                value: self.twa_time_base_hours as i64,
            });
        }
        Ok(())
    }

    /// Samples in one STEL window; only meaningful once validated
    pub fn stel_window_length(&self) -> usize {
        samples_per_period(STEL_PERIOD_SECONDS, self.recording_interval_seconds)
    }

    /// Fraction of the TWA time base one sample represents
    pub fn twa_factor(&self) -> f64 {
        self.recording_interval_seconds as f64
            / (self.twa_time_base_hours as f64 * SECONDS_PER_HOUR as f64)
    }
}

/// Running TWA/STEL state for one sensor session
///
/// The cumulative sum spans the whole session; the STEL window is reset by
/// [`begin_period`](Self::begin_period). Interrupting a session leaves the
/// accumulator unusable for that session, so it is never reused across
/// sessions.
#[derive(Debug, Clone)]
pub struct ExposureAccumulator {
    twa_factor: f64,
    stel_window_length: usize,
    cumulative_exposure: f64,
    stel_window_total: f64,
    stel_window: SlidingWindow,
}

impl ExposureAccumulator {
    /// Fresh state, rejecting non-positive parameters
    pub fn new(params: &ExposureParameters) -> DatalogResult<Self> {
        params.validate()?;

        let stel_window_length = params.stel_window_length();
        Ok(Self {
            twa_factor: params.twa_factor(),
            stel_window_length,
            cumulative_exposure: 0.0,
            stel_window_total: 0.0,
            stel_window: SlidingWindow::new(stel_window_length),
        })
    }

    /// Start a new period: empty STEL window, TWA carries over
    pub fn begin_period(&mut self) {
        self.stel_window_total = 0.0;
        self.stel_window.clear();
    }

    /// Process one sample and return its exposure pair
    pub fn record(&mut self, raw_value: f64) -> ExposurePair {
        let value = clamp_sample(raw_value);

        self.cumulative_exposure += value;
        let twa = self.cumulative_exposure * self.twa_factor;

        self.stel_window_total += value;
        if let Some(sill) = self.stel_window.push(value) {
            // Zero samples were never added, so never subtract them
            if sill > 0.0 {
                self.stel_window_total -= sill;
            }
        }
        let stel = self.stel_window_total / self.stel_window_length as f64;

        ExposurePair { twa, stel }
    }

    /// Sum of all clamped samples so far in the session
    pub fn cumulative_exposure(&self) -> f64 {
        self.cumulative_exposure
    }

    /// Samples per STEL window
    pub fn stel_window_length(&self) -> usize {
        self.stel_window_length
    }
}

/// Run the eligibility gate, in order: gas, parameters, alarms
fn check_eligibility<E>(
    session: &SensorSession,
    params: &ExposureParameters,
    gas_table: &E,
) -> Option<SkipReason>
where
    E: GasEligibility + ?Sized,
{
    if !gas_table.is_stel_twa_eligible(session.gas_code.as_str()) {
        return Some(SkipReason::IneligibleGas);
    }
    if params.recording_interval_seconds <= 0 {
        return Some(SkipReason::NonPositiveRecordingInterval);
    }
    if params.twa_time_base_hours <= 0 {
        return Some(SkipReason::NonPositiveTimeBase);
    }
    if session.alarms.exposure_alarms_unset() {
        return Some(SkipReason::NoExposureAlarms);
    }
    None
}

/// Populate `exposure` on every reading of an eligible sensor session
///
/// A skipped session has every reading's exposure emptied and its summary
/// cleared; raw values are never touched. For a computed session every
/// reading ends with either an empty exposure or one pair per sample, and
/// [`SensorSession::exposure_summary`] is set.
pub fn compute_exposure<E>(
    session: &mut SensorSession,
    recording_interval_seconds: i32,
    twa_time_base_hours: i32,
    gas_table: &E,
) -> ExposureOutcome
where
    E: GasEligibility + ?Sized,
{
    let params = ExposureParameters::new(recording_interval_seconds, twa_time_base_hours);

    if let Some(reason) = check_eligibility(session, &params, gas_table) {
        log_debug!(
            "Skipping exposure for gas {}: {:?}",
            session.gas_code.as_str(),
            reason
        );
        session.clear_exposure();
        return ExposureOutcome::NotApplicable(reason);
    }

    let mut accumulator = match ExposureAccumulator::new(&params) {
        Ok(accumulator) => accumulator,
        // The gate has already rejected non-positive parameters
        Err(_) => {
            session.clear_exposure();
            return ExposureOutcome::NotApplicable(SkipReason::NonPositiveRecordingInterval);
        }
    };
    let mut summary = ExposureSummary::default();

    for (_index, period) in session.periods.iter_mut().enumerate() {
        accumulator.begin_period();
        log_trace!(
            "Period {}: {} readings, cumulative {}",
            _index,
            period.readings.len(),
            accumulator.cumulative_exposure()
        );

        for reading in period.readings.iter_mut() {
            let count = reading.repeat_count as usize;
            let value = clamp_sample(reading.raw_value);
            let mut exposure = Vec::new();
            let mut non_zero = false;

            for _ in 0..count {
                let pair = accumulator.record(reading.raw_value);
                summary.record_sample(value);

                let pair_is_zero = is_effectively_zero(pair.twa) && is_effectively_zero(pair.stel);
                if !non_zero && !pair_is_zero {
                    non_zero = true;
                    exposure.reserve_exact(count - exposure.len());
                }
                // TWA is flat and STEL only decays through a zero run, so a
                // zero run that starts at zero stays there and stores nothing
                if non_zero || value > 0.0 {
                    exposure.push(pair);
                }
            }

            if non_zero {
                summary.record_retained(&exposure);
                reading.exposure = exposure;
            } else {
                reading.exposure = Vec::new();
            }
        }
    }

    summary.finish(&session.alarms);
    session.exposure_summary = Some(summary);

    log_debug!(
        "Computed exposure for gas {}: {} samples, max TWA {}, max STEL {}",
        session.gas_code.as_str(),
        summary.computed_samples,
        summary.max_twa,
        summary.max_stel
    );

    ExposureOutcome::Computed(summary)
}

/// Compute every sensor session of a download with its shared parameters
///
/// Sensors are independent; they are processed in order here, and callers
/// that want parallelism can hand individual sensors to workers with
/// [`compute_exposure`]. Returns how many sensors were computed.
pub fn compute_datalog<E>(datalog: &mut DatalogSession, gas_table: &E) -> usize
where
    E: GasEligibility + ?Sized,
{
    let interval = datalog.recording_interval_seconds;
    let time_base = datalog.twa_time_base_hours;

    let computed = datalog
        .sensors
        .iter_mut()
        .map(|sensor| compute_exposure(sensor, interval, time_base, gas_table))
        .filter(ExposureOutcome::is_computed)
        .count();

    log_debug!(
        "Datalog {}: computed {} of {} sensors",
        datalog.serial_number,
        computed,
        datalog.sensors.len()
    );

    computed
}

impl DatalogSession {
    /// Recording parameters shared by all sensors
    pub fn parameters(&self) -> ExposureParameters {
        ExposureParameters::new(self.recording_interval_seconds, self.twa_time_base_hours)
    }
}
