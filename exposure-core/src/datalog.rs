//! Datalog Data Model
//!
//! ## Shape of a Download
//!
//! An instrument download is split per sensor, then per recording period,
//! then into run-length compressed readings:
//!
//! ```text
//! DatalogSession (instrument, recording interval, TWA time base)
//! └── SensorSession (gas, alarm thresholds)
//!     └── Period (location/user change boundaries)
//!         └── Reading (raw value × repeat count) → exposure pairs
//! ```
//!
//! Order is significant at every level below the session: periods and
//! readings are chronological and must be kept exactly as decoded.
//!
//! ## Alarm Sentinels
//!
//! Instruments write [`UNDEFINED_ALARM`] for alarms that are not set. The
//! model stores those as `None`; use [`alarm_from_raw`] when converting
//! decoded values.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::exposure::{UNDEFINED_ALARM, UNDEFINED_ALARM_THRESHOLD};
use crate::errors::{DatalogError, DatalogResult};
use crate::gas::{gas_code, GasCode};
use crate::summary::ExposureSummary;
use crate::traits::Validatable;

/// Convert a raw alarm value, mapping the undefined sentinel to `None`
pub fn alarm_from_raw(raw: f64) -> Option<f64> {
    if raw <= UNDEFINED_ALARM_THRESHOLD || !raw.is_valid() {
        None
    } else {
        Some(raw)
    }
}

/// Convert back to the raw representation instruments use
pub fn alarm_to_raw(alarm: Option<f64>) -> f64 {
    alarm.unwrap_or(UNDEFINED_ALARM)
}

/// TWA and STEL for one sample instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExposurePair {
    /// Time-weighted average so far in the session
    pub twa: f64,

    /// Rolling 15 minute average
    pub stel: f64,
}

/// A run of identical samples
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Sensor value; negative means "ignore this sample"
    pub raw_value: f64,

    /// Number of consecutive samples this reading stands for (>= 1)
    pub repeat_count: u32,

    /// One pair per sample, or empty when not applicable or all zero
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub exposure: Vec<ExposurePair>,
}

impl Reading {
    /// Create a reading with no computed exposure
    pub fn new(raw_value: f64, repeat_count: u32) -> DatalogResult<Self> {
        if !raw_value.is_valid() {
            return Err(DatalogError::InvalidValue);
        }
        if repeat_count == 0 {
            return Err(DatalogError::ZeroRepeatCount);
        }

        Ok(Self {
            raw_value,
            repeat_count,
            exposure: Vec::new(),
        })
    }

    /// Samples represented by this reading
    pub fn sample_count(&self) -> u64 {
        self.repeat_count as u64
    }

    /// Whether the engine retained exposure values for this reading
    pub fn has_exposure(&self) -> bool {
        !self.exposure.is_empty()
    }
}

/// One contiguous recording interval
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Period {
    /// Start of the period, seconds since the Unix epoch
    pub started_at: Option<u64>,

    /// Location the instrument was assigned to
    pub location: Option<String>,

    /// User the instrument was assigned to
    pub user: Option<String>,

    /// Chronological readings
    pub readings: Vec<Reading>,
}

impl Period {
    /// Create a period from readings
    pub fn new(readings: Vec<Reading>) -> Self {
        Self {
            readings,
            ..Self::default()
        }
    }

    /// Set the period start
    pub fn with_start(mut self, started_at: u64) -> Self {
        self.started_at = Some(started_at);
        self
    }

    /// Set location and user
    pub fn with_assignment(mut self, location: Option<String>, user: Option<String>) -> Self {
        self.location = location;
        self.user = user;
        self
    }

    /// Total samples across all readings
    pub fn sample_count(&self) -> u64 {
        self.readings.iter().map(Reading::sample_count).sum()
    }
}

/// Configured alarm thresholds at recording time
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlarmThresholds {
    /// Low alarm
    pub low: Option<f64>,
    /// High alarm
    pub high: Option<f64>,
    /// TWA alarm
    pub twa: Option<f64>,
    /// STEL alarm
    pub stel: Option<f64>,
}

impl AlarmThresholds {
    /// Build from raw instrument values, converting sentinels
    pub fn from_raw(low: f64, high: f64, twa: f64, stel: f64) -> Self {
        Self {
            low: alarm_from_raw(low),
            high: alarm_from_raw(high),
            twa: alarm_from_raw(twa),
            stel: alarm_from_raw(stel),
        }
    }

    /// True when neither the STEL nor the TWA alarm is at or above zero
    ///
    /// An undefined alarm counts as below zero.
    pub fn exposure_alarms_unset(&self) -> bool {
        let below_zero = |alarm: Option<f64>| alarm.map_or(true, |v| v < 0.0);
        below_zero(self.stel) && below_zero(self.twa)
    }
}

/// Status of the sensor at download time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorStatus {
    /// Sensor reported normal operation
    #[default]
    Ok,
    /// Sensor reported an error
    Error,
    /// Sensor failed a bump test or calibration
    Failed,
}

/// One sensor's portion of a download
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorSession {
    /// Serial number of the sensor
    pub sensor_serial: Option<String>,

    /// Sensor type code
    pub sensor_code: Option<String>,

    /// Installed slot in the instrument
    pub position: Option<u8>,

    /// Gas the sensor was configured for
    pub gas_code: GasCode,

    /// Alarm thresholds at recording time
    pub alarms: AlarmThresholds,

    /// Sensor status at download
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: SensorStatus,

    /// Chronological recording periods
    pub periods: Vec<Period>,

    /// Filled in by the engine for eligible sessions
    #[cfg_attr(feature = "serde", serde(default))]
    pub exposure_summary: Option<ExposureSummary>,
}

impl SensorSession {
    /// Create a session for a gas with the given thresholds
    pub fn new(gas: &str, alarms: AlarmThresholds) -> DatalogResult<Self> {
        Ok(Self {
            sensor_serial: None,
            sensor_code: None,
            position: None,
            gas_code: gas_code(gas)?,
            alarms,
            status: SensorStatus::Ok,
            periods: Vec::new(),
            exposure_summary: None,
        })
    }

    /// Append a period (keeps chronological order)
    pub fn push_period(&mut self, period: Period) {
        self.periods.push(period);
    }

    /// Builder-style period append
    pub fn with_period(mut self, period: Period) -> Self {
        self.push_period(period);
        self
    }

    /// Total samples across all periods
    pub fn sample_count(&self) -> u64 {
        self.periods.iter().map(Period::sample_count).sum()
    }

    /// Iterate over every reading in chronological order
    pub fn readings(&self) -> impl Iterator<Item = &Reading> + '_ {
        self.periods.iter().flat_map(|p| p.readings.iter())
    }

    /// Drop all computed exposure, e.g. before recomputing with new parameters
    pub fn clear_exposure(&mut self) {
        for reading in self.periods.iter_mut().flat_map(|p| p.readings.iter_mut()) {
            reading.exposure = Vec::new();
        }
        self.exposure_summary = None;
    }
}

/// A complete instrument download
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatalogSession {
    /// Instrument serial number
    pub serial_number: String,

    /// Seconds between recorded samples
    pub recording_interval_seconds: i32,

    /// TWA averaging base in hours
    pub twa_time_base_hours: i32,

    /// Per-sensor data
    pub sensors: Vec<SensorSession>,
}

impl DatalogSession {
    /// Create an empty download session
    pub fn new(
        serial_number: impl Into<String>,
        recording_interval_seconds: i32,
        twa_time_base_hours: i32,
    ) -> Self {
        Self {
            serial_number: serial_number.into(),
            recording_interval_seconds,
            twa_time_base_hours,
            sensors: Vec::new(),
        }
    }
}
