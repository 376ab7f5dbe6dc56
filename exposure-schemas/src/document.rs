//! JSON Datalog Documents
//!
//! The document shape mirrors the core data model, using the raw
//! instrument conventions: alarms may be `null` or the undefined sentinel,
//! and `repeat` may be omitted for single samples.
//!
//! ```json
//! {
//!   "serial_number": "1234567-001",
//!   "recording_interval_seconds": 1,
//!   "twa_time_base_hours": 8,
//!   "sensors": [{
//!     "gas_code": "G0001",
//!     "alarm_low": 35.0, "alarm_high": 200.0,
//!     "alarm_twa": 35.0, "alarm_stel": 200.0,
//!     "periods": [{
//!       "started_at": 1700000000,
//!       "location": "Tank farm",
//!       "readings": [{"value": 0.0, "repeat": 600}, {"value": 42.0}]
//!     }]
//!   }]
//! }
//! ```
//!
//! Exported documents carry the same fields plus each reading's computed
//! `exposure` and each sensor's `exposure_summary`.

use serde::{Deserialize, Serialize};

use exposure_core::{
    constants::exposure::DEFAULT_TWA_TIME_BASE_HOURS,
    datalog::alarm_from_raw,
    AlarmThresholds, DatalogSession, ExposurePair, ExposureSummary, Period, Reading,
    SensorSession, SensorStatus,
};

use crate::SchemaError;

fn default_repeat() -> u32 {
    1
}

fn default_time_base() -> i32 {
    DEFAULT_TWA_TIME_BASE_HOURS
}

/// A complete instrument download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatalogDocument {
    /// Instrument serial number
    pub serial_number: String,

    /// Seconds between recorded samples
    pub recording_interval_seconds: i32,

    /// TWA averaging base in hours
    #[serde(default = "default_time_base")]
    pub twa_time_base_hours: i32,

    /// Per-sensor data
    #[serde(default)]
    pub sensors: Vec<SensorDocument>,
}

/// One sensor's datalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorDocument {
    /// Gas code, e.g. `G0001`
    pub gas_code: String,

    /// Sensor serial number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_serial: Option<String>,

    /// Sensor type code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensor_code: Option<String>,

    /// Installed slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u8>,

    /// Status at download
    #[serde(default)]
    pub status: SensorStatus,

    /// Low alarm, `null` or sentinel when unset
    #[serde(default)]
    pub alarm_low: Option<f64>,

    /// High alarm
    #[serde(default)]
    pub alarm_high: Option<f64>,

    /// TWA alarm
    #[serde(default)]
    pub alarm_twa: Option<f64>,

    /// STEL alarm
    #[serde(default)]
    pub alarm_stel: Option<f64>,

    /// Chronological periods
    #[serde(default)]
    pub periods: Vec<PeriodDocument>,

    /// Computed summary (export only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exposure_summary: Option<ExposureSummary>,
}

/// One recording period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodDocument {
    /// Start, seconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<u64>,

    /// Assigned location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Assigned user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Chronological readings
    #[serde(default)]
    pub readings: Vec<ReadingDocument>,
}

/// One compressed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingDocument {
    /// Raw sensor value
    pub value: f64,

    /// Samples in the run
    #[serde(default = "default_repeat")]
    pub repeat: u32,

    /// Computed exposure (export only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exposure: Vec<ExposurePair>,
}

impl DatalogDocument {
    /// Convert into the core model, validating every reading
    pub fn into_session(self) -> Result<DatalogSession, SchemaError> {
        let mut datalog = DatalogSession::new(
            self.serial_number,
            self.recording_interval_seconds,
            self.twa_time_base_hours,
        );

        for (s, sensor) in self.sensors.into_iter().enumerate() {
            let session = sensor.into_session().map_err(|e| match e {
                SchemaError::InvalidDocument(msg) => {
                    SchemaError::InvalidDocument(format!("sensor {}: {}", s, msg))
                }
                other => other,
            })?;
            datalog.sensors.push(session);
        }

        Ok(datalog)
    }

    /// Build a document from a (possibly computed) session
    pub fn from_session(datalog: &DatalogSession) -> Self {
        Self {
            serial_number: datalog.serial_number.clone(),
            recording_interval_seconds: datalog.recording_interval_seconds,
            twa_time_base_hours: datalog.twa_time_base_hours,
            sensors: datalog.sensors.iter().map(SensorDocument::from_session).collect(),
        }
    }
}

impl SensorDocument {
    fn into_session(self) -> Result<SensorSession, SchemaError> {
        let alarms = AlarmThresholds {
            low: self.alarm_low.and_then(alarm_from_raw),
            high: self.alarm_high.and_then(alarm_from_raw),
            twa: self.alarm_twa.and_then(alarm_from_raw),
            stel: self.alarm_stel.and_then(alarm_from_raw),
        };

        let mut session = SensorSession::new(&self.gas_code, alarms)
            .map_err(|e| SchemaError::InvalidDocument(format!("gas code {:?}: {}", self.gas_code, e)))?;
        session.sensor_serial = self.sensor_serial;
        session.sensor_code = self.sensor_code;
        session.position = self.position;
        session.status = self.status;

        for (p, period) in self.periods.into_iter().enumerate() {
            let mut readings = Vec::with_capacity(period.readings.len());
            for (r, reading) in period.readings.into_iter().enumerate() {
                let parsed = Reading::new(reading.value, reading.repeat).map_err(|e| {
                    SchemaError::InvalidDocument(format!("period {} reading {}: {}", p, r, e))
                })?;
                readings.push(parsed);
            }

            let mut converted = Period::new(readings).with_assignment(period.location, period.user);
            converted.started_at = period.started_at;
            session.push_period(converted);
        }

        Ok(session)
    }

    fn from_session(session: &SensorSession) -> Self {
        Self {
            gas_code: session.gas_code.to_string(),
            sensor_serial: session.sensor_serial.clone(),
            sensor_code: session.sensor_code.clone(),
            position: session.position,
            status: session.status,
            alarm_low: session.alarms.low,
            alarm_high: session.alarms.high,
            alarm_twa: session.alarms.twa,
            alarm_stel: session.alarms.stel,
            periods: session
                .periods
                .iter()
                .map(|period| PeriodDocument {
                    started_at: period.started_at,
                    location: period.location.clone(),
                    user: period.user.clone(),
                    readings: period
                        .readings
                        .iter()
                        .map(|r| ReadingDocument {
                            value: r.raw_value,
                            repeat: r.repeat_count,
                            exposure: r.exposure.clone(),
                        })
                        .collect(),
                })
                .collect(),
            exposure_summary: session.exposure_summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exposure_core::constants::exposure::UNDEFINED_ALARM;

    fn document(json: &str) -> DatalogDocument {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn repeat_and_time_base_default() {
        let doc = document(
            r#"{"serial_number":"A1","recording_interval_seconds":1,
                "sensors":[{"gas_code":"G0001","periods":[{"readings":[{"value":3.5}]}]}]}"#,
        );
        assert_eq!(doc.twa_time_base_hours, 8);
        assert_eq!(doc.sensors[0].periods[0].readings[0].repeat, 1);
    }

    #[test]
    fn sentinel_and_null_alarms_become_none() {
        let json = format!(
            r#"{{"serial_number":"A1","recording_interval_seconds":1,
                "sensors":[{{"gas_code":"G0001","alarm_twa":{:e},"alarm_stel":null,
                             "alarm_low":35.0}}]}}"#,
            UNDEFINED_ALARM
        );
        let datalog = document(&json).into_session().unwrap();
        let alarms = datalog.sensors[0].alarms;

        assert_eq!(alarms.twa, None);
        assert_eq!(alarms.stel, None);
        assert_eq!(alarms.low, Some(35.0));
        assert!(alarms.exposure_alarms_unset());
    }

    #[test]
    fn zero_repeat_is_rejected_with_location() {
        let doc = document(
            r#"{"serial_number":"A1","recording_interval_seconds":1,
                "sensors":[{"gas_code":"G0001","periods":[
                    {"readings":[{"value":1.0}]},
                    {"readings":[{"value":1.0},{"value":2.0,"repeat":0}]}]}]}"#,
        );
        match doc.into_session() {
            Err(SchemaError::InvalidDocument(msg)) => {
                assert!(msg.contains("sensor 0"), "{}", msg);
                assert!(msg.contains("period 1 reading 1"), "{}", msg);
            }
            other => panic!("expected InvalidDocument, got {:?}", other),
        }
    }

    #[test]
    fn assignment_and_start_survive_conversion() {
        let doc = document(
            r#"{"serial_number":"A1","recording_interval_seconds":5,"twa_time_base_hours":10,
                "sensors":[{"gas_code":"G0002","position":2,"status":"error","periods":[
                    {"started_at":1700000000,"location":"Tank farm","user":"J. Doe",
                     "readings":[{"value":0.0,"repeat":60}]}]}]}"#,
        );
        let datalog = doc.clone().into_session().unwrap();
        let sensor = &datalog.sensors[0];

        assert_eq!(datalog.twa_time_base_hours, 10);
        assert_eq!(sensor.position, Some(2));
        assert_eq!(sensor.status, SensorStatus::Error);
        assert_eq!(sensor.periods[0].started_at, Some(1_700_000_000));
        assert_eq!(sensor.periods[0].location.as_deref(), Some("Tank farm"));
        assert_eq!(sensor.periods[0].user.as_deref(), Some("J. Doe"));

        assert_eq!(DatalogDocument::from_session(&datalog), doc);
    }
}
