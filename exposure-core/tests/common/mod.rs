//! Common test utilities and data generators for integration tests
//!
//! This module provides:
//! - Realistic datalog generators (shift-long zero runs with exposure events)
//! - A reference computation over fully expanded samples
//! - Assertion helpers for comparing exposure values

#![allow(dead_code)]

use exposure_core::{
    constants::exposure::STEL_PERIOD_SECONDS, AlarmThresholds, ExposurePair, Period, Reading,
    SensorSession,
};

/// Carbon monoxide in the default gas table
pub const CO: &str = "G0001";

/// Hydrogen sulfide in the default gas table
pub const H2S: &str = "G0002";

/// Oxygen, never eligible
pub const OXYGEN: &str = "G0020";

/// Methane (combustible), never eligible
pub const METHANE: &str = "G0021";

/// Tolerance for comparing engine output with the reference computation
///
/// The engine keeps a running window total while the reference re-sums the
/// window, so long sessions drift apart by rounding error.
pub const EPSILON: f64 = 1e-6;

/// Typical CO alarm set: low 35, high 200, TWA 35, STEL 200 ppm
pub fn co_alarms() -> AlarmThresholds {
    AlarmThresholds {
        low: Some(35.0),
        high: Some(200.0),
        twa: Some(35.0),
        stel: Some(200.0),
    }
}

/// Build a session from `(raw_value, repeat_count)` runs per period
pub fn session(gas: &str, alarms: AlarmThresholds, periods: &[&[(f64, u32)]]) -> SensorSession {
    let mut session = SensorSession::new(gas, alarms).expect("valid gas code");
    for runs in periods {
        let readings = runs
            .iter()
            .map(|&(value, repeat)| Reading::new(value, repeat).expect("valid reading"))
            .collect();
        session.push_period(Period::new(readings));
    }
    session
}

/// Generator for realistic compressed datalogs
///
/// Simulates a worker's shift: long stretches of zero, occasional exposure
/// events that rise and decay, and the odd negative (ignored) sample.
pub struct DatalogGenerator {
    seed: u32,
}

impl DatalogGenerator {
    /// Create a generator with a fixed seed
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Generate `periods` periods of roughly `samples_per_period` samples each
    pub fn generate_periods(&mut self, periods: usize, samples_per_period: u32) -> Vec<Period> {
        (0..periods)
            .map(|_| Period::new(self.generate_readings(samples_per_period)))
            .collect()
    }

    /// Generate run-length compressed readings totalling `samples` samples
    pub fn generate_readings(&mut self, samples: u32) -> Vec<Reading> {
        let mut readings = Vec::new();
        let mut remaining = samples;

        while remaining > 0 {
            let run = self.random_int(1, 120).min(remaining);
            let roll = self.random_float();

            let value = if roll < 0.6 {
                0.0
            } else if roll < 0.65 {
                -1.0
            } else {
                // Exposure event, mostly low ppm with rare spikes
                let base = self.random_float() as f64 * 40.0;
                if self.random_float() < 0.1 { base * 10.0 } else { base }
            };

            readings.push(Reading::new(value, run).expect("valid reading"));
            remaining -= run;
        }

        readings
    }

    fn random_float(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        (self.seed as f32) / (u32::MAX as f32)
    }

    fn random_int(&mut self, min: u32, max: u32) -> u32 {
        let range = max - min;
        min + (self.random_float() * range as f32) as u32
    }
}

/// Reference TWA/STEL over fully expanded samples
///
/// Recomputes the STEL window from scratch for every sample instead of
/// keeping a running total. Returns one `Vec<ExposurePair>` per period.
pub fn reference_exposure(
    session: &SensorSession,
    recording_interval_seconds: i32,
    twa_time_base_hours: i32,
) -> Vec<Vec<ExposurePair>> {
    let window = (STEL_PERIOD_SECONDS as f64 / recording_interval_seconds as f64).ceil() as usize;
    let twa_factor = recording_interval_seconds as f64 / (twa_time_base_hours as f64 * 3600.0);

    let mut cumulative = 0.0;
    let mut result = Vec::new();

    for period in &session.periods {
        let samples: Vec<f64> = period
            .readings
            .iter()
            .flat_map(|r| std::iter::repeat(r.raw_value.max(0.0)).take(r.repeat_count as usize))
            .collect();

        let mut pairs = Vec::with_capacity(samples.len());
        for (i, &value) in samples.iter().enumerate() {
            cumulative += value;
            let start = (i + 1).saturating_sub(window);
            let stel_total: f64 = samples[start..=i].iter().sum();
            pairs.push(ExposurePair {
                twa: cumulative * twa_factor,
                stel: stel_total / window as f64,
            });
        }
        result.push(pairs);
    }

    result
}

/// Assert two exposure pairs agree within tolerance
pub fn assert_pair_close(actual: &ExposurePair, expected: &ExposurePair, context: &str) {
    assert!(
        (actual.twa - expected.twa).abs() < EPSILON,
        "{}: twa {} != {}",
        context,
        actual.twa,
        expected.twa
    );
    assert!(
        (actual.stel - expected.stel).abs() < EPSILON,
        "{}: stel {} != {}",
        context,
        actual.stel,
        expected.stel
    );
}
