//! Compute Exposure Example
//!
//! Builds a small CO datalog by hand and prints the TWA/STEL values a
//! compliance report would show.
//!
//! ## What You'll Learn
//!
//! - Building sensor sessions from run-length compressed readings
//! - Running the engine with the built-in gas table
//! - Why zero runs come back with no exposure values
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_compute_exposure
//! ```

use exposure_core::{
    compute_datalog, AlarmThresholds, DatalogError, DatalogSession, GasTable, Period, Reading,
    SensorSession,
};

fn main() -> Result<(), DatalogError> {
    println!("Datalog Exposure Example");
    println!("========================\n");

    // CO alarms: TWA 35 ppm, STEL 200 ppm; recorded every 60 s, 8 h TWA base
    let alarms = AlarmThresholds::from_raw(35.0, 200.0, 35.0, 200.0);
    let mut datalog = DatalogSession::new("1234567-001", 60, 8);

    let co = SensorSession::new("G0001", alarms)?
        .with_period(Period::new(vec![
            Reading::new(0.0, 30)?,   // half an hour of clean air
            Reading::new(45.0, 10)?,  // ten minute exposure event
            Reading::new(0.0, 20)?,   // back to clean air
        ]))
        .with_period(Period::new(vec![Reading::new(12.0, 5)?]));

    let oxygen = SensorSession::new("G0020", alarms)?
        .with_period(Period::new(vec![Reading::new(20.9, 65)?]));

    datalog.sensors.push(co);
    datalog.sensors.push(oxygen);

    let computed = compute_datalog(&mut datalog, &GasTable::default_table());
    println!("Computed {} of {} sensors\n", computed, datalog.sensors.len());

    for sensor in &datalog.sensors {
        println!("Gas {}", sensor.gas_code);
        for (p, period) in sensor.periods.iter().enumerate() {
            for reading in &period.readings {
                if reading.exposure.is_empty() {
                    println!("  period {}: {:>6.1} x{:<3} (no exposure)", p, reading.raw_value, reading.repeat_count);
                    continue;
                }
                let last = reading.exposure[reading.exposure.len() - 1];
                println!(
                    "  period {}: {:>6.1} x{:<3} TWA {:.2}  STEL {:.2}",
                    p, reading.raw_value, reading.repeat_count, last.twa, last.stel
                );
            }
        }
        if let Some(summary) = &sensor.exposure_summary {
            println!(
                "  max TWA {:.2}, max STEL {:.2}, STEL alarm exceeded: {}",
                summary.max_twa, summary.max_stel, summary.stel_alarm_exceeded
            );
        }
        println!();
    }

    Ok(())
}
