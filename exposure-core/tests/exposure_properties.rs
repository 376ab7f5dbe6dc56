//! Property tests for the exposure engine
//!
//! Random sessions of compressed runs, checked against the invariants every
//! report relies on.

mod common;

use proptest::prelude::*;

use exposure_core::{compute_exposure, GasTable, Period, Reading, SensorSession};

use common::{co_alarms, reference_exposure, CO, EPSILON};

/// A run: zero, ignored, or a value in [0, 300); repeated 1 to 149 times
fn run_strategy() -> impl Strategy<Value = (f64, u32)> {
    prop_oneof![
        3 => Just(0.0),
        1 => Just(-1.0),
        4 => 0.0f64..300.0,
    ]
    .prop_flat_map(|value| (Just(value), 1u32..150))
}

fn session_strategy() -> impl Strategy<Value = SensorSession> {
    prop::collection::vec(prop::collection::vec(run_strategy(), 1..15), 1..4).prop_map(|periods| {
        let mut session = SensorSession::new(CO, co_alarms()).unwrap();
        for runs in periods {
            let readings = runs
                .into_iter()
                .map(|(value, repeat)| Reading::new(value, repeat).unwrap())
                .collect();
            session.push_period(Period::new(readings));
        }
        session
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn exposure_is_empty_or_one_pair_per_sample(
        mut session in session_strategy(),
        interval in 1i32..120,
        time_base in 1i32..24,
    ) {
        compute_exposure(&mut session, interval, time_base, &GasTable::default_table());

        for reading in session.readings() {
            prop_assert!(
                reading.exposure.is_empty()
                    || reading.exposure.len() == reading.repeat_count as usize
            );
        }
    }

    #[test]
    fn twa_never_decreases(
        mut session in session_strategy(),
        interval in 1i32..120,
    ) {
        compute_exposure(&mut session, interval, 8, &GasTable::default_table());

        let mut last = 0.0f64;
        for pair in session.readings().flat_map(|r| r.exposure.iter()) {
            prop_assert!(pair.twa >= last);
            last = pair.twa;
        }
    }

    #[test]
    fn retained_values_match_expanded_reference(
        mut session in session_strategy(),
        interval in 1i32..120,
    ) {
        let expected = reference_exposure(&session, interval, 8);
        compute_exposure(&mut session, interval, 8, &GasTable::default_table());

        for (period, reference) in session.periods.iter().zip(expected.iter()) {
            let mut offset = 0;
            for reading in &period.readings {
                let count = reading.repeat_count as usize;
                for (actual, expected) in reading.exposure.iter().zip(&reference[offset..offset + count]) {
                    prop_assert!((actual.twa - expected.twa).abs() < EPSILON);
                    prop_assert!((actual.stel - expected.stel).abs() < EPSILON);
                }
                offset += count;
            }
        }
    }

    #[test]
    fn stel_never_exceeds_peak(
        mut session in session_strategy(),
        interval in 1i32..120,
    ) {
        let peak = session.readings().map(|r| r.raw_value.max(0.0)).fold(0.0, f64::max);
        compute_exposure(&mut session, interval, 8, &GasTable::default_table());

        for pair in session.readings().flat_map(|r| r.exposure.iter()) {
            prop_assert!(pair.stel >= -EPSILON);
            prop_assert!(pair.stel <= peak + EPSILON);
        }
    }
}
