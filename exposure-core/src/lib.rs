//! Datalog exposure engine
//!
//! Reconstructs TWA and STEL values from the run-length compressed datalog
//! a gas detector records in the field.
//!
//! Key constraints:
//! - Input can span multi-day deployments sampled every second
//! - Compressed runs are never expanded in memory
//! - Sessions are independent; periods and readings are strictly sequential
//!
//! ```no_run
//! use exposure_core::{compute_datalog, DatalogSession, GasTable};
//!
//! # fn decoded_download() -> DatalogSession { DatalogSession::new("1234567-001", 1, 8) }
//! let mut datalog: DatalogSession = decoded_download();
//! let table = GasTable::default_table();
//!
//! let computed = compute_datalog(&mut datalog, &table);
//! println!("{} sensors have exposure values", computed);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

// Macros for optional logging
#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub mod buffer;
pub mod constants;
pub mod datalog;
pub mod engine;
pub mod errors;
pub mod gas;
pub mod summary;
pub mod traits;
pub mod utils;

// Public API
pub use datalog::{
    AlarmThresholds, DatalogSession, ExposurePair, Period, Reading, SensorSession, SensorStatus,
};
pub use engine::{compute_datalog, compute_exposure, ExposureAccumulator, ExposureParameters};
pub use errors::{DatalogError, DatalogResult};
pub use gas::{GasCode, GasEntry, GasTable};
pub use summary::{ExposureOutcome, ExposureSummary, SkipReason};
pub use traits::GasEligibility;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
