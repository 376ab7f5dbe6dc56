//! Constants for the exposure engine
//!
//! Centralized, documented constants used throughout the crate. All numeric
//! values are defined here with a note on their purpose and source.
//!
//! ## Organization
//!
//! - **Time**: unit conversions and recording intervals
//! - **Exposure**: STEL period, TWA base, zero suppression and alarm sentinels
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Use descriptive names that include units

/// Time-related constants for unit conversion and recording intervals.
pub mod time;

/// STEL/TWA computation parameters and alarm sentinels.
pub mod exposure;

// Re-export commonly used constants for convenience
pub use time::{
    SECONDS_PER_MINUTE, SECONDS_PER_HOUR, SECONDS_PER_DAY,
    DEFAULT_RECORDING_INTERVAL_SECONDS,
};

pub use exposure::{
    STEL_PERIOD_SECONDS, DEFAULT_TWA_TIME_BASE_HOURS,
    EXPOSURE_ROUNDING_DECIMALS, EXPOSURE_ZERO_THRESHOLD,
    UNDEFINED_ALARM, UNDEFINED_ALARM_THRESHOLD,
};
