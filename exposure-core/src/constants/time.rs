//! Time-Related Constants
//!
//! Conversion factors used when turning recording intervals and TWA time
//! bases into sample counts and averaging fractions.

// ===== TIME UNIT CONVERSIONS =====

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u32 = 24;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u32 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Seconds per day.
pub const SECONDS_PER_DAY: u32 = SECONDS_PER_HOUR * HOURS_PER_DAY;

// ===== RECORDING INTERVALS =====

/// Default datalog recording interval (seconds).
///
/// Instruments shipped with factory settings sample once per second.
pub const DEFAULT_RECORDING_INTERVAL_SECONDS: i32 = 1;
