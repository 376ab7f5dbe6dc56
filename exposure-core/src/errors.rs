//! Error Types for Datalog Construction
//!
//! ## Where Errors Happen
//!
//! The exposure engine itself is total: sessions it cannot compute are a
//! "not applicable" outcome, never an error. Errors only arise when the
//! data model is built, i.e. at the boundary with whatever decoded the
//! instrument download:
//!
//! - `ZeroRepeatCount`: a run-length compressed reading claiming no samples
//! - `InvalidValue`: a raw value that is NaN or infinite
//! - `InvalidParameter`: explicit validation of recording parameters
//!
//! Negative raw values are *not* errors. Instruments write them for samples
//! that should be ignored, and the engine clamps them to zero.
//!
//! ## Memory Layout
//!
//! Variants carry only `Copy` data and `&'static str`, so the error stays
//! small and can be returned from no_std code without allocation.
//!
//! ```rust
//! use exposure_core::{DatalogError, Reading};
//!
//! match Reading::new(12.5, 0) {
//!     Err(DatalogError::ZeroRepeatCount) => {}
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for datalog construction
pub type DatalogResult<T> = Result<T, DatalogError>;

/// Datalog construction errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DatalogError {
    /// A reading must represent at least one sample
    #[error("Reading repeat count must be at least 1")]
    ZeroRepeatCount,

    /// Raw value is NaN or infinite
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// Code does not fit the inline string
    #[error("Code longer than {max} characters")]
    CodeTooLong {
        /// Maximum length accepted
        max: usize,
    },

    /// Session parameter out of range
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name as shown to the operator
        name: &'static str,
        /// Rejected value
        value: i64,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for DatalogError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::ZeroRepeatCount =>
                defmt::write!(fmt, "Repeat count must be >= 1"),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::CodeTooLong { max } =>
                defmt::write!(fmt, "Code longer than {} bytes", max),
            Self::InvalidParameter { name, value } =>
                defmt::write!(fmt, "Invalid {}: {}", name, value),
        }
    }
}
