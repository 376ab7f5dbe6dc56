//! Datalog Documents and Gas Tables
//!
//! ## Overview
//!
//! This crate is the file-facing side of the exposure engine. It reads
//! instrument datalogs from JSON, hands them to [`exposure_core`] and writes
//! the computed TWA/STEL values back out in the same shape.
//!
//! ## Documents
//!
//! A [`DatalogDocument`] is the JSON form of a
//! [`DatalogSession`](exposure_core::DatalogSession). Instruments that never
//! had an exposure alarm configured report it as `null` or as the most
//! negative double; both load as an unset alarm.
//!
//! ## Gas Tables
//!
//! Gas tables are versioned JSON files embedded at build time. The
//! [`GLOBAL_GAS_TABLES`] registry is preloaded with them, and further
//! revisions can be registered at runtime.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use exposure_core::compute_datalog;
//! use exposure_schemas::{export_exposure_json, load_datalog_file, GLOBAL_GAS_TABLES};
//!
//! let mut datalog = load_datalog_file("download.json")?;
//! let table = GLOBAL_GAS_TABLES.latest()?;
//! compute_datalog(&mut datalog, &table);
//!
//! let report = export_exposure_json(&datalog)?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

use log::debug;

use exposure_core::{DatalogError, DatalogSession};

pub mod document;
pub mod registry;

pub use document::{DatalogDocument, PeriodDocument, ReadingDocument, SensorDocument};
pub use registry::{load_gas_table_str, GasTableRegistry, GLOBAL_GAS_TABLES};

/// Document and registry errors
#[derive(Debug, Clone, PartialEq, thiserror_no_std::Error)]
pub enum SchemaError {
    /// Malformed JSON, or an embedded table that cannot be read
    #[error("Failed to parse: {0}")]
    Parse(String),

    /// Reading a file failed
    #[error("I/O error: {0}")]
    Io(String),

    /// No gas table with the requested version
    #[error("Not found: {0}")]
    NotFound(String),

    /// Well-formed JSON that the core model rejects
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A writer panicked while holding the registry lock
    #[error("Registry lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for SchemaError {
    fn from(e: std::io::Error) -> Self {
        SchemaError::Io(e.to_string())
    }
}

impl From<DatalogError> for SchemaError {
    fn from(e: DatalogError) -> Self {
        SchemaError::InvalidDocument(e.to_string())
    }
}

/// Parse a datalog from JSON text
pub fn load_datalog_str(json: &str) -> Result<DatalogSession, SchemaError> {
    let document: DatalogDocument = serde_json::from_str(json)?;
    document.into_session()
}

/// Read and parse a datalog file
pub fn load_datalog_file(path: impl AsRef<Path>) -> Result<DatalogSession, SchemaError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)?;
    let datalog = load_datalog_str(&json)?;
    debug!(
        "Loaded datalog {} from {} ({} sensors)",
        datalog.serial_number,
        path.display(),
        datalog.sensors.len()
    );
    Ok(datalog)
}

/// Export a datalog with its computed exposure values
pub fn export_exposure_json(datalog: &DatalogSession) -> Result<serde_json::Value, SchemaError> {
    Ok(serde_json::to_value(DatalogDocument::from_session(datalog))?)
}
