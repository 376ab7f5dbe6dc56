//! Gas Eligibility for STEL/TWA Computation
//!
//! Only gases with occupational exposure limits get STEL and TWA values.
//! Oxygen is measured as a deficiency/enrichment, combustibles as a fraction
//! of their lower explosive limit, and neither has an exposure limit.
//!
//! The table is reference data, not part of the algorithm. The engine takes
//! anything implementing [`GasEligibility`], so a newer table (for example
//! one loaded from JSON by `exposure-schemas`) can be used without touching
//! the computation.
//!
//! ```rust
//! use exposure_core::gas::{GasEligibility, GasTable};
//!
//! let table = GasTable::default_table();
//! assert!(table.is_stel_twa_eligible("G0001"));  // carbon monoxide
//! assert!(!table.is_stel_twa_eligible("G0020")); // oxygen
//! ```

use alloc::vec::Vec;

use crate::errors::{DatalogError, DatalogResult};

pub use crate::traits::GasEligibility;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum gas code length (inline, no heap)
pub const GAS_CODE_CAPACITY: usize = 16;

/// Gas identity code, e.g. `G0001`
pub type GasCode = heapless::String<GAS_CODE_CAPACITY>;

/// Build a [`GasCode`] from a string slice
pub fn gas_code(code: &str) -> DatalogResult<GasCode> {
    GasCode::try_from(code).map_err(|_| DatalogError::CodeTooLong {
        max: GAS_CODE_CAPACITY,
    })
}

/// One row of the gas table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasEntry {
    /// Gas identity code
    pub code: GasCode,

    /// Chemical symbol or short name for logs
    pub symbol: GasCode,

    /// Whether STEL/TWA apply
    pub stel_twa: bool,
}

/// Versioned gas table
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasTable {
    /// Table revision, bumped when gases are added or reclassified
    pub version: u32,

    /// Known gases
    pub entries: Vec<GasEntry>,
}

/// Version of [`DEFAULT_GAS_ENTRIES`]
pub const DEFAULT_GAS_TABLE_VERSION: u32 = 1;

/// Built-in gas table: (code, symbol, STEL/TWA eligible)
///
/// Excluded: oxygen, the combustible family (reported in %LEL or %VOL),
/// hydrogen and the non-specific combustible channels.
pub const DEFAULT_GAS_ENTRIES: &[(&str, &str, bool)] = &[
    ("G0001", "CO", true),
    ("G0002", "H2S", true),
    ("G0003", "SO2", true),
    ("G0004", "NO2", true),
    ("G0005", "Cl2", true),
    ("G0006", "ClO2", true),
    ("G0007", "HCN", true),
    ("G0008", "PH3", true),
    ("G0009", "H2", false),
    ("G0011", "CO2", true),
    ("G0012", "NO", true),
    ("G0013", "NH3", true),
    ("G0014", "HCl", true),
    ("G0015", "O3", true),
    ("G0016", "COCl2", true),
    ("G0017", "HF", true),
    ("G0020", "O2", false),
    ("G0021", "CH4", false),
    ("G0022", "LEL", false),
    ("G0023", "C6H14", false),
    ("G0024", "C5H12", false),
    ("G0025", "C3H8", false),
    ("G0026", "LEL-UNK", false),
    ("G0027", "C4H10", false),
    ("G0030", "VOC", true),
];

impl GasTable {
    /// Empty table for a given version
    pub fn new(version: u32) -> Self {
        Self {
            version,
            entries: Vec::new(),
        }
    }

    /// The built-in table
    pub fn default_table() -> Self {
        let mut table = Self::new(DEFAULT_GAS_TABLE_VERSION);
        for (code, symbol, stel_twa) in DEFAULT_GAS_ENTRIES {
            // Built-in codes fit GAS_CODE_CAPACITY; see default_entries_fit
            if let (Ok(code), Ok(symbol)) = (gas_code(code), gas_code(symbol)) {
                table.entries.push(GasEntry { code, symbol, stel_twa: *stel_twa });
            }
        }
        table
    }

    /// Add or replace a gas entry
    pub fn insert(&mut self, entry: GasEntry) {
        match self.entries.iter_mut().find(|e| e.code == entry.code) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Look up an entry by code (case-sensitive)
    pub fn get(&self, gas_code: &str) -> Option<&GasEntry> {
        self.entries.iter().find(|e| e.code.as_str() == gas_code)
    }

    /// Number of gases in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no gases
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GasTable {
    fn default() -> Self {
        Self::default_table()
    }
}

impl GasEligibility for GasTable {
    fn is_stel_twa_eligible(&self, gas_code: &str) -> bool {
        // Unknown gases are not on the allow-list
        self.get(gas_code).map_or(false, |e| e.stel_twa)
    }
}
