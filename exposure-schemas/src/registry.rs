//! Gas Table Registry with Version Management
//!
//! Gas tables are revised independently of the engine. The registry keeps
//! every known revision so an old datalog can be recomputed against the
//! table it was originally reported with.

use std::collections::BTreeMap;
use std::sync::RwLock;

use include_dir::{include_dir, Dir};
use log::{debug, warn};

use exposure_core::{GasEligibility, GasTable};

use crate::SchemaError;

static EMBEDDED_TABLES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/tables");

/// Parse a gas table from its JSON form
///
/// Rejects empty tables and tables listing the same code twice.
pub fn load_gas_table_str(json: &str) -> Result<GasTable, SchemaError> {
    let table: GasTable = serde_json::from_str(json)?;
    validate_table(&table)?;
    Ok(table)
}

fn validate_table(table: &GasTable) -> Result<(), SchemaError> {
    if table.is_empty() {
        return Err(SchemaError::InvalidDocument(format!(
            "gas table v{} has no entries",
            table.version
        )));
    }

    for (i, entry) in table.entries.iter().enumerate() {
        if table.entries[..i].iter().any(|e| e.code == entry.code) {
            return Err(SchemaError::InvalidDocument(format!(
                "gas table v{} lists {} twice",
                table.version, entry.code
            )));
        }
    }

    Ok(())
}

/// Thread-safe registry of gas table revisions
pub struct GasTableRegistry {
    tables: RwLock<BTreeMap<u32, GasTable>>,
}

impl GasTableRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a table, replacing any table with the same version
    pub fn register(&self, table: GasTable) -> Result<(), SchemaError> {
        validate_table(&table)?;

        let mut tables = self.tables.write().map_err(|_| SchemaError::LockPoisoned)?;

        if tables.contains_key(&table.version) {
            warn!("Replacing gas table v{}", table.version);
        }
        debug!("Registered gas table v{} ({} gases)", table.version, table.len());
        tables.insert(table.version, table);

        Ok(())
    }

    /// Get a table by version
    pub fn get(&self, version: u32) -> Result<GasTable, SchemaError> {
        let tables = self.tables.read().map_err(|_| SchemaError::LockPoisoned)?;

        tables
            .get(&version)
            .cloned()
            .ok_or_else(|| SchemaError::NotFound(format!("gas table v{}", version)))
    }

    /// Get the highest registered version
    pub fn latest(&self) -> Result<GasTable, SchemaError> {
        let tables = self.tables.read().map_err(|_| SchemaError::LockPoisoned)?;

        tables
            .values()
            .next_back()
            .cloned()
            .ok_or_else(|| SchemaError::NotFound("No gas tables registered".to_string()))
    }

    /// All registered versions, ascending
    pub fn versions(&self) -> Result<Vec<u32>, SchemaError> {
        let tables = self.tables.read().map_err(|_| SchemaError::LockPoisoned)?;

        Ok(tables.keys().copied().collect())
    }

    /// Look up eligibility in a specific table version
    pub fn is_eligible_in(&self, version: u32, gas_code: &str) -> Result<bool, SchemaError> {
        let tables = self.tables.read().map_err(|_| SchemaError::LockPoisoned)?;

        tables
            .get(&version)
            .map(|table| table.is_stel_twa_eligible(gas_code))
            .ok_or_else(|| SchemaError::NotFound(format!("gas table v{}", version)))
    }

    /// Load the tables shipped with this crate
    pub fn load_defaults(&self) -> Result<(), SchemaError> {
        for file in EMBEDDED_TABLES.files() {
            let path = file.path().display().to_string();
            let json = file
                .contents_utf8()
                .ok_or_else(|| SchemaError::Parse(format!("{} is not UTF-8", path)))?;

            let table = load_gas_table_str(json)
                .map_err(|e| SchemaError::Parse(format!("{}: {}", path, e)))?;
            self.register(table)?;
        }

        Ok(())
    }
}

impl Default for GasTableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static::lazy_static! {
    /// Global gas table registry with the shipped tables loaded
    pub static ref GLOBAL_GAS_TABLES: GasTableRegistry = {
        let registry = GasTableRegistry::new();
        if let Err(e) = registry.load_defaults() {
            warn!("Failed to load embedded gas tables: {}", e);
        }
        registry
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use exposure_core::{gas::gas_code, GasEntry};

    fn entry(code: &str, eligible: bool) -> GasEntry {
        GasEntry {
            code: gas_code(code).unwrap(),
            symbol: gas_code("X").unwrap(),
            stel_twa: eligible,
        }
    }

    #[test]
    fn embedded_table_matches_built_in() {
        let registry = GasTableRegistry::new();
        registry.load_defaults().unwrap();

        assert_eq!(registry.get(1).unwrap(), GasTable::default_table());
    }

    #[test]
    fn latest_version() {
        let registry = GasTableRegistry::new();
        registry.register(GasTable::default_table()).unwrap();

        let mut v2 = GasTable::default_table();
        v2.version = 2;
        v2.insert(entry("G0021", true));
        registry.register(v2).unwrap();

        assert_eq!(registry.versions().unwrap(), vec![1, 2]);
        assert_eq!(registry.latest().unwrap().version, 2);
        assert!(!registry.is_eligible_in(1, "G0021").unwrap());
        assert!(registry.is_eligible_in(2, "G0021").unwrap());
    }

    #[test]
    fn missing_versions_are_not_found() {
        let registry = GasTableRegistry::new();
        assert!(matches!(registry.latest(), Err(SchemaError::NotFound(_))));
        assert!(matches!(registry.get(7), Err(SchemaError::NotFound(_))));
    }

    #[test]
    fn rejects_duplicate_codes() {
        let json = r#"{"version":3,"entries":[
            {"code":"G0001","symbol":"CO","stel_twa":true},
            {"code":"G0001","symbol":"CO","stel_twa":false}]}"#;
        assert!(matches!(load_gas_table_str(json), Err(SchemaError::InvalidDocument(_))));
    }

    #[test]
    fn rejects_empty_table() {
        let registry = GasTableRegistry::new();
        assert!(registry.register(GasTable::new(4)).is_err());
    }

    #[test]
    fn poisoned_lock_is_reported() {
        use std::sync::Arc;

        let registry = Arc::new(GasTableRegistry::new());
        registry.register(GasTable::default_table()).unwrap();

        let writer = Arc::clone(&registry);
        let result = std::thread::spawn(move || {
            let _guard = writer.tables.write().unwrap();
            panic!("writer failed mid-update");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(registry.latest(), Err(SchemaError::LockPoisoned));
        assert_eq!(registry.register(GasTable::default_table()), Err(SchemaError::LockPoisoned));
    }

    #[test]
    fn global_registry_is_preloaded() {
        assert!(GLOBAL_GAS_TABLES.versions().unwrap().contains(&1));
    }
}
