// src/io/mod.rs
pub mod tc_export;
pub mod tc_table;

pub use tc_table::EnergyUnit;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::model::{library, Dataset};

/// Which built-in literature table to use when no ΔG table is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum BuiltinTable {
    /// Cu oxides, FeO and the ceramic candidates, per mol O₂
    #[default]
    #[value(name = "oxides")]
    Oxides,
    /// FeS and Cu2S, per mol S₂
    #[value(name = "sulfides")]
    Sulfides,
}

/// A pre-computed table when `path` is given, the chosen built-in table otherwise.
pub fn load_dataset(path: Option<&Path>, unit: EnergyUnit, builtin: BuiltinTable) -> Result<Dataset> {
    match (path, builtin) {
        (Some(p), _) => tc_table::load(p, unit),
        (None, BuiltinTable::Oxides) => {
            let table = library::oxides()?;
            Ok(Dataset::from_table("literature oxides (linear A + B·T)", &table))
        }
        (None, BuiltinTable::Sulfides) => {
            let table = library::sulfides()?;
            Ok(Dataset::from_table("literature sulfides (linear A + B·T)", &table))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Oxidant;

    #[test]
    fn test_builtin_tables() {
        let oxides = load_dataset(None, EnergyUnit::KiloJoule, BuiltinTable::Oxides).unwrap();
        assert_eq!(oxides.len(), 7);
        assert!(oxides.get("Cu2O").is_some());

        let sulfides = load_dataset(None, EnergyUnit::KiloJoule, BuiltinTable::Sulfides).unwrap();
        assert_eq!(sulfides.names(), vec!["FeS", "Cu2S"]);
        assert!(sulfides.curves().iter().all(|c| c.oxidant() == Oxidant::S2));
    }

    #[test]
    fn test_table_file_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        std::fs::write(&path, "T_K,dG_MgO_per_O2\n1000,-987\n").unwrap();

        let ds = load_dataset(Some(&path), EnergyUnit::KiloJoule, BuiltinTable::Sulfides).unwrap();
        assert_eq!(ds.names(), vec!["MgO"]);
    }
}
