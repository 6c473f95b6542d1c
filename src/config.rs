// src/config.rs

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::{Result, ScreeningError};
use crate::io::{BuiltinTable, EnergyUnit};
use crate::physics::{TemperatureRange, ValidityWindow};

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ExportFormat {
  Svg,
  Png,
  Pdf,
}

impl ExportFormat {
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
      "svg" => Some(ExportFormat::Svg),
      "png" => Some(ExportFormat::Png),
      "pdf" => Some(ExportFormat::Pdf),
      _ => None,
    }
  }

  pub fn extension(&self) -> &'static str {
    match self {
      ExportFormat::Svg => "svg",
      ExportFormat::Png => "png",
      ExportFormat::Pdf => "pdf",
    }
  }
}

// --- Sweep grid for the plotted curves (K) ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepGrid {
  pub start_k: f64,
  pub stop_k: f64,
  pub step_k: f64,
}

impl Default for SweepGrid {
  fn default() -> Self {
    Self {
      start_k: 500.0,
      stop_k: 2000.0,
      step_k: 25.0,
    }
  }
}

impl SweepGrid {
  pub fn range(&self) -> Result<TemperatureRange> {
    TemperatureRange::new(self.start_k, self.stop_k, self.step_k)
  }
}

// --- ChartStyle ---

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
  pub width: u32,
  pub height: u32,
  pub line_width: u32,
  pub show_steel_band: bool,
  /// Minimum vertical gap between right-edge labels, kJ/mol
  pub label_spacing: f64,
}

impl Default for ChartStyle {
  fn default() -> Self {
    Self {
      width: 1200,
      height: 700,
      line_width: 2,
      show_steel_band: true,
      label_spacing: 45.0,
    }
  }
}

// --- Main Config Struct ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub window: ValidityWindow,
  /// Ranked values closer than this (kJ/mol) are flagged as near-ties.
  /// Zero means only exact ties.
  pub tie_tolerance: f64,
  pub sweep: SweepGrid,
  pub default_temperature_k: f64,
  pub default_selection: Vec<String>,
  pub data_file: Option<PathBuf>,
  /// Used when no data_file is set
  pub builtin_table: BuiltinTable,
  pub energy_unit: EnergyUnit,
  pub default_export_format: ExportFormat,
  pub style: ChartStyle,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      window: ValidityWindow::default(),
      tie_tolerance: 0.0,
      sweep: SweepGrid::default(),
      default_temperature_k: 1873.0,
      default_selection: ["Cu2O", "FeO", "Al2O3", "MgO", "SiO2", "TiO2"]
        .iter()
        .map(|s| s.to_string())
        .collect(),
      data_file: None,
      builtin_table: BuiltinTable::Oxides,
      energy_unit: EnergyUnit::KiloJoule,
      default_export_format: ExportFormat::Svg,
      style: ChartStyle::default(),
    }
  }
}

impl Config {
  /// Loads config from standard OS location (e.g., ~/.config/ellingham/settings.json)
  pub fn load() -> (Self, String) {
    let path = Self::get_path();
    if path.exists() {
      match Self::load_from(&path) {
        Ok(cfg) => (cfg, format!("Config loaded from {:?}", path)),
        Err(e) => (Self::default(), format!("Error reading config: {}", e)),
      }
    } else {
      (
        Self::default(),
        "No config found. Using defaults.".to_string(),
      )
    }
  }

  pub fn load_from(path: &Path) -> Result<Self> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
      .map_err(|e| ScreeningError::load(path.display().to_string(), e.to_string()))
  }

  /// Saves config to standard OS location
  pub fn save(&self) -> String {
    let path = Self::get_path();
    match self.save_to(&path) {
      Ok(()) => format!("Config saved to {:?}", path),
      Err(e) => format!("Failed to save config: {}", e),
    }
  }

  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, self)
      .map_err(|e| ScreeningError::Io(std::io::Error::other(e)))
  }

  pub fn get_path() -> PathBuf {
    if let Some(proj) = ProjectDirs::from("org", "mavensgroup", "ellingham") {
      proj.config_dir().join("settings.json")
    } else {
      PathBuf::from("settings.json")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.window.min_k, 500.0);
    assert_eq!(cfg.window.max_k, 2000.0);
    assert_eq!(cfg.sweep.range().unwrap().len(), 61);
    assert_eq!(cfg.energy_unit, EnergyUnit::KiloJoule);
  }

  #[test]
  fn test_partial_json_fills_defaults() {
    let cfg: Config = serde_json::from_str(r#"{ "tie_tolerance": 0.5, "energy_unit": "Joule" }"#).unwrap();
    assert_eq!(cfg.tie_tolerance, 0.5);
    assert_eq!(cfg.energy_unit, EnergyUnit::Joule);
    assert_eq!(cfg.default_temperature_k, 1873.0);
    assert_eq!(cfg.style.label_spacing, 45.0);
    assert_eq!(cfg.builtin_table, BuiltinTable::Oxides);
  }

  #[test]
  fn test_oversized_sweep_grid_rejected() {
    let cfg: Config = serde_json::from_str(r#"{ "sweep": { "start_k": 500.0, "stop_k": 2000.0, "step_k": 1e-10 } }"#).unwrap();
    assert!(cfg.sweep.range().is_err());

    let cfg: Config = serde_json::from_str(r#"{ "builtin_table": "Sulfides" }"#).unwrap();
    assert_eq!(cfg.builtin_table, BuiltinTable::Sulfides);
  }

  #[test]
  fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");
    let mut cfg = Config::default();
    cfg.default_selection = vec!["MgO".into()];
    cfg.window = ValidityWindow { min_k: 800.0, max_k: 1800.0 };
    cfg.save_to(&path).unwrap();

    let back = Config::load_from(&path).unwrap();
    assert_eq!(back.default_selection, vec!["MgO".to_string()]);
    assert_eq!(back.window.max_k, 1800.0);
  }

  #[test]
  fn test_malformed_config_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(Config::load_from(&path), Err(ScreeningError::Load { .. })));
  }

  #[test]
  fn test_export_format_from_path() {
    assert_eq!(ExportFormat::from_path(Path::new("out/diagram.PDF")), Some(ExportFormat::Pdf));
    assert_eq!(ExportFormat::from_path(Path::new("diagram.svg")), Some(ExportFormat::Svg));
    assert_eq!(ExportFormat::from_path(Path::new("diagram")), None);
  }
}
