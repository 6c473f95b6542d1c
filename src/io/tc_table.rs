// src/io/tc_table.rs

//! Interchange table produced by the CALPHAD extraction step.
//!
//! One row per temperature, one `dG_<species>_per_O2` column per species:
//!
//! ```text
//! T_K,T_C,dG_Cu2O_per_O2,dG_Al2O3_per_O2,...
//! 500,226.85,-254.3,-1053.1,...
//! ```
//!
//! Any other column (`GM_*`, `phases_*`, ...) is ignored. Empty cells mark
//! temperatures where the extraction failed and are skipped.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Result, ScreeningError};
use crate::model::{library, Curve, Dataset, DisplayStyle, LineStyle, TabulatedCurve};
use crate::physics::{kelvin_to_celsius, FormationLine, TemperatureRange};

const COLUMN_PREFIX: &str = "dG_";
const COLUMN_SUFFIX: &str = "_per_O2";

// Paul Tol "bright", used for species the built-in library does not know
const PALETTE: [&str; 6] = ["#4477AA", "#EE6677", "#228833", "#CCBB44", "#66CCEE", "#AA3377"];

/// Unit of the energy cells in a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum EnergyUnit {
    /// kJ per mol O₂
    #[default]
    #[value(name = "kj")]
    KiloJoule,
    /// J per mol O₂, as written by the raw extraction script
    #[value(name = "j")]
    Joule,
}

impl EnergyUnit {
    fn to_kilojoule(self, value: f64) -> f64 {
        match self {
            EnergyUnit::KiloJoule => value,
            EnergyUnit::Joule => value / 1000.0,
        }
    }
}

/// `dG_Al2O3_per_O2` -> `Al2O3`
pub fn species_from_column(header: &str) -> Option<&str> {
    let name = header.strip_prefix(COLUMN_PREFIX)?.strip_suffix(COLUMN_SUFFIX)?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

pub fn column_for_species(name: &str) -> String {
    format!("{}{}{}", COLUMN_PREFIX, name, COLUMN_SUFFIX)
}

pub fn load(path: &Path, unit: EnergyUnit) -> Result<Dataset> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| ScreeningError::load(&source, e.to_string()))?;
    let dataset = parse(BufReader::new(file), &source, unit)?;
    log::info!("Loaded {} tabulated species from {}", dataset.len(), source);
    Ok(dataset)
}

pub fn parse<R: Read>(reader: R, source: &str, unit: EnergyUnit) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ScreeningError::load(source, e.to_string()))?
        .clone();

    let t_col = headers
        .iter()
        .position(|h| h == "T_K")
        .ok_or_else(|| ScreeningError::load(source, "missing T_K column"))?;

    let species_cols: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| species_from_column(h).map(|name| (i, name.to_string())))
        .collect();

    if species_cols.is_empty() {
        return Err(ScreeningError::load(source, "no dG_<species>_per_O2 columns"));
    }

    let mut points: Vec<Vec<(f64, f64)>> = vec![Vec::new(); species_cols.len()];

    for (row_idx, record) in rdr.records().enumerate() {
        // header is line 1
        let line = row_idx + 2;
        let record = record.map_err(|e| ScreeningError::load(source, e.to_string()))?;

        let t_raw = record.get(t_col).unwrap_or("");
        let t_k: f64 = t_raw.parse().map_err(|_| {
            ScreeningError::load(source, format!("line {}: T_K '{}' is not a number", line, t_raw))
        })?;

        for (slot, (col, name)) in species_cols.iter().enumerate() {
            let cell = record.get(*col).unwrap_or("");
            if cell.is_empty() {
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| {
                ScreeningError::load(
                    source,
                    format!("line {}: {} value '{}' is not a number", line, name, cell),
                )
            })?;
            points[slot].push((t_k, unit.to_kilojoule(value)));
        }
    }

    let mut curves = Vec::with_capacity(species_cols.len());
    for (i, ((_, name), pts)) in species_cols.into_iter().zip(points).enumerate() {
        if pts.is_empty() {
            return Err(ScreeningError::load(source, format!("{} has no values", name)));
        }
        let style = library::style_for(&name).unwrap_or_else(|| {
            DisplayStyle::new(PALETTE[i % PALETTE.len()], LineStyle::Solid, "")
        });
        let curve = TabulatedCurve::new(&name, pts, style)
            .map_err(|e| ScreeningError::load(source, e.to_string()))?;
        curves.push(Curve::Tabulated(curve));
    }

    Dataset::new(source, curves)
}

/// Samples every curve on `range` and writes the interchange format, kJ.
/// A tabulated curve gets an empty cell outside its own temperature span.
pub fn write<W: Write>(writer: W, curves: &[&Curve], range: &TemperatureRange) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(curves.iter().map(|c| c.name())))?;

    for t in range.temperatures() {
        let mut row = vec![format!("{}", t), format!("{:.2}", kelvin_to_celsius(t))];
        row.extend(curves.iter().map(|c| match c {
            Curve::Tabulated(tab) if !covers(tab, t) => String::new(),
            _ => format!("{}", c.free_energy_per_oxidant(t)),
        }));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save(path: &Path, curves: &[&Curve], range: &TemperatureRange) -> Result<()> {
    let file = File::create(path)?;
    write(BufWriter::new(file), curves, range)?;
    log::info!("Wrote {} curves x {} temperatures to {}", curves.len(), range.len(), path.display());
    Ok(())
}

/// Writes tabulated curves on the union of their own temperatures, kJ.
/// Where a curve has no row at a temperature its cell stays empty.
/// Returns the number of rows written.
pub fn write_tabulated<W: Write>(writer: W, curves: &[TabulatedCurve]) -> Result<usize> {
    let mut temps: Vec<f64> = curves
        .iter()
        .flat_map(|c| c.points().iter().map(|p| p.0))
        .collect();
    temps.sort_by(f64::total_cmp);
    temps.dedup();

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(curves.iter().map(|c| c.name())))?;

    for &t in &temps {
        let mut row = vec![format!("{}", t), format!("{:.2}", kelvin_to_celsius(t))];
        row.extend(curves.iter().map(|c| {
            c.points()
                .iter()
                .find(|p| p.0 == t)
                .map(|p| format!("{}", p.1))
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(temps.len())
}

pub fn save_tabulated(path: &Path, curves: &[TabulatedCurve]) -> Result<()> {
    let file = File::create(path)?;
    let rows = write_tabulated(BufWriter::new(file), curves)?;
    log::info!("Wrote {} curves x {} temperatures to {}", curves.len(), rows, path.display());
    Ok(())
}

fn header<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut header = vec!["T_K".to_string(), "T_C".to_string()];
    header.extend(names.map(column_for_species));
    header
}

fn covers(curve: &TabulatedCurve, temperature_k: f64) -> bool {
    let (lo, hi) = curve.temperature_span();
    (lo..=hi).contains(&temperature_k)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
T_K,T_C,GM_Cu2O,dG_Cu2O_per_O2,phases_Cu2O,dG_MgO_per_O2
500,226.85,-1,-254300,CUPRITE;GAS,-1040000
1000,726.85,-2,-190100,CUPRITE,-987000
1500,1226.85,-3,,Error: no convergence,-930000
";

    #[test]
    fn test_column_names() {
        assert_eq!(species_from_column("dG_Al2O3_per_O2"), Some("Al2O3"));
        assert_eq!(species_from_column("GM_Al2O3"), None);
        assert_eq!(species_from_column("dG__per_O2"), None);
        assert_eq!(column_for_species("MgO"), "dG_MgO_per_O2");
    }

    #[test]
    fn test_parse_joule_table() {
        let ds = parse(SAMPLE.as_bytes(), "sample", EnergyUnit::Joule).unwrap();
        assert_eq!(ds.names(), vec!["Cu2O", "MgO"]);

        let cu = ds.get("Cu2O").unwrap();
        // empty cell at 1500 K skipped
        match cu {
            Curve::Tabulated(t) => assert_eq!(t.points().len(), 2),
            _ => panic!("expected tabulated curve"),
        }
        assert!((cu.free_energy_per_oxidant(1000.0) - (-190.1)).abs() < 1e-9);
        assert!((ds.get("MgO").unwrap().free_energy_per_oxidant(1490.0) - (-930.0)).abs() < 1e-9);
        // known species keep their library colour
        assert_eq!(cu.style().color, (0x00, 0x77, 0xBB));
    }

    #[test]
    fn test_missing_temperature_column() {
        let err = parse("T_C,dG_MgO_per_O2\n1,2\n".as_bytes(), "x", EnergyUnit::KiloJoule).unwrap_err();
        assert!(err.to_string().contains("T_K"));
    }

    #[test]
    fn test_malformed_value_reports_line() {
        let csv = "T_K,dG_MgO_per_O2\n500,-1040\n1000,abc\n";
        let err = parse(csv.as_bytes(), "x", EnergyUnit::KiloJoule).unwrap_err();
        assert!(matches!(err, ScreeningError::Load { .. }));
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_species_without_values_rejected() {
        let csv = "T_K,dG_MgO_per_O2,dG_CuO_per_O2\n500,-1040,\n1000,-987,\n";
        let err = parse(csv.as_bytes(), "x", EnergyUnit::KiloJoule).unwrap_err();
        assert!(err.to_string().contains("CuO"));
    }

    #[test]
    fn test_no_species_columns() {
        let err = parse("T_K,T_C\n500,226.85\n".as_bytes(), "x", EnergyUnit::KiloJoule).unwrap_err();
        assert!(err.to_string().contains("no dG_"));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let err = load(Path::new("/nonexistent/oxide_gibbs_energies.csv"), EnergyUnit::Joule).unwrap_err();
        assert!(matches!(err, ScreeningError::Load { .. }));
    }

    #[test]
    fn test_written_sweep_loads_back() {
        let ds = Dataset::from_table("builtin", &library::oxides().unwrap());
        let curves: Vec<&Curve> = ds.curves().iter().collect();
        let range = TemperatureRange::new(500.0, 2000.0, 100.0).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweep.csv");
        save(&path, &curves, &range).unwrap();

        let loaded = load(&path, EnergyUnit::KiloJoule).unwrap();
        assert_eq!(loaded.names(), ds.names());
        for t in range.temperatures() {
            for name in ds.names() {
                let a = ds.get(name).unwrap().free_energy_per_oxidant(t);
                let b = loaded.get(name).unwrap().free_energy_per_oxidant(t);
                assert!((a - b).abs() < 1e-9, "{} at {}: {} vs {}", name, t, a, b);
            }
        }
    }

    fn tabulated(name: &str, points: Vec<(f64, f64)>) -> TabulatedCurve {
        TabulatedCurve::new(name, points, DisplayStyle::default()).unwrap()
    }

    #[test]
    fn test_sampled_table_leaves_cells_outside_span_empty() {
        let short = Curve::Tabulated(tabulated("Cu2O", vec![(1273.0, -180.0), (1373.0, -170.0)]));
        let range = TemperatureRange::new(1273.0, 1573.0, 100.0).unwrap();

        let mut buf = Vec::new();
        write(&mut buf, &[&short], &range).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows[1], "1273,999.85,-180");
        assert_eq!(rows[3], "1473,1199.85,");
        assert_eq!(rows[4], "1573,1299.85,");

        let loaded = parse(text.as_bytes(), "x", EnergyUnit::KiloJoule).unwrap();
        match loaded.get("Cu2O").unwrap() {
            Curve::Tabulated(t) => assert_eq!(t.temperature_span(), (1273.0, 1373.0)),
            _ => panic!("expected tabulated curve"),
        }
    }

    #[test]
    fn test_tabulated_union_keeps_only_real_rows() {
        let cu = tabulated("Cu2O", vec![(1273.0, -180.0), (1373.0, -170.0)]);
        let al = tabulated("Al2O3", vec![(1273.0, -840.0), (1873.0, -733.5)]);

        let mut buf = Vec::new();
        let rows = write_tabulated(&mut buf, &[cu, al]).unwrap();
        assert_eq!(rows, 3);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "T_K,T_C,dG_Cu2O_per_O2,dG_Al2O3_per_O2");
        assert_eq!(lines[1], "1273,999.85,-180,-840");
        assert_eq!(lines[2], "1373,1099.85,-170,");
        assert_eq!(lines[3], "1873,1599.85,,-733.5");
        assert_eq!(lines.len(), 4);
    }
}
