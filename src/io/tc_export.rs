// src/io/tc_export.rs

//! Raw Thermo-Calc console exports: tab-separated, `#` comments, one
//! temperature column and one molar Gibbs energy column (J/mol).

use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use crate::error::{Result, ScreeningError};
use crate::model::{library, TabulatedCurve};

/// "cu2o_dGf_1273-1873K.txt" -> "cu2o"
pub fn species_from_filename(path: &Path) -> String {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy().to_string();
    stem.split('_').next().unwrap_or_default().to_string()
}

/// Library spelling and O₂ factor of a known oxide ("cu2o" -> ("Cu2O", 0.5)).
pub fn lookup_oxide(name: &str) -> Option<(String, f64)> {
    let table = library::oxides().ok()?;
    table
        .iter()
        .find(|s| s.name().eq_ignore_ascii_case(name))
        .map(|s| (s.name().to_string(), s.divisor()))
}

pub fn parse(path: &Path, name: &str, o2_factor: f64) -> Result<TabulatedCurve> {
    let source = path.display().to_string();
    let file = File::open(path).map_err(|e| ScreeningError::load(&source, e.to_string()))?;
    parse_reader(io::BufReader::new(file), &source, name, o2_factor)
}

pub fn parse_reader<R: BufRead>(
    reader: R,
    source: &str,
    name: &str,
    o2_factor: f64,
) -> Result<TabulatedCurve> {
    if !o2_factor.is_finite() || o2_factor <= 0.0 {
        return Err(ScreeningError::domain(
            name,
            format!("O2 factor must be > 0, got {}", o2_factor),
        ));
    }

    let mut columns: Option<(usize, usize)> = None;
    let mut points = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split('\t').map(|p| p.trim()).collect();

        let (t_col, g_col) = match columns {
            Some(c) => c,
            None => {
                // First real line is the header
                let t_col = parts.iter().position(|h| h.to_uppercase().contains('T'));
                let g_col = parts.iter().position(|h| h.to_uppercase().contains('G'));
                match (t_col, g_col) {
                    (Some(t), Some(g)) => columns = Some((t, g)),
                    _ => {
                        return Err(ScreeningError::load(
                            source,
                            "header has no temperature or Gibbs energy column",
                        ))
                    }
                }
                continue;
            }
        };

        let cell = |col: usize| parts.get(col).copied().unwrap_or("");
        let t_k: f64 = cell(t_col).parse().map_err(|_| {
            ScreeningError::load(source, format!("line {}: bad temperature '{}'", i + 1, cell(t_col)))
        })?;
        let gm_j: f64 = cell(g_col).parse().map_err(|_| {
            ScreeningError::load(source, format!("line {}: bad Gibbs energy '{}'", i + 1, cell(g_col)))
        })?;

        points.push((t_k, gm_j / 1000.0 / o2_factor));
    }

    if points.is_empty() {
        return Err(ScreeningError::load(source, "no data rows"));
    }

    let style = library::style_for(name).unwrap_or_default();
    TabulatedCurve::new(name, points, style)
}
