// src/model/library.rs

//! Literature-derived linear coefficients.
//!
//! A values follow published enthalpies of formation (Holmes et al. 1989 for
//! Cu2O, NIST-JANAF and the NIST WebBook for the rest). B values are rough
//! estimates from standard entropies and drift at high temperature.

use super::species::{DisplayStyle, LineStyle, Oxidant, Species, SpeciesTable};
use crate::error::Result;

// (name, A kJ/mol, B kJ/mol/K, mol oxidant per formula unit, color, line, reaction)
type Row = (&'static str, f64, f64, f64, &'static str, LineStyle, &'static str);

const OXIDES: [Row; 7] = [
    ("Cu2O", -170.0, 0.075, 0.5, "#0077BB", LineStyle::Solid, "2Cu + ½O₂ → Cu₂O"),
    ("CuO", -155.0, 0.085, 0.5, "#56B4E9", LineStyle::Dashed, "Cu + ½O₂ → CuO"),
    ("FeO", -264.0, 0.065, 0.5, "#EE7733", LineStyle::Dashed, "Fe + ½O₂ → FeO"),
    ("Al2O3", -1676.0, 0.32, 1.5, "#AA3377", LineStyle::Dotted, "4/3Al + O₂ → 2/3Al₂O₃"),
    ("MgO", -601.0, 0.11, 0.5, "#009988", LineStyle::Solid, "2Mg + O₂ → 2MgO"),
    ("SiO2", -910.0, 0.18, 1.0, "#CC3311", LineStyle::Dashed, "Si + O₂ → SiO₂"),
    ("TiO2", -944.0, 0.18, 1.0, "#E69F00", LineStyle::Dotted, "Ti + O₂ → TiO₂"),
];

const SULFIDES: [Row; 2] = [
    ("FeS", -150.0, 0.027, 0.5, "#8C564B", LineStyle::Solid, "Fe + ½S₂ → FeS"),
    ("Cu2S", -180.0, 0.032, 0.5, "#0077BB", LineStyle::Dashed, "2Cu + ½S₂ → Cu₂S"),
];

fn build(rows: &[Row], oxidant: Oxidant) -> Result<SpeciesTable> {
    let species = rows
        .iter()
        .map(|&(name, a, b, d, color, line, reaction)| {
            Species::new(name, a, b, d, oxidant, DisplayStyle::new(color, line, reaction))
        })
        .collect::<Result<Vec<_>>>()?;
    SpeciesTable::new(species)
}

/// Cu oxides, FeO and the four ceramic candidates, per mol O₂.
pub fn oxides() -> Result<SpeciesTable> {
    build(&OXIDES, Oxidant::O2)
}

/// FeS and Cu2S, per mol S₂.
pub fn sulfides() -> Result<SpeciesTable> {
    build(&SULFIDES, Oxidant::S2)
}

/// Presentation style for a species known to the library, used to colour
/// curves that come from an external table.
pub fn style_for(name: &str) -> Option<DisplayStyle> {
    OXIDES
        .iter()
        .chain(SULFIDES.iter())
        .find(|row| row.0.eq_ignore_ascii_case(name))
        .map(|&(_, _, _, _, color, line, reaction)| DisplayStyle::new(color, line, reaction))
}

/// "Al2O3" -> "Al₂O₃"
pub fn pretty_formula(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            '9' => '₉',
            other => other,
        })
        .collect()
}

/// Melting points (°C) of the compounds on the default diagram.
/// The linear model is not meaningful past these.
pub fn melting_point_c(name: &str) -> Option<f64> {
    match name {
        "Cu2O" => Some(1235.0),
        "CuO" => Some(1326.0),
        "FeO" => Some(1377.0),
        "SiO2" => Some(1713.0),
        "TiO2" => Some(1843.0),
        "Al2O3" => Some(2072.0),
        "MgO" => Some(2852.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_validate() {
        let ox = oxides().unwrap();
        assert_eq!(ox.len(), 7);
        assert_eq!(ox.names()[0], "Cu2O");
        let sul = sulfides().unwrap();
        assert_eq!(sul.names(), vec!["FeS", "Cu2S"]);
        assert!(sul.iter().all(|s| s.oxidant() == Oxidant::S2));
    }

    #[test]
    fn test_al2o3_coefficients() {
        let ox = oxides().unwrap();
        let al = ox.get("Al2O3").unwrap();
        assert_eq!(al.enthalpy(), -1676.0);
        assert_eq!(al.entropy(), 0.32);
        assert_eq!(al.divisor(), 1.5);
        assert_eq!(al.style().color, (0xAA, 0x33, 0x77));
    }

    #[test]
    fn test_style_lookup_is_case_insensitive() {
        assert!(style_for("mgo").is_some());
        assert!(style_for("ZrO2").is_none());
    }

    #[test]
    fn test_pretty_formula() {
        assert_eq!(pretty_formula("Al2O3"), "Al₂O₃");
        assert_eq!(pretty_formula("MgO"), "MgO");
    }

    #[test]
    fn test_melting_points() {
        // Cu oxides melt below steelmaking temperature
        assert!(melting_point_c("Cu2O").unwrap() < 1400.0);
        assert!(melting_point_c("MgO").unwrap() > 1600.0);
        assert!(melting_point_c("FeS").is_none());
    }
}
