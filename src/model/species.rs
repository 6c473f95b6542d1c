// src/model/species.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScreeningError};

/// The gas a compound is formed from. Only changes axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Oxidant {
    O2,
    S2,
}

impl Oxidant {
    pub fn label(&self) -> &'static str {
        match self {
            Oxidant::O2 => "O₂",
            Oxidant::S2 => "S₂",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

/// Presentation-only metadata. Never used in a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStyle {
    pub color: (u8, u8, u8),
    pub line: LineStyle,
    pub reaction: String,
}

impl DisplayStyle {
    pub fn new(hex: &str, line: LineStyle, reaction: &str) -> Self {
        Self {
            color: parse_hex_color(hex).unwrap_or((0x55, 0x55, 0x55)),
            line,
            reaction: reaction.to_string(),
        }
    }
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self {
            color: (0x55, 0x55, 0x55),
            line: LineStyle::Solid,
            reaction: String::new(),
        }
    }
}

/// "#0077BB" -> (0x00, 0x77, 0xBB)
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let h = hex.trim().trim_start_matches('#');
    if h.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&h[0..2], 16).ok()?;
    let g = u8::from_str_radix(&h[2..4], 16).ok()?;
    let b = u8::from_str_radix(&h[4..6], 16).ok()?;
    Some((r, g, b))
}

/// One compound with a linear free energy of formation, ΔG = A + B·T (kJ/mol).
///
/// Fields are private: the only way to get a `Species` is through
/// [`Species::new`], which rejects a divisor that is zero, negative or not
/// finite. Every live record can therefore be normalized without checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    name: String,
    enthalpy: f64,
    entropy: f64,
    divisor: f64,
    oxidant: Oxidant,
    style: DisplayStyle,
}

impl Species {
    pub fn new(
        name: &str,
        enthalpy: f64,
        entropy: f64,
        divisor: f64,
        oxidant: Oxidant,
        style: DisplayStyle,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ScreeningError::domain("<unnamed>", "species name is empty"));
        }
        if !enthalpy.is_finite() {
            return Err(ScreeningError::domain(name, "enthalpy coefficient A is missing or not finite"));
        }
        if !entropy.is_finite() {
            return Err(ScreeningError::domain(name, "entropy coefficient B is missing or not finite"));
        }
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ScreeningError::domain(
                name,
                format!("stoichiometric divisor must be > 0, got {}", divisor),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            enthalpy,
            entropy,
            divisor,
            oxidant,
            style,
        })
    }

    /// Oxide with default presentation, mostly for tests and ad-hoc CLI use.
    pub fn oxide(name: &str, enthalpy: f64, entropy: f64, divisor: f64) -> Result<Self> {
        Self::new(name, enthalpy, entropy, divisor, Oxidant::O2, DisplayStyle::default())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A, kJ/mol of formula unit
    pub fn enthalpy(&self) -> f64 {
        self.enthalpy
    }

    /// B, kJ/(mol·K)
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    pub fn divisor(&self) -> f64 {
        self.divisor
    }

    pub fn oxidant(&self) -> Oxidant {
        self.oxidant
    }

    pub fn style(&self) -> &DisplayStyle {
        &self.style
    }

    /// ΔG per formula unit as written, before normalization.
    pub fn raw_free_energy(&self, temperature_k: f64) -> f64 {
        self.enthalpy + self.entropy * temperature_k
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ΔG = {} {:+} T kJ/mol, / {} per mol {}",
            self.name,
            self.enthalpy,
            self.entropy,
            self.divisor,
            self.oxidant.label()
        )
    }
}

/// Immutable, validated, ordered list of species.
/// Input order is kept; it decides the order of exact ties when ranking.
#[derive(Debug, Clone, Default)]
pub struct SpeciesTable {
    species: Vec<Species>,
}

impl SpeciesTable {
    pub fn new(species: Vec<Species>) -> Result<Self> {
        for (i, s) in species.iter().enumerate() {
            if species[..i].iter().any(|prev| prev.name() == s.name()) {
                return Err(ScreeningError::domain(s.name(), "duplicate species name in table"));
            }
        }
        Ok(Self { species })
    }

    pub fn get(&self, name: &str) -> Option<&Species> {
        self.species.iter().find(|s| s.name() == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Species> {
        self.species.iter()
    }

    pub fn as_slice(&self) -> &[Species] {
        &self.species
    }

    pub fn names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}

impl<'a> IntoIterator for &'a SpeciesTable {
    type Item = &'a Species;
    type IntoIter = std::slice::Iter<'a, Species>;

    fn into_iter(self) -> Self::IntoIter {
        self.species.iter()
    }
}
