// src/model/dataset.rs

use super::species::{DisplayStyle, Oxidant, Species, SpeciesTable};
use super::tabulated::TabulatedCurve;
use crate::error::{Result, ScreeningError};

/// Where a curve's numbers come from.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Linear(Species),
    Tabulated(TabulatedCurve),
}

impl Curve {
    pub fn name(&self) -> &str {
        match self {
            Curve::Linear(s) => s.name(),
            Curve::Tabulated(t) => t.name(),
        }
    }

    pub fn style(&self) -> &DisplayStyle {
        match self {
            Curve::Linear(s) => s.style(),
            Curve::Tabulated(t) => t.style(),
        }
    }

    pub fn oxidant(&self) -> Oxidant {
        match self {
            Curve::Linear(s) => s.oxidant(),
            Curve::Tabulated(t) => t.oxidant(),
        }
    }
}

/// The fixed set of curves for a session. Built once, never mutated;
/// the UI only changes which names are selected.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub source: String,
    curves: Vec<Curve>,
}

impl Dataset {
    pub fn new(source: &str, curves: Vec<Curve>) -> Result<Self> {
        for (i, c) in curves.iter().enumerate() {
            if curves[..i].iter().any(|prev| prev.name() == c.name()) {
                return Err(ScreeningError::domain(c.name(), "duplicate species name in dataset"));
            }
        }
        Ok(Self {
            source: source.to_string(),
            curves,
        })
    }

    pub fn from_table(source: &str, table: &SpeciesTable) -> Self {
        // names are already unique in a SpeciesTable
        Self {
            source: source.to_string(),
            curves: table.iter().cloned().map(Curve::Linear).collect(),
        }
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    pub fn get(&self, name: &str) -> Option<&Curve> {
        self.curves.iter().find(|c| c.name() == name)
    }

    pub fn require(&self, name: &str) -> Result<&Curve> {
        self.get(name)
            .ok_or_else(|| ScreeningError::UnknownSpecies(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.curves.iter().map(|c| c.name()).collect()
    }

    /// Curves whose names are in `selection`, in dataset order.
    /// An empty selection falls back to the first curve.
    pub fn select(&self, selection: &[String]) -> Vec<&Curve> {
        let picked: Vec<&Curve> = self
            .curves
            .iter()
            .filter(|c| selection.iter().any(|s| s == c.name()))
            .collect();
        if picked.is_empty() {
            self.curves.iter().take(1).collect()
        } else {
            picked
        }
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}
