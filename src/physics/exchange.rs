// src/physics/exchange.rs

//! Metal exchange between two compounds of the same anion, e.g.
//! 2Cu + FeS → Cu₂S + Fe. Elements in their reference state contribute
//! zero, so ΔG_rxn = ΔGf(formed) − ΔGf(consumed), one formula unit each.

use crate::error::{Result, ScreeningError};
use crate::model::{library, Species};

#[derive(Debug, Clone)]
pub struct ExchangeReaction {
    pub formed: Species,
    pub consumed: Species,
    pub equation: String,
}

impl ExchangeReaction {
    pub fn new(formed: Species, consumed: Species, equation: &str) -> Result<Self> {
        if formed.oxidant() != consumed.oxidant() {
            return Err(ScreeningError::domain(
                formed.name(),
                format!("cannot exchange against {}: different oxidant", consumed.name()),
            ));
        }
        Ok(Self {
            formed,
            consumed,
            equation: equation.to_string(),
        })
    }

    /// 2Cu + FeS → Cu₂S + Fe, the sulfide route to pulling Cu out of the melt.
    pub fn copper_sulfide_from_iron_sulfide() -> Result<Self> {
        let table = library::sulfides()?;
        let formed = table
            .get("Cu2S")
            .cloned()
            .ok_or_else(|| ScreeningError::UnknownSpecies("Cu2S".into()))?;
        let consumed = table
            .get("FeS")
            .cloned()
            .ok_or_else(|| ScreeningError::UnknownSpecies("FeS".into()))?;
        Self::new(formed, consumed, "2Cu + FeS → Cu₂S + Fe")
    }

    /// kJ per mol of reaction as written
    pub fn gibbs(&self, temperature_k: f64) -> f64 {
        self.formed.raw_free_energy(temperature_k) - self.consumed.raw_free_energy(temperature_k)
    }

    pub fn is_favorable(&self, temperature_k: f64) -> bool {
        self.gibbs(temperature_k) < 0.0
    }
}
