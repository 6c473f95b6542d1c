// src/model/tabulated.rs

use super::species::{DisplayStyle, Oxidant};
use crate::error::{Result, ScreeningError};

/// A species whose per-oxidant ΔG (kJ/mol) comes from a pre-computed table
/// rather than from A + B·T.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedCurve {
    name: String,
    points: Vec<(f64, f64)>, // (T_K, kJ per mol oxidant), sorted by T
    oxidant: Oxidant,
    style: DisplayStyle,
}

impl TabulatedCurve {
    /// Points are sorted by temperature; an empty or non-finite set is rejected.
    pub fn new(name: &str, mut points: Vec<(f64, f64)>, style: DisplayStyle) -> Result<Self> {
        if points.is_empty() {
            return Err(ScreeningError::domain(name, "no tabulated values"));
        }
        if let Some(p) = points.iter().find(|p| !p.0.is_finite() || !p.1.is_finite()) {
            return Err(ScreeningError::domain(
                name,
                format!("non-finite tabulated point ({}, {})", p.0, p.1),
            ));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(Self {
            name: name.to_string(),
            points,
            oxidant: Oxidant::O2,
            style,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn oxidant(&self) -> Oxidant {
        self.oxidant
    }

    pub fn style(&self) -> &DisplayStyle {
        &self.style
    }

    pub fn temperature_span(&self) -> (f64, f64) {
        (self.points[0].0, self.points[self.points.len() - 1].0)
    }

    /// Value at the tabulated temperature closest to `temperature_k`.
    /// On an exact midpoint the lower temperature wins.
    pub fn nearest(&self, temperature_k: f64) -> f64 {
        let idx = self.points.partition_point(|p| p.0 < temperature_k);
        if idx == 0 {
            return self.points[0].1;
        }
        if idx == self.points.len() {
            return self.points[idx - 1].1;
        }
        let (lo, hi) = (self.points[idx - 1], self.points[idx]);
        if hi.0 - temperature_k < temperature_k - lo.0 {
            hi.1
        } else {
            lo.1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> TabulatedCurve {
        TabulatedCurve::new(
            "MgO",
            vec![(1000.0, -987.0), (500.0, -1040.0), (1500.0, -930.0)],
            DisplayStyle::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_points_sorted() {
        let c = curve();
        assert_eq!(c.temperature_span(), (500.0, 1500.0));
        assert_eq!(c.points()[1], (1000.0, -987.0));
    }

    #[test]
    fn test_nearest_lookup() {
        let c = curve();
        assert_eq!(c.nearest(990.0), -987.0);
        assert_eq!(c.nearest(1300.0), -930.0);
        assert_eq!(c.nearest(100.0), -1040.0);
        assert_eq!(c.nearest(5000.0), -930.0);
        // midpoint goes low
        assert_eq!(c.nearest(750.0), -1040.0);
        assert_eq!(c.nearest(1000.0), -987.0);
    }

    #[test]
    fn test_empty_rejected() {
        assert!(TabulatedCurve::new("X", vec![], DisplayStyle::default()).is_err());
        assert!(TabulatedCurve::new("X", vec![(f64::NAN, 1.0)], DisplayStyle::default()).is_err());
    }
}
