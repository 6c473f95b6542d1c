// src/physics/validity.rs

use serde::{Deserialize, Serialize};
use std::fmt;

pub const KELVIN_OFFSET: f64 = 273.15;

pub fn kelvin_to_celsius(k: f64) -> f64 {
    k - KELVIN_OFFSET
}

pub fn celsius_to_kelvin(c: f64) -> f64 {
    c + KELVIN_OFFSET
}

/// Temperature band (K) in which the linear approximation is trusted.
/// Bounds are inclusive and advisory: nothing refuses to evaluate outside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub min_k: f64,
    pub max_k: f64,
}

impl Default for ValidityWindow {
    fn default() -> Self {
        Self {
            min_k: 500.0,
            max_k: 2000.0,
        }
    }
}

impl ValidityWindow {
    pub fn contains(&self, temperature_k: f64) -> bool {
        temperature_k >= self.min_k && temperature_k <= self.max_k
    }

    pub fn check(&self, temperature_k: f64) -> Option<RangeWarning> {
        if self.contains(temperature_k) {
            None
        } else {
            Some(RangeWarning {
                temperature_k,
                window: *self,
            })
        }
    }
}

/// Non-fatal: the number is still computed, but it is an extrapolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeWarning {
    pub temperature_k: f64,
    pub window: ValidityWindow,
}

impl fmt::Display for RangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T = {:.0} K is outside the {:.0}-{:.0} K window; values are extrapolated and may be unphysical",
            self.temperature_k, self.window.min_k, self.window.max_k
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds_inclusive() {
        let w = ValidityWindow::default();
        assert!(w.check(500.0).is_none());
        assert!(w.check(2000.0).is_none());
        assert!(w.check(1873.0).is_none());
        assert!(w.check(499.0).is_some());
        assert!(w.check(2001.0).is_some());
    }

    #[test]
    fn test_warning_message() {
        let w = ValidityWindow { min_k: 800.0, max_k: 1600.0 };
        let msg = w.check(1873.0).unwrap().to_string();
        assert!(msg.contains("1873"));
        assert!(msg.contains("800-1600"));
    }

    #[test]
    fn test_celsius_round_trip() {
        assert!((kelvin_to_celsius(1873.15) - 1600.0).abs() < 1e-9);
        assert!((celsius_to_kelvin(1600.0) - 1873.15).abs() < 1e-9);
    }
}
