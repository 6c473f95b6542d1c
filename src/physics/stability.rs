// src/physics/stability.rs

//! Ellingham-style stability evaluation.
//!
//! Every function here is a pure computation over its arguments. More
//! negative normalized ΔG means a more stable oxide (or sulfide).

use std::cmp::Ordering;

use crate::error::{Result, ScreeningError};
use crate::model::{Curve, Oxidant, Species, TabulatedCurve};

/// Anything that can report a free energy of formation per mol oxidant.
pub trait FormationLine {
    fn name(&self) -> &str;

    /// ΔG in kJ per mol O₂ (or S₂) at `temperature_k`.
    fn free_energy_per_oxidant(&self, temperature_k: f64) -> f64;

    fn oxidant(&self) -> Oxidant;
}

impl FormationLine for Species {
    fn name(&self) -> &str {
        Species::name(self)
    }

    fn free_energy_per_oxidant(&self, temperature_k: f64) -> f64 {
        evaluate(self, temperature_k)
    }

    fn oxidant(&self) -> Oxidant {
        Species::oxidant(self)
    }
}

impl FormationLine for TabulatedCurve {
    fn name(&self) -> &str {
        TabulatedCurve::name(self)
    }

    fn free_energy_per_oxidant(&self, temperature_k: f64) -> f64 {
        self.nearest(temperature_k)
    }

    fn oxidant(&self) -> Oxidant {
        TabulatedCurve::oxidant(self)
    }
}

impl FormationLine for Curve {
    fn name(&self) -> &str {
        Curve::name(self)
    }

    fn free_energy_per_oxidant(&self, temperature_k: f64) -> f64 {
        match self {
            Curve::Linear(s) => evaluate(s, temperature_k),
            Curve::Tabulated(t) => t.nearest(temperature_k),
        }
    }

    fn oxidant(&self) -> Oxidant {
        Curve::oxidant(self)
    }
}

impl<T: FormationLine + ?Sized> FormationLine for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn free_energy_per_oxidant(&self, temperature_k: f64) -> f64 {
        (**self).free_energy_per_oxidant(temperature_k)
    }

    fn oxidant(&self) -> Oxidant {
        (**self).oxidant()
    }
}

/// (A + B·T) / divisor, kJ per mol oxidant.
///
/// The divisor is guaranteed positive by [`Species::new`], so this never
/// divides by zero.
pub fn evaluate(species: &Species, temperature_k: f64) -> f64 {
    species.raw_free_energy(temperature_k) / species.divisor()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub name: String,
    pub value: f64,
}

/// Most stable first. Exact ties keep input order (the sort is stable).
pub fn rank<L: FormationLine>(lines: &[L], temperature_k: f64) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = lines
        .iter()
        .map(|l| RankedEntry {
            name: l.name().to_string(),
            value: l.free_energy_per_oxidant(temperature_k),
        })
        .collect();
    entries.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(Ordering::Equal));
    entries
}

/// For each ranked entry, whether it sits within `tolerance` of the entry
/// above it. Purely informational: ordering is never changed by this.
pub fn near_ties(entries: &[RankedEntry], tolerance: f64) -> Vec<bool> {
    let tol = tolerance.max(0.0);
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| i > 0 && (e.value - entries[i - 1].value).abs() <= tol)
        .collect()
}

/// True when X's line lies strictly below Y's: X binds oxygen more strongly,
/// so X can take it from Y's oxide.
pub fn can_reduce<X: FormationLine, Y: FormationLine>(x: &X, y: &Y, temperature_k: f64) -> bool {
    x.free_energy_per_oxidant(temperature_k) < y.free_energy_per_oxidant(temperature_k)
}

/// Largest grid [`TemperatureRange::new`] accepts.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Inclusive temperature grid, start..=stop by step (K).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    start: f64,
    stop: f64,
    step: f64,
    count: usize,
}

impl TemperatureRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
            return Err(ScreeningError::domain("temperature range", "bounds must be finite"));
        }
        if step <= 0.0 {
            return Err(ScreeningError::domain(
                "temperature range",
                format!("step must be > 0, got {}", step),
            ));
        }
        if stop < start {
            return Err(ScreeningError::domain(
                "temperature range",
                format!("stop {} is below start {}", stop, start),
            ));
        }

        // stop counts when it is on the grid, up to float noise
        let n = (stop - start) / step;
        let intervals = (n + n.abs().max(1.0) * 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_GRID_POINTS as f64 {
            return Err(ScreeningError::domain(
                "temperature range",
                format!(
                    "{} to {} by {} exceeds {} grid points",
                    start, stop, step, MAX_GRID_POINTS
                ),
            ));
        }
        let count = intervals as usize + 1;
        Ok(Self { start, stop, step, count })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn stop(&self) -> f64 {
        self.stop
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points, at most [`MAX_GRID_POINTS`].
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Grid point `i`, computed directly so no rounding error accumulates.
    pub fn at(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        (0..self.len()).map(move |i| self.at(i))
    }
}

/// Lazy (T, ΔG) pairs over a range. Holds only an index, so cloning or
/// calling [`sweep`] again replays the same sequence.
pub struct Sweep<'a, L: ?Sized> {
    line: &'a L,
    range: TemperatureRange,
    index: usize,
}

impl<L: ?Sized> Clone for Sweep<'_, L> {
    fn clone(&self) -> Self {
        Self {
            line: self.line,
            range: self.range,
            index: self.index,
        }
    }
}

pub fn sweep<'a, L: FormationLine + ?Sized>(line: &'a L, range: &TemperatureRange) -> Sweep<'a, L> {
    Sweep {
        line,
        range: *range,
        index: 0,
    }
}

impl<L: FormationLine + ?Sized> Iterator for Sweep<'_, L> {
    type Item = (f64, f64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.range.len() {
            return None;
        }
        let t = self.range.at(self.index);
        self.index += 1;
        Some((t, self.line.free_energy_per_oxidant(t)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.range.len().saturating_sub(self.index);
        (left, Some(left))
    }
}

impl<L: FormationLine + ?Sized> ExactSizeIterator for Sweep<'_, L> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{library, DisplayStyle};
    use proptest::prelude::*;

    fn cu2o() -> Species {
        Species::oxide("Cu2O", -170.0, 0.075, 0.5).unwrap()
    }

    fn al2o3() -> Species {
        Species::oxide("Al2O3", -1676.0, 0.32, 1.5).unwrap()
    }

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_cu2o_at_steelmaking_temperature() {
        let s = cu2o();
        assert!(rel_close(s.raw_free_energy(1873.0), -29.525));
        assert!(rel_close(evaluate(&s, 1873.0), -59.05));
    }

    #[test]
    fn test_rank_al2o3_before_cu2o() {
        let lines = vec![cu2o(), al2o3()];
        let ranked = rank(&lines, 1873.0);
        assert_eq!(ranked[0].name, "Al2O3");
        assert!(rel_close(ranked[0].value, -717.76));
        assert_eq!(ranked[1].name, "Cu2O");
        assert!(rel_close(ranked[1].value, -59.05));

        // Al's line is below Cu's: Cu cannot reduce alumina
        assert!(can_reduce(&lines[1], &lines[0], 1873.0));
        assert!(!can_reduce(&lines[0], &lines[1], 1873.0));
    }

    #[test]
    fn test_rank_exact_ties_keep_input_order() {
        let a = Species::oxide("A", -100.0, 0.0, 0.5).unwrap();
        let b = Species::oxide("B", -200.0, 0.0, 1.0).unwrap();
        let c = Species::oxide("C", -300.0, 0.0, 1.0).unwrap();
        let ranked = rank(&[a.clone(), b.clone(), c.clone()], 1000.0);
        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);

        let ranked = rank(&[b, a, c], 1000.0);
        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_rank_covers_every_input() {
        let table = library::oxides().unwrap();
        let ranked = rank(table.as_slice(), 1000.0);
        assert_eq!(ranked.len(), table.len());
        // MgO is the most stable of the default set at 1000 K
        assert_eq!(ranked[0].name, "MgO");
        assert_eq!(ranked.last().unwrap().name, "CuO");
    }

    #[test]
    fn test_near_ties_flags_only() {
        let entries = vec![
            RankedEntry { name: "a".into(), value: -10.0 },
            RankedEntry { name: "b".into(), value: -9.95 },
            RankedEntry { name: "c".into(), value: -5.0 },
        ];
        assert_eq!(near_ties(&entries, 0.0), vec![false, false, false]);
        assert_eq!(near_ties(&entries, 0.1), vec![false, true, false]);
    }

    #[test]
    fn test_range_validation() {
        assert!(TemperatureRange::new(500.0, 2000.0, 0.0).is_err());
        assert!(TemperatureRange::new(500.0, 2000.0, -25.0).is_err());
        assert!(TemperatureRange::new(2000.0, 500.0, 25.0).is_err());
        assert!(TemperatureRange::new(f64::NAN, 500.0, 25.0).is_err());
    }

    #[test]
    fn test_range_rejects_oversized_grid() {
        let huge = TemperatureRange::new(0.0, 1e20, 1.0).unwrap_err();
        assert!(matches!(huge, ScreeningError::Domain { .. }));
        assert!(TemperatureRange::new(500.0, 2000.0, 1e-10).is_err());

        // exactly MAX_GRID_POINTS is still fine
        let edge = TemperatureRange::new(0.0, (MAX_GRID_POINTS - 1) as f64, 1.0).unwrap();
        assert_eq!(edge.len(), MAX_GRID_POINTS);
        assert!(TemperatureRange::new(0.0, MAX_GRID_POINTS as f64, 1.0).is_err());
    }

    #[test]
    fn test_range_includes_stop_on_grid() {
        let r = TemperatureRange::new(500.0, 2000.0, 50.0).unwrap();
        assert_eq!(r.len(), 31);
        let temps: Vec<f64> = r.temperatures().collect();
        assert_eq!(temps[0], 500.0);
        assert_eq!(*temps.last().unwrap(), 2000.0);

        let off = TemperatureRange::new(500.0, 520.0, 15.0).unwrap();
        assert_eq!(off.len(), 2);

        let single = TemperatureRange::new(1873.0, 1873.0, 10.0).unwrap();
        assert_eq!(single.len(), 1);

        let fine = TemperatureRange::new(0.0, 1.0, 0.1).unwrap();
        assert_eq!(fine.len(), 11);
    }

    #[test]
    fn test_sweep_is_restartable() {
        let s = cu2o();
        let r = TemperatureRange::new(500.0, 2000.0, 25.0).unwrap();
        let first: Vec<(f64, f64)> = sweep(&s, &r).collect();
        let second: Vec<(f64, f64)> = sweep(&s, &r).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 61);
        assert_eq!(sweep(&s, &r).len(), 61);

        let it = sweep(&s, &r);
        let replay: Vec<_> = it.clone().collect();
        assert_eq!(replay, it.collect::<Vec<_>>());
    }

    #[test]
    fn test_sweep_over_tabulated_curve() {
        let t = TabulatedCurve::new(
            "MgO",
            vec![(500.0, -1040.0), (1000.0, -987.0)],
            DisplayStyle::default(),
        )
        .unwrap();
        let r = TemperatureRange::new(500.0, 1000.0, 250.0).unwrap();
        let values: Vec<f64> = sweep(&t, &r).map(|(_, v)| v).collect();
        assert_eq!(values, vec![-1040.0, -1040.0, -987.0]);
    }

    #[test]
    fn test_curve_dispatch() {
        let c = Curve::Linear(cu2o());
        assert!(rel_close(c.free_energy_per_oxidant(1873.0), -59.05));
    }

    proptest! {
        #[test]
        fn prop_evaluate_matches_formula(
            a in -2000.0f64..0.0,
            b in -0.5f64..0.5,
            d in 0.1f64..3.0,
            t in 300.0f64..2500.0,
        ) {
            let s = Species::oxide("X", a, b, d).unwrap();
            let expected = (a + b * t) / d;
            prop_assert!((evaluate(&s, t) - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }

        #[test]
        fn prop_monotonic_in_temperature(
            a in -2000.0f64..0.0,
            b in 0.01f64..0.5,
            d in 0.1f64..3.0,
            t in 500.0f64..1990.0,
            dt in 1.0f64..10.0,
        ) {
            let up = Species::oxide("Up", a, b, d).unwrap();
            let down = Species::oxide("Down", a, -b, d).unwrap();
            prop_assert!(evaluate(&up, t + dt) > evaluate(&up, t));
            prop_assert!(evaluate(&down, t + dt) < evaluate(&down, t));
        }

        #[test]
        fn prop_rank_is_consistent_with_evaluate(t in 500.0f64..2000.0) {
            let table = library::oxides().unwrap();
            let ranked = rank(table.as_slice(), t);
            for pair in ranked.windows(2) {
                let first = table.get(&pair[0].name).unwrap();
                let second = table.get(&pair[1].name).unwrap();
                prop_assert!(evaluate(first, t) <= evaluate(second, t));
            }
        }

        #[test]
        fn prop_can_reduce_is_definitional(t in 500.0f64..2000.0, i in 0usize..7, j in 0usize..7) {
            let table = library::oxides().unwrap();
            let x = &table.as_slice()[i];
            let y = &table.as_slice()[j];
            prop_assert_eq!(can_reduce(x, y, t), evaluate(x, t) < evaluate(y, t));
        }
    }
}
