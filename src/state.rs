// src/state.rs

use crate::config::Config;
use crate::error::Result;
use crate::model::{Curve, Dataset};
use crate::physics::{rank, RangeWarning, RankedEntry};
use crate::rendering::{render, PlotData, RenderOptions};
use crate::utils::report;

pub struct AppState {
    pub config: Config,
    pub dataset: Dataset,
    /// Selected curve names, always kept in dataset order
    pub selection: Vec<String>,
    pub temperature_k: f64,
}

impl AppState {
    pub fn new(config: Config, dataset: Dataset) -> Self {
        let mut state = Self {
            temperature_k: config.default_temperature_k,
            selection: Vec::new(),
            config,
            dataset,
        };
        let wanted = state.config.default_selection.clone();
        state.selection = state.known_in_order(&wanted);
        state
    }

    fn known_in_order(&self, names: &[String]) -> Vec<String> {
        self.dataset
            .names()
            .into_iter()
            .filter(|n| names.iter().any(|w| w.as_str() == *n))
            .map(str::to_string)
            .collect()
    }

    /// Moves the marker. Returns the extrapolation warning, if any; it is
    /// also logged.
    pub fn set_temperature(&mut self, temperature_k: f64) -> Option<RangeWarning> {
        self.temperature_k = temperature_k;
        let warning = self.config.window.check(temperature_k);
        if let Some(w) = &warning {
            log::warn!("{}", w);
        }
        warning
    }

    pub fn set_selected(&mut self, name: &str, on: bool) {
        let mut wanted = self.selection.clone();
        if on {
            wanted.push(name.to_string());
        } else {
            wanted.retain(|n| n != name);
        }
        self.selection = self.known_in_order(&wanted);
    }

    pub fn select_all(&mut self) {
        self.selection = self.dataset.names().into_iter().map(str::to_string).collect();
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.iter().any(|n| n == name)
    }

    /// Swaps in a freshly loaded dataset, keeping whatever selection still applies.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        log::info!("Dataset: {} ({} curves)", dataset.source, dataset.len());
        self.dataset = dataset;
        let wanted = self.selection.clone();
        self.selection = self.known_in_order(&wanted);
        if self.selection.is_empty() {
            let defaults = self.config.default_selection.clone();
            self.selection = self.known_in_order(&defaults);
        }
    }

    pub fn selected_curves(&self) -> Vec<&Curve> {
        self.dataset.select(&self.selection)
    }

    pub fn plot_data(&self) -> Result<PlotData> {
        let opts = RenderOptions {
            range: self.config.sweep.range()?,
            window: self.config.window,
            style: &self.config.style,
        };
        Ok(render(&self.dataset, self.temperature_k, &self.selection, &opts))
    }

    pub fn ranking(&self) -> Vec<RankedEntry> {
        rank(&self.selected_curves(), self.temperature_k)
    }

    pub fn ranking_report(&self) -> String {
        report::ranking_table(
            &self.selected_curves(),
            self.temperature_k,
            &self.config.window,
            self.config.tie_tolerance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::library;

    fn state() -> AppState {
        let ds = Dataset::from_table("literature", &library::oxides().unwrap());
        AppState::new(Config::default(), ds)
    }

    #[test]
    fn test_default_selection_in_dataset_order() {
        let st = state();
        assert_eq!(st.selection, vec!["Cu2O", "FeO", "Al2O3", "MgO", "SiO2", "TiO2"]);
        assert_eq!(st.temperature_k, 1873.0);
    }

    #[test]
    fn test_toggle_selection_keeps_order() {
        let mut st = state();
        st.set_selected("FeO", false);
        st.set_selected("CuO", true);
        assert_eq!(st.selection, vec!["Cu2O", "CuO", "Al2O3", "MgO", "SiO2", "TiO2"]);
        st.set_selected("ZrO2", true);
        assert!(!st.is_selected("ZrO2"));
    }

    #[test]
    fn test_temperature_warning() {
        let mut st = state();
        assert!(st.set_temperature(1500.0).is_none());
        assert!(st.set_temperature(2300.0).is_some());
        assert_eq!(st.temperature_k, 2300.0);
    }

    #[test]
    fn test_ranking_follows_selection() {
        let mut st = state();
        for name in ["FeO", "MgO", "SiO2", "TiO2"] {
            st.set_selected(name, false);
        }
        let ranked = st.ranking();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "Al2O3");
        assert!(st.ranking_report().contains("Least stable"));
    }

    #[test]
    fn test_plot_data_uses_sweep_grid() {
        let st = state();
        let plot = st.plot_data().unwrap();
        assert_eq!(plot.series.len(), 6);
        assert_eq!(plot.series[0].points.len(), 61);
    }

    #[test]
    fn test_replace_dataset_keeps_valid_selection() {
        let mut st = state();
        let sulfides = Dataset::from_table("sulfides", &library::sulfides().unwrap());
        st.replace_dataset(sulfides);
        // nothing carried over and no default applies: render falls back to the first curve
        assert!(st.selection.is_empty());
        assert_eq!(st.plot_data().unwrap().series[0].name, "FeS");

        st.select_all();
        assert_eq!(st.selection, vec!["FeS", "Cu2S"]);
        assert_eq!(st.ranking().len(), 2);
    }
}
