// src/rendering/mod.rs
pub mod chart;
pub mod export;
pub mod plot;

// Re-export specific functions to keep the API clean for the rest of the app
pub use chart::draw_chart;
pub use export::export;
pub use plot::{render, PlotData, RenderOptions, Series, STEEL_MELTING_C};
