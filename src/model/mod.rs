//src/model/mod.rs
pub mod dataset;
pub mod library;
pub mod species;
pub mod tabulated;

// Re-exports for cleaner imports
pub use dataset::{Curve, Dataset};
pub use species::{DisplayStyle, LineStyle, Oxidant, Species, SpeciesTable};
pub use tabulated::TabulatedCurve;
