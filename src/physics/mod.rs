// src/physics/mod.rs
pub mod exchange;
pub mod stability;
pub mod validity;

pub use exchange::ExchangeReaction;
pub use stability::{
    can_reduce, evaluate, near_ties, rank, sweep, FormationLine, RankedEntry, Sweep,
    TemperatureRange, MAX_GRID_POINTS,
};
pub use validity::{celsius_to_kelvin, kelvin_to_celsius, RangeWarning, ValidityWindow};
