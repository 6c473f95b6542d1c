// src/lib.rs

//! Ellingham-diagram screening: which ceramic oxides bind oxygen more
//! strongly than Cu₂O at steelmaking temperatures, and so cannot be reduced
//! by dissolved copper.

pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod physics;
pub mod rendering;
pub mod state;
pub mod utils;

pub use error::{Result, ScreeningError};
