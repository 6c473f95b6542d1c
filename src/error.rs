// src/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Malformed species parameters or an invalid temperature grid.
    /// Raised once, when a table or range is built.
    #[error("invalid parameters for {species}: {reason}")]
    Domain { species: String, reason: String },

    #[error("failed to load {path}: {detail}")]
    Load { path: String, detail: String },

    #[error("unknown species: {0}")]
    UnknownSpecies(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl ScreeningError {
    pub fn domain(species: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Domain {
            species: species.into(),
            reason: reason.into(),
        }
    }

    pub fn load(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScreeningError>;
