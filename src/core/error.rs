//! Engine error taxonomy.
//!
//! "Match too small" and "activated an empty cell" are ordinary no-ops and never
//! show up here; these variants are for bad input and broken invariants.

/// Errors produced by the grid engine and its configuration layer.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    /// The requested cell lies outside the grid's storage range.
    #[error("invalid position ({row}, {col})")]
    InvalidPosition { row: usize, col: usize },

    /// A tile's stored position disagrees with its cell, or an obstacle sits on
    /// the grid with no durability left.
    #[error("inconsistent grid state: {0}")]
    InconsistentState(String),

    /// Host-supplied configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// Configuration file is not valid JSON for [`EngineConfig`](super::config::EngineConfig).
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;
