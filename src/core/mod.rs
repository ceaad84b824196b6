//! Shared constants, configuration and error types.

pub mod config;
pub mod constants;
pub mod error;

pub use config::{AnimationTiming, EngineConfig};
pub use error::{EngineError, EngineResult};
