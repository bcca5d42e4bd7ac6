//! Core error types.
//!
//! Sub-crates define their own error enums and wrap `CoreError` (or
//! `ConfigError`) as one variant via `From` impls.

use thiserror::Error;

use crate::Stage;

/// A rejected simulation parameter.  Always raised before the first event.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} is a proportion and must lie in [0, 1], got {value}")]
    ProportionOutOfRange { field: &'static str, value: f64 },

    #[error("stage {0} needs at least one server")]
    NoServers(Stage),

    #[error("counter service range is inverted: min {min} > max {max}")]
    InvertedRange { min: f64, max: f64 },
}

/// The top-level error type for `bb-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("uniform value {0} is outside [0, 1)")]
    UniformOutOfRange(f64),

    #[error("a scripted uniform source needs at least one value")]
    EmptySequence,

    #[error("simulation time must be finite, got {0}")]
    NonFiniteTime(f64),
}

/// Shorthand result type for `bb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
