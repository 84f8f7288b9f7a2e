//! Error types for tbsim.
//!
//! Everything that can go wrong happens before the first step: bad initial
//! conditions, bad parameters, or a scenario file that will not load. The
//! step itself is infallible for validated input.

use thiserror::Error;

/// Result type alias for tbsim operations.
pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// A body was given a mass that is zero, negative, or not finite.
    #[error("body {index}: mass must be finite and positive, got {mass}")]
    NonPositiveMass { index: usize, mass: f64 },

    /// A position or velocity component is NaN or infinite.
    #[error("body {index}: {field} is not finite")]
    NonFiniteState { index: usize, field: &'static str },

    /// The domain is fixed at three bodies per run.
    #[error("expected {expected} bodies, got {found}")]
    BodyCount { expected: usize, found: usize },

    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f64),

    #[error("speed multiplier must be finite, got {0}")]
    InvalidSpeed(f64),

    /// Play was requested before any initial conditions were loaded.
    #[error("no initial conditions loaded")]
    Uninitialized,

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}
