//! Error types for the placement engine.
//!
//! Configuration problems are the only hard failures: they indicate caller
//! misuse and are rejected before any computation starts. Geometric
//! degeneracies (tiny regions, fully excluded regions, unplaceable seeds)
//! never error; they produce empty or partial results with diagnostics.

use thiserror::Error;

/// Rejected configuration, reported before any placement work begins.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("coverage radius must be positive, got {0}")]
    NonPositiveRadius(f32),

    #[error("tolerance percent must be non-negative, got {0}")]
    NegativeTolerance(f32),

    #[error("spacing factor must be positive, got {0}")]
    InvalidSpacing(f32),

    #[error("{name} must be non-negative, got {value}")]
    InvalidFactor { name: &'static str, value: f32 },

    #[error("max placements must be at least 1")]
    ZeroMaxPlacements,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
