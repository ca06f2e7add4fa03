//! Configuration for coverage placement.
//!
//! All parameters have documented defaults tuned for indoor floor plans. The
//! wall-buffer and corridor-width factors are empirically tuned policy, not
//! physical constants; override them freely.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Sample/candidate lattice arrangement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lattice {
    /// Regular square lattice.
    #[default]
    Grid,
    /// Square lattice with odd rows staggered by half a cell (hex-like packing).
    Hex,
}

/// Placement strategy selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Tolerance-driven adaptive greedy with stagnation detection and
    /// gap re-seeding. Best coverage per placement.
    #[default]
    Adaptive,
    /// Grid-seeded greedy set cover with a global minimum-spacing filter.
    /// Fully deterministic; prefer for reproducible output.
    GridSeed,
}

/// Configuration for a single coverage-placement computation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Coverage disk radius, in the same unit as region coordinates.
    /// Must be positive. Default: 10.0
    pub radius: f32,

    /// Minimum clearance to the outer boundary, as a fraction of the radius.
    /// Default: 0.6
    pub wall_buffer_factor: f32,

    /// Minimum clearance to exclusion-zone boundaries, as a fraction of the
    /// radius. Exclusions never get the corridor exception.
    /// Default: 0.6
    pub exclusion_buffer_factor: f32,

    /// Maximum total corridor width, as a fraction of the radius, for the
    /// corridor exception to engage.
    /// Default: 1.2
    pub corridor_width_factor: f32,

    /// Maximum percentage of sample points allowed to stay uncovered.
    /// Default: 1.0 (1%)
    pub tolerance_percent: f32,

    /// Hard cap on the number of placements per region.
    /// Default: 1000
    pub max_placements: usize,

    /// Minimum center-to-center spacing = 2 × radius × spacing_factor.
    /// Default: 1.0
    pub spacing_factor: f32,

    /// Sample/candidate lattice arrangement.
    /// Default: Grid
    pub lattice: Lattice,

    /// Placement strategy.
    /// Default: Adaptive
    pub strategy: Strategy,

    /// Weight of the edge-proximity penalty in adaptive scoring.
    /// Default: 1.0
    pub edge_penalty_weight: f32,

    /// Weight of the overlap penalty in adaptive scoring.
    /// Default: 1.0
    pub overlap_penalty_weight: f32,

    /// Apply the minimum-spacing filter as a post-pass after adaptive
    /// selection (drops later placements that crowd earlier ones).
    /// Strategy B always enforces spacing during selection.
    /// Default: false
    pub enforce_spacing_post_filter: bool,

    /// Wall-clock budget in seconds; 0 disables the deadline.
    /// On budget exhaustion the best placements found so far are returned
    /// with the `incomplete` flag set.
    /// Default: 1.5
    pub max_time_secs: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            wall_buffer_factor: 0.6,
            exclusion_buffer_factor: 0.6,
            corridor_width_factor: 1.2,
            tolerance_percent: 1.0,
            max_placements: 1000,
            spacing_factor: 1.0,
            lattice: Lattice::Grid,
            strategy: Strategy::Adaptive,
            edge_penalty_weight: 1.0,
            overlap_penalty_weight: 1.0,
            enforce_spacing_post_filter: false,
            max_time_secs: 1.5,
        }
    }
}

impl PlacementConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the coverage radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Builder-style setter for the wall buffer factor.
    pub fn with_wall_buffer_factor(mut self, factor: f32) -> Self {
        self.wall_buffer_factor = factor;
        self
    }

    /// Builder-style setter for the tolerance percentage.
    pub fn with_tolerance_percent(mut self, percent: f32) -> Self {
        self.tolerance_percent = percent;
        self
    }

    /// Builder-style setter for the spacing factor.
    pub fn with_spacing_factor(mut self, factor: f32) -> Self {
        self.spacing_factor = factor;
        self
    }

    /// Builder-style setter for the lattice mode.
    pub fn with_lattice(mut self, lattice: Lattice) -> Self {
        self.lattice = lattice;
        self
    }

    /// Builder-style setter for the strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Builder-style setter for the wall-clock budget.
    pub fn with_max_time_secs(mut self, secs: f32) -> Self {
        self.max_time_secs = secs;
        self
    }

    /// Minimum center-to-center spacing between placements, clamped so a
    /// misconfigured factor cannot collapse to zero or blow past usefulness.
    pub fn min_spacing(&self) -> f32 {
        (2.0 * self.radius * self.spacing_factor).clamp(0.5 * self.radius, 4.0 * self.radius)
    }

    /// Wall buffer distance in coordinate units.
    #[inline]
    pub fn wall_buffer(&self) -> f32 {
        self.radius * self.wall_buffer_factor
    }

    /// Exclusion buffer distance in coordinate units.
    #[inline]
    pub fn exclusion_buffer(&self) -> f32 {
        self.radius * self.exclusion_buffer_factor
    }

    /// Validate the configuration. Called at the API boundary before any
    /// computation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius(self.radius));
        }
        if self.tolerance_percent < 0.0 || !self.tolerance_percent.is_finite() {
            return Err(ConfigError::NegativeTolerance(self.tolerance_percent));
        }
        if !(self.spacing_factor > 0.0) {
            return Err(ConfigError::InvalidSpacing(self.spacing_factor));
        }
        if self.max_placements == 0 {
            return Err(ConfigError::ZeroMaxPlacements);
        }

        let factors = [
            ("wall_buffer_factor", self.wall_buffer_factor),
            ("exclusion_buffer_factor", self.exclusion_buffer_factor),
            ("corridor_width_factor", self.corridor_width_factor),
            ("edge_penalty_weight", self.edge_penalty_weight),
            ("overlap_penalty_weight", self.overlap_penalty_weight),
            ("max_time_secs", self.max_time_secs),
        ];
        for (name, value) in factors {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }

        Ok(())
    }
}
