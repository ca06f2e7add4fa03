//! Top-level coverage placement entry point.
//!
//! Stateless: every call rebuilds its sample grid and candidate set from the
//! inputs, so independent regions can be planned from parallel threads with
//! no shared state.

use std::time::Instant;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::budget::Deadline;
use crate::config::PlacementConfig;
use crate::core::Polygon;
use crate::error::Result;
use crate::sampler::{derive_cell_size, SampleGrid};
use crate::selector::{run_strategy, Placement, PlacementTrace};
use crate::validator::PlacementValidator;

/// Regions with less enclosed area than this are treated as degenerate.
const MIN_REGION_AREA: f32 = 1e-3;

/// Output of one placement computation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Accepted placements, in commit order.
    pub placements: Vec<Placement>,
    /// Percentage of sample points covered by the placements (0 when the
    /// region produced no samples).
    pub coverage_percent: f32,
    /// Sample points left uncovered.
    pub uncovered_count: usize,
    /// Total sample points measured against.
    pub total_samples: usize,
    /// True when the run stopped before reaching tolerance (budget,
    /// placement cap, or stagnation). Best-effort placements are still
    /// returned; callers should surface an advisory, not an error.
    pub incomplete: bool,
    /// Structured run diagnostics.
    pub trace: PlacementTrace,
}

impl CoverageResult {
    fn empty() -> Self {
        Self {
            placements: Vec::new(),
            coverage_percent: 0.0,
            uncovered_count: 0,
            total_samples: 0,
            incomplete: false,
            trace: PlacementTrace::default(),
        }
    }
}

/// Compute a minimal-practical set of coverage-disk placements for `region`.
///
/// The union of disks of `config.radius` around the returned positions covers
/// the region's sample grid to within `config.tolerance_percent`, subject to
/// wall/exclusion buffers and the narrow-corridor exception.
///
/// Malformed geometry never errors: a degenerate region (fewer than 3
/// vertices or ~zero area) or a fully excluded region returns an empty
/// placement set with zero coverage. The only `Err` is an invalid
/// configuration, rejected before any computation.
pub fn place_coverage(
    region: &Polygon,
    exclusions: &[Polygon],
    config: &PlacementConfig,
) -> Result<CoverageResult> {
    config.validate()?;
    let started = Instant::now();

    if region.is_degenerate() || region.area() < MIN_REGION_AREA {
        debug!("degenerate region ({} vertices, area {:.4}), skipping", region.len(), region.area());
        return Ok(CoverageResult::empty());
    }

    let deadline = Deadline::new(config.max_time_secs);
    let cell_size = derive_cell_size(config.radius);
    let mut grid = SampleGrid::build(region, exclusions, cell_size, config.lattice, &deadline);
    if grid.is_empty() {
        debug!("region fully excluded or budget spent before sampling finished");
        let mut result = CoverageResult::empty();
        result.incomplete = deadline.expired();
        result.trace.elapsed_secs = started.elapsed().as_secs_f32();
        return Ok(result);
    }
    let total_samples = grid.len();

    let validator = PlacementValidator::new(region, exclusions, config);
    let mut trace = PlacementTrace::default();

    let outcome = run_strategy(region, &validator, &mut grid, config, &deadline, &mut trace);
    trace.elapsed_secs = started.elapsed().as_secs_f32();

    Ok(CoverageResult {
        coverage_percent: grid.coverage_percent(),
        uncovered_count: grid.uncovered_count(),
        total_samples,
        placements: outcome.placements,
        incomplete: outcome.incomplete,
        trace,
    })
}
