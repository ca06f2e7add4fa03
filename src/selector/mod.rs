//! Placement selection strategies.
//!
//! Two interchangeable strategies share candidate generation and scoring
//! plumbing:
//!
//! - [`adaptive`]: tolerance-driven greedy with stagnation detection and gap
//!   re-seeding. Best coverage per placement.
//! - [`grid_seed`]: grid-seeded greedy set cover with a minimum-spacing
//!   filter. Fully deterministic and repeatable.
//!
//! Both keep candidate iteration in stable array order so results are
//! reproducible for identical inputs.

pub mod adaptive;
pub mod cluster;
pub mod grid_seed;
pub mod spacing;

use serde::{Deserialize, Serialize};

pub use crate::budget::Deadline;
use crate::config::{Lattice, PlacementConfig, Strategy};
use crate::core::{Point2D, Polygon};
use crate::sampler::SampleGrid;
use crate::validator::PlacementValidator;

/// A placed coverage disk.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Identifier, assigned in placement order starting at 0.
    pub id: u32,
    /// Disk center.
    pub position: Point2D,
    /// Coverage radius, same unit as the position coordinates.
    pub radius: f32,
}

/// Structured diagnostics from one placement run.
///
/// Returned instead of log output so callers and tests can assert on the
/// run's behavior directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacementTrace {
    /// Selection-loop iterations executed.
    pub iterations: usize,
    /// Candidates produced by lattice generation and re-seeding.
    pub candidates_generated: usize,
    /// Candidate scoring evaluations performed.
    pub candidates_evaluated: usize,
    /// Zero-gain selections encountered.
    pub stagnations: usize,
    /// Gap re-seeding passes that added candidates.
    pub reseeds: usize,
    /// Wall-clock time spent, in seconds.
    pub elapsed_secs: f32,
}

/// Result of a selection strategy run.
#[derive(Clone, Debug, Default)]
pub struct SelectionOutcome {
    /// Accepted placements, in commit order.
    pub placements: Vec<Placement>,
    /// True when the run stopped before reaching tolerance (budget, cap,
    /// or stagnation).
    pub incomplete: bool,
}

/// Minimum separation treated as "the same point" when relaxed seeds collapse
/// onto each other.
const DEDUPE_EPS: f32 = 1e-2;

/// Number of samples allowed to stay uncovered at the configured tolerance.
pub(crate) fn tolerance_count(total_samples: usize, tolerance_percent: f32) -> usize {
    (total_samples as f32 * tolerance_percent / 100.0).floor() as usize
}

/// Generate valid candidate positions on a lattice over the region bounds.
///
/// Each lattice seed is run through the relaxer; unplaceable seeds are
/// skipped, and relaxed seeds that collapsed onto an earlier candidate are
/// dropped. Output order follows lattice row order and is deterministic.
/// Relaxation dominates the cost, so the deadline is checked per seed;
/// on expiry the candidates gathered so far are returned.
pub fn generate_candidates(
    region: &Polygon,
    validator: &PlacementValidator<'_>,
    spacing: f32,
    lattice: Lattice,
    deadline: &Deadline,
) -> Vec<Point2D> {
    let mut candidates: Vec<Point2D> = Vec::new();
    if region.is_degenerate() || spacing <= 0.0 {
        return candidates;
    }

    let bounds = region.bounds();
    let rows = (bounds.height() / spacing).ceil() as usize;
    let cols = (bounds.width() / spacing).ceil() as usize;

    for row in 0..=rows {
        let y = bounds.min.y + (row as f32 + 0.5) * spacing;
        let stagger = match lattice {
            Lattice::Hex if row % 2 == 1 => spacing * 0.5,
            _ => 0.0,
        };
        for col in 0..=cols {
            if deadline.expired() {
                return candidates;
            }
            let seed = Point2D::new(bounds.min.x + (col as f32 + 0.5) * spacing + stagger, y);
            let Some(relaxed) = validator.relax(seed) else {
                continue;
            };
            let duplicate = candidates.iter().any(|c| c.distance(relaxed) < DEDUPE_EPS);
            if !duplicate {
                candidates.push(relaxed);
            }
        }
    }

    candidates
}

/// Dispatch the configured strategy.
pub fn run_strategy(
    region: &Polygon,
    validator: &PlacementValidator<'_>,
    grid: &mut SampleGrid,
    config: &PlacementConfig,
    deadline: &Deadline,
    trace: &mut PlacementTrace,
) -> SelectionOutcome {
    match config.strategy {
        Strategy::Adaptive => adaptive::run(region, validator, grid, config, deadline, trace),
        Strategy::GridSeed => grid_seed::run(region, validator, grid, config, deadline, trace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlacementConfig;

    fn square_room() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)])
    }

    #[test]
    fn test_generate_candidates_all_valid() {
        let room = square_room();
        let config = PlacementConfig::default().with_radius(10.0);
        let validator = PlacementValidator::new(&room, &[], &config);

        let candidates = generate_candidates(&room, &validator, 10.0, Lattice::Grid, &Deadline::new(0.0));
        assert!(!candidates.is_empty());
        for c in &candidates {
            assert!(validator.is_allowed(*c), "candidate ({}, {}) is invalid", c.x, c.y);
        }
    }

    #[test]
    fn test_generate_candidates_deterministic() {
        let room = square_room();
        let config = PlacementConfig::default().with_radius(10.0);
        let validator = PlacementValidator::new(&room, &[], &config);

        let a = generate_candidates(&room, &validator, 10.0, Lattice::Hex, &Deadline::new(0.0));
        let b = generate_candidates(&room, &validator, 10.0, Lattice::Hex, &Deadline::new(0.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generation_stops_at_expired_deadline() {
        let room = square_room();
        let config = PlacementConfig::default().with_radius(10.0);
        let validator = PlacementValidator::new(&room, &[], &config);

        let deadline = Deadline::new(1e-6);
        std::thread::sleep(std::time::Duration::from_millis(2));
        let bailed = generate_candidates(&room, &validator, 10.0, Lattice::Grid, &deadline);
        let full = generate_candidates(&room, &validator, 10.0, Lattice::Grid, &Deadline::new(0.0));

        assert!(bailed.is_empty());
        assert!(!full.is_empty());
    }

    #[test]
    fn test_tolerance_count() {
        assert_eq!(tolerance_count(1000, 1.0), 10);
        assert_eq!(tolerance_count(50, 0.0), 0);
        assert_eq!(tolerance_count(333, 1.0), 3);
    }
}
