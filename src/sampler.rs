//! Coverage sample grid.
//!
//! Discretizes the region interior into a lattice of sample points. Coverage
//! percent is measured against this set, sidestepping exact disk-polygon
//! integration. The grid is rebuilt per invocation and never persisted.

use serde::{Deserialize, Serialize};

use crate::budget::Deadline;
use crate::config::Lattice;
use crate::core::{Point2D, Polygon};

/// Absolute floor on the sample cell size, keeping sample counts sane on
/// very large regions paired with small radii.
pub const MIN_CELL_SIZE: f32 = 0.5;

/// Derive the sample cell size from the coverage radius.
#[inline]
pub fn derive_cell_size(radius: f32) -> f32 {
    (radius / 3.0).max(MIN_CELL_SIZE)
}

/// Interior sample points plus per-point coverage flags.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SampleGrid {
    /// Sample positions, in lattice row order (deterministic).
    pub points: Vec<Point2D>,
    /// Coverage flag per sample, parallel to `points`.
    pub covered: Vec<bool>,
}

impl SampleGrid {
    /// Build the sample grid over `region`, excluding samples that fall
    /// inside any exclusion polygon. Exclusions with fewer than 3 vertices
    /// cannot contain area and are ignored.
    ///
    /// The hex lattice staggers every other row by half a cell. The deadline
    /// is checked once per row; on expiry the rows sampled so far are kept.
    pub fn build(
        region: &Polygon,
        exclusions: &[Polygon],
        cell_size: f32,
        lattice: Lattice,
        deadline: &Deadline,
    ) -> Self {
        let mut grid = Self::default();
        if region.is_degenerate() || cell_size <= 0.0 {
            return grid;
        }

        let bounds = region.bounds();
        let rows = (bounds.height() / cell_size).ceil() as usize;
        let cols = (bounds.width() / cell_size).ceil() as usize;

        for row in 0..=rows {
            if deadline.expired() {
                break;
            }
            let y = bounds.min.y + (row as f32 + 0.5) * cell_size;
            let stagger = match lattice {
                Lattice::Hex if row % 2 == 1 => cell_size * 0.5,
                _ => 0.0,
            };
            for col in 0..=cols {
                let x = bounds.min.x + (col as f32 + 0.5) * cell_size + stagger;
                let p = Point2D::new(x, y);

                if !region.contains_point(p) {
                    continue;
                }
                if exclusions.iter().any(|e| !e.is_degenerate() && e.contains_point(p)) {
                    continue;
                }
                grid.points.push(p);
            }
        }

        grid.covered = vec![false; grid.points.len()];
        grid
    }

    /// Total number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the grid holds no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of samples not yet covered.
    pub fn uncovered_count(&self) -> usize {
        self.covered.iter().filter(|&&c| !c).count()
    }

    /// Covered fraction as a percentage of all samples (0 for empty grids).
    pub fn coverage_percent(&self) -> f32 {
        if self.points.is_empty() {
            return 0.0;
        }
        let covered = self.points.len() - self.uncovered_count();
        covered as f32 / self.points.len() as f32 * 100.0
    }

    /// Count uncovered samples within `radius` of `center`.
    pub fn count_uncovered_within(&self, center: Point2D, radius: f32) -> usize {
        let radius_sq = radius * radius;
        self.points
            .iter()
            .zip(&self.covered)
            .filter(|&(p, &covered)| !covered && p.distance_squared(center) <= radius_sq)
            .count()
    }

    /// Mark samples within `radius` of `center` as covered. Returns the
    /// number of newly covered samples.
    pub fn cover_within(&mut self, center: Point2D, radius: f32) -> usize {
        let radius_sq = radius * radius;
        let mut newly = 0;
        for (p, covered) in self.points.iter().zip(self.covered.iter_mut()) {
            if !*covered && p.distance_squared(center) <= radius_sq {
                *covered = true;
                newly += 1;
            }
        }
        newly
    }

    /// Positions of the samples still uncovered.
    pub fn uncovered_points(&self) -> Vec<Point2D> {
        self.points
            .iter()
            .zip(&self.covered)
            .filter(|&(_, &covered)| !covered)
            .map(|(&p, _)| p)
            .collect()
    }
}
