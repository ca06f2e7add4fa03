//! Placement validation and iterative relaxation.
//!
//! A candidate placement must sit inside the boundary, clear of every
//! exclusion zone plus its buffer, and clear of the outer wall buffer unless
//! it is in a narrow corridor. Candidates that fail are not discarded
//! outright; [`PlacementValidator::relax`] nudges them toward a valid spot,
//! falling back to a radial walk toward the region centroid. Only when that
//! walk also fails is the seed reported unplaceable.

use log::trace;

use crate::config::PlacementConfig;
use crate::core::{Point2D, Polygon};
use crate::corridor::{center_in_corridor, classify_corridor, CorridorInfo};

/// Relaxation iteration cap before the radial fallback engages.
const MAX_RELAX_ITERATIONS: usize = 30;

/// Extra margin applied to every push, as a fraction of the deficit.
const PUSH_MARGIN: f32 = 0.25;

/// Fraction of the centroid distance covered by a stuck-point nudge.
const STUCK_NUDGE: f32 = 0.35;

/// Validates candidate placements against one region's geometry.
pub struct PlacementValidator<'a> {
    boundary: &'a Polygon,
    exclusions: &'a [Polygon],
    config: &'a PlacementConfig,
    centroid: Point2D,
}

impl<'a> PlacementValidator<'a> {
    /// Create a validator for one boundary/exclusion set.
    pub fn new(boundary: &'a Polygon, exclusions: &'a [Polygon], config: &'a PlacementConfig) -> Self {
        Self {
            boundary,
            exclusions,
            config,
            centroid: boundary.centroid(),
        }
    }

    /// Classify `p` against the boundary's corridor rule.
    pub fn corridor(&self, p: Point2D) -> Option<CorridorInfo> {
        classify_corridor(
            p,
            self.boundary,
            self.config.radius,
            self.config.wall_buffer_factor,
            self.config.corridor_width_factor,
        )
    }

    /// Full placement rule: inside the boundary, outside every exclusion and
    /// its buffer, and wall-buffer clear unless in a corridor. Exclusions are
    /// hard walls; the corridor exception never applies to them.
    pub fn is_allowed(&self, p: Point2D) -> bool {
        if !self.boundary.contains_point(p) {
            return false;
        }

        let exclusion_buffer = self.config.exclusion_buffer();
        for exclusion in self.exclusions {
            if exclusion.is_degenerate() {
                continue;
            }
            if exclusion.contains_point(p) {
                return false;
            }
            if exclusion.min_edge_distance(p) < exclusion_buffer {
                return false;
            }
        }

        self.boundary.min_edge_distance(p) >= self.config.wall_buffer() || self.corridor(p).is_some()
    }

    /// Iteratively nudge `p` toward a valid placement.
    ///
    /// Returns `None` when no valid point is found; the caller must skip the
    /// seed rather than place an invalid antenna.
    pub fn relax(&self, p: Point2D) -> Option<Point2D> {
        let mut current = p;

        for _ in 0..MAX_RELAX_ITERATIONS {
            if let Some(moved) = self.relax_step(current) {
                current = moved;
                continue;
            }

            if self.is_allowed(current) {
                return Some(current);
            }

            // Stuck without a rule firing: nudge toward the centroid
            current = current.lerp(self.centroid, STUCK_NUDGE);
        }

        trace!(
            "relaxation did not converge at ({:.2}, {:.2}), falling back to radial search",
            current.x,
            current.y
        );
        self.radial_search(current)
    }

    /// One relaxation pass. Returns the moved point, or `None` when no rule
    /// produced a move.
    fn relax_step(&self, p: Point2D) -> Option<Point2D> {
        // Outside the boundary: step halfway toward the centroid
        if !self.boundary.contains_point(p) {
            return Some(p.lerp(self.centroid, 0.5));
        }

        let exclusion_buffer = self.config.exclusion_buffer();
        for exclusion in self.exclusions {
            if exclusion.is_degenerate() {
                continue;
            }
            let Some(edge) = exclusion.nearest_edge(p) else {
                continue;
            };
            if exclusion.contains_point(p) {
                // Inside: escape past the edge plus the full buffer
                let push = (edge.distance + exclusion_buffer) * (1.0 + PUSH_MARGIN);
                return Some(p + edge.outward_normal * push);
            }
            if edge.distance < exclusion_buffer {
                // Too close: cover the remaining deficit
                let push = (exclusion_buffer - edge.distance) * (1.0 + PUSH_MARGIN);
                return Some(p + edge.outward_normal * push);
            }
        }

        if let Some(info) = self.corridor(p) {
            let centered = center_in_corridor(p, &info);
            if centered.distance(p) > 1e-3 {
                return Some(centered);
            }
            return None; // Already mid-corridor
        }

        let wall_buffer = self.config.wall_buffer();
        if let Some(edge) = self.boundary.nearest_edge(p) {
            if edge.distance < wall_buffer {
                // Push inward, against the outward normal
                let push = (wall_buffer - edge.distance) * (1.0 + PUSH_MARGIN);
                return Some(p + edge.outward_normal * -push);
            }
        }

        None
    }

    /// Walk from `p` toward the centroid in fixed steps, returning the first
    /// valid point. Engaged only after the iterative relaxation gives up.
    fn radial_search(&self, p: Point2D) -> Option<Point2D> {
        let step = self.config.radius * 0.2;
        let max_distance = self.config.radius * 4.0;
        let direction = (self.centroid - p).normalized();
        if direction.length() == 0.0 {
            return None;
        }

        let mut travelled = step;
        while travelled <= max_distance {
            let candidate = p + direction * travelled;
            if self.boundary.contains_point(candidate) && self.is_allowed(candidate) {
                return Some(candidate);
            }
            travelled += step;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Polygon;

    fn square_room() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)])
    }

    fn config() -> PlacementConfig {
        PlacementConfig::default().with_radius(10.0)
    }

    #[test]
    fn test_center_is_allowed() {
        let room = square_room();
        let config = config();
        let validator = PlacementValidator::new(&room, &[], &config);
        assert!(validator.is_allowed(Point2D::new(20.0, 20.0)));
    }

    #[test]
    fn test_wall_buffer_rejected() {
        let room = square_room();
        let config = config();
        let validator = PlacementValidator::new(&room, &[], &config);

        // 3 units from the wall, buffer is 6
        assert!(!validator.is_allowed(Point2D::new(3.0, 20.0)));
        // Exactly past the buffer
        assert!(validator.is_allowed(Point2D::new(6.5, 20.0)));
    }

    #[test]
    fn test_exclusion_buffer_rejected() {
        let room = square_room();
        let exclusions = vec![Polygon::from_coords(&[
            (15.0, 15.0),
            (25.0, 15.0),
            (25.0, 25.0),
            (15.0, 25.0),
        ])];
        let config = config();
        let validator = PlacementValidator::new(&room, &exclusions, &config);

        // Inside the exclusion
        assert!(!validator.is_allowed(Point2D::new(20.0, 20.0)));
        // Outside but inside the exclusion buffer (6 units)
        assert!(!validator.is_allowed(Point2D::new(28.0, 20.0)));
        // Clear of the buffer
        assert!(validator.is_allowed(Point2D::new(32.0, 20.0)));
    }

    #[test]
    fn test_degenerate_exclusion_ignored() {
        let room = square_room();
        let exclusions = vec![Polygon::from_coords(&[(20.0, 20.0), (21.0, 20.0)])];
        let config = config();
        let validator = PlacementValidator::new(&room, &exclusions, &config);
        assert!(validator.is_allowed(Point2D::new(20.0, 22.0)));
    }

    #[test]
    fn test_corridor_point_allowed() {
        // 8-wide strip: double-sided buffer (12) exceeds the width, but
        // the corridor exception admits centerline points
        let strip = Polygon::from_coords(&[(0.0, 0.0), (8.0, 0.0), (8.0, 100.0), (0.0, 100.0)]);
        let config = config();
        let validator = PlacementValidator::new(&strip, &[], &config);
        assert!(validator.is_allowed(Point2D::new(4.0, 50.0)));
    }

    #[test]
    fn test_relax_pulls_outside_point_in() {
        let room = square_room();
        let config = config();
        let validator = PlacementValidator::new(&room, &[], &config);

        let relaxed = validator.relax(Point2D::new(-20.0, 20.0)).unwrap();
        assert!(validator.is_allowed(relaxed));
    }

    #[test]
    fn test_relax_escapes_exclusion() {
        let room = square_room();
        let exclusions = vec![Polygon::from_coords(&[
            (15.0, 15.0),
            (25.0, 15.0),
            (25.0, 25.0),
            (15.0, 25.0),
        ])];
        let config = config();
        let validator = PlacementValidator::new(&room, &exclusions, &config);

        let relaxed = validator.relax(Point2D::new(20.0, 20.0)).unwrap();
        assert!(validator.is_allowed(relaxed));
        assert!(!exclusions[0].contains_point(relaxed));
    }

    #[test]
    fn test_relax_recenters_in_corridor() {
        let strip = Polygon::from_coords(&[(0.0, 0.0), (8.0, 0.0), (8.0, 100.0), (0.0, 100.0)]);
        let config = config();
        let validator = PlacementValidator::new(&strip, &[], &config);

        let relaxed = validator.relax(Point2D::new(2.5, 50.0)).unwrap();
        assert!(validator.is_allowed(relaxed));
        assert!((relaxed.x - 4.0).abs() < 0.5, "expected near-centerline, got x={}", relaxed.x);
    }

    #[test]
    fn test_relax_unplaceable_returns_none() {
        // A 20x20 exclusion in the room center: its 6-unit buffer and the
        // 6-unit wall buffer leave no valid point anywhere, and the room is
        // far too wide for the corridor exception
        let room = square_room();
        let exclusions = vec![Polygon::from_coords(&[
            (10.0, 10.0),
            (30.0, 10.0),
            (30.0, 30.0),
            (10.0, 30.0),
        ])];
        let config = config();
        let validator = PlacementValidator::new(&room, &exclusions, &config);

        assert!(validator.relax(Point2D::new(20.0, 20.0)).is_none());
        assert!(validator.relax(Point2D::new(5.0, 20.0)).is_none());
    }
}
