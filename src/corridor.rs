//! Narrow-corridor detection and recentering.
//!
//! A corridor is a stretch of the region too narrow for the wall buffer to
//! hold on both sides at once. Placements there get a buffer exception, but
//! are recentered between the two walls so they do not hug either side.

use crate::core::{Point2D, Polygon};

/// Distances from a point to the first boundary crossing along each axis
/// direction. Infinite when the scan finds no crossing.
#[derive(Clone, Copy, Debug)]
pub struct AxisClearances {
    pub pos_x: f32,
    pub neg_x: f32,
    pub pos_y: f32,
    pub neg_y: f32,
}

/// Corridor orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorridorAxis {
    /// Narrow in X: walls to the left and right.
    Horizontal,
    /// Narrow in Y: walls above and below.
    Vertical,
}

/// A positive corridor classification.
#[derive(Clone, Copy, Debug)]
pub struct CorridorInfo {
    pub axis: CorridorAxis,
    pub clearances: AxisClearances,
}

/// Ray-scan from `p` along +X/-X/+Y/-Y to the polygon boundary.
///
/// Edges parallel to the scan axis are skipped; they cannot produce a single
/// crossing point and would double-count against their neighboring edges.
pub fn compute_axis_clearances(p: Point2D, polygon: &Polygon) -> AxisClearances {
    let n = polygon.vertices.len();
    let mut clearances = AxisClearances {
        pos_x: f32::INFINITY,
        neg_x: f32::INFINITY,
        pos_y: f32::INFINITY,
        neg_y: f32::INFINITY,
    };
    if n < 2 {
        return clearances;
    }

    for i in 0..n {
        let a = polygon.vertices[i];
        let b = polygon.vertices[(i + 1) % n];

        // Horizontal scan: edge must cross the line y = p.y
        if (a.y - b.y).abs() > f32::EPSILON {
            let t = (p.y - a.y) / (b.y - a.y);
            if (0.0..=1.0).contains(&t) {
                let dx = a.x + t * (b.x - a.x) - p.x;
                if dx > 0.0 {
                    clearances.pos_x = clearances.pos_x.min(dx);
                } else if dx < 0.0 {
                    clearances.neg_x = clearances.neg_x.min(-dx);
                }
            }
        }

        // Vertical scan: edge must cross the line x = p.x
        if (a.x - b.x).abs() > f32::EPSILON {
            let t = (p.x - a.x) / (b.x - a.x);
            if (0.0..=1.0).contains(&t) {
                let dy = a.y + t * (b.y - a.y) - p.y;
                if dy > 0.0 {
                    clearances.pos_y = clearances.pos_y.min(dy);
                } else if dy < 0.0 {
                    clearances.neg_y = clearances.neg_y.min(-dy);
                }
            }
        }
    }

    clearances
}

/// Classify whether `p` sits in a narrow corridor of `polygon`.
///
/// A horizontal corridor requires both X clearances to be finite, positive,
/// each below the wall buffer, and their sum at most
/// `radius * corridor_width_factor`. The vertical rule is symmetric.
/// Horizontal is checked first; a point qualifies on at most one axis.
pub fn classify_corridor(
    p: Point2D,
    polygon: &Polygon,
    radius: f32,
    wall_buffer_factor: f32,
    corridor_width_factor: f32,
) -> Option<CorridorInfo> {
    let clearances = compute_axis_clearances(p, polygon);
    let buffer = radius * wall_buffer_factor;
    let max_width = radius * corridor_width_factor;

    let narrow = |near: f32, far: f32| {
        near.is_finite() && far.is_finite() && near > 0.0 && far > 0.0 && near < buffer && far < buffer && near + far <= max_width
    };

    if narrow(clearances.pos_x, clearances.neg_x) {
        return Some(CorridorInfo {
            axis: CorridorAxis::Horizontal,
            clearances,
        });
    }
    if narrow(clearances.pos_y, clearances.neg_y) {
        return Some(CorridorInfo {
            axis: CorridorAxis::Vertical,
            clearances,
        });
    }
    None
}

/// Shift `p` by half the clearance asymmetry along the corridor axis,
/// recentering it between the two walls.
pub fn center_in_corridor(p: Point2D, info: &CorridorInfo) -> Point2D {
    match info.axis {
        CorridorAxis::Horizontal => {
            let shift = (info.clearances.pos_x - info.clearances.neg_x) * 0.5;
            Point2D::new(p.x + shift, p.y)
        }
        CorridorAxis::Vertical => {
            let shift = (info.clearances.pos_y - info.clearances.neg_y) * 0.5;
            Point2D::new(p.x, p.y + shift)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8 wide (x in 0..8), 100 tall corridor.
    fn vertical_strip() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (8.0, 0.0), (8.0, 100.0), (0.0, 100.0)])
    }

    #[test]
    fn test_axis_clearances_in_strip() {
        let strip = vertical_strip();
        let c = compute_axis_clearances(Point2D::new(3.0, 50.0), &strip);

        assert!((c.pos_x - 5.0).abs() < 1e-5);
        assert!((c.neg_x - 3.0).abs() < 1e-5);
        assert!((c.pos_y - 50.0).abs() < 1e-4);
        assert!((c.neg_y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_clearances_outside_scan() {
        // No boundary crossing above an open shape
        let open = Polygon::from_coords(&[(0.0, 0.0), (10.0, 0.0)]);
        let c = compute_axis_clearances(Point2D::new(5.0, 5.0), &open);
        assert!(c.pos_y.is_infinite());
        assert!((c.neg_y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_classify_narrow_strip() {
        // radius 10, buffer 6: the 8-wide strip is narrower than 2x buffer
        let strip = vertical_strip();
        let info = classify_corridor(Point2D::new(4.0, 50.0), &strip, 10.0, 0.6, 1.2);

        let info = info.expect("strip center should classify as a corridor");
        assert_eq!(info.axis, CorridorAxis::Horizontal);
    }

    #[test]
    fn test_classify_open_room_is_not_corridor() {
        let room = Polygon::from_coords(&[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)]);
        assert!(classify_corridor(Point2D::new(20.0, 20.0), &room, 10.0, 0.6, 1.2).is_none());

        // Near a single wall it is still not a corridor: the far clearance
        // exceeds the buffer
        assert!(classify_corridor(Point2D::new(2.0, 20.0), &room, 10.0, 0.6, 1.2).is_none());
    }

    #[test]
    fn test_horizontal_checked_before_vertical() {
        // A small square qualifies on both axes; horizontal wins
        let cell = Polygon::from_coords(&[(0.0, 0.0), (8.0, 0.0), (8.0, 8.0), (0.0, 8.0)]);
        let info = classify_corridor(Point2D::new(4.0, 4.0), &cell, 10.0, 0.6, 1.2).unwrap();
        assert_eq!(info.axis, CorridorAxis::Horizontal);
    }

    #[test]
    fn test_center_in_corridor() {
        let strip = vertical_strip();
        let p = Point2D::new(2.5, 50.0);
        let info = classify_corridor(p, &strip, 10.0, 0.6, 1.2).unwrap();
        let centered = center_in_corridor(p, &info);

        assert!((centered.x - 4.0).abs() < 1e-4);
        assert!((centered.y - 50.0).abs() < 1e-5);
    }
}
