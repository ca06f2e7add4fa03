//! Polygon type and the geometry kernel used by the placement engine.
//!
//! All operations are pure. Polygons are ordered vertex lists, implicitly
//! closed (the last vertex connects back to the first). No convexity is
//! required, but self-intersecting polygons produce undefined area and
//! containment results.

use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use super::point::Point2D;

/// Signed areas below this magnitude are treated as degenerate (collinear).
const DEGENERATE_AREA_EPS: f32 = 1e-6;

/// An ordered, implicitly closed vertex loop.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Vertices in traversal order. Fewer than 3 vertices is a degenerate
    /// polygon: containment is always false and area is zero.
    pub vertices: Vec<Point2D>,
}

/// Result of a nearest-edge query.
#[derive(Clone, Copy, Debug)]
pub struct EdgeInfo {
    /// Distance from the query point to the closest edge point.
    pub distance: f32,
    /// Unit normal at the closest edge point, pointing away from the
    /// polygon interior.
    pub outward_normal: Point2D,
}

impl Polygon {
    /// Create a polygon from a vertex list.
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// Convenience constructor from (x, y) pairs.
    pub fn from_coords(coords: &[(f32, f32)]) -> Self {
        Self {
            vertices: coords.iter().map(|&(x, y)| Point2D::new(x, y)).collect(),
        }
    }

    /// Axis-aligned rectangle.
    pub fn rect(min: Point2D, max: Point2D) -> Self {
        Self {
            vertices: vec![
                min,
                Point2D::new(max.x, min.y),
                max,
                Point2D::new(min.x, max.y),
            ],
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// True if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// True if the polygon has too few vertices to enclose area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Bounding box of the vertices.
    pub fn bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for &v in &self.vertices {
            bounds.expand_to_include(v);
        }
        bounds
    }

    /// Even-odd (ray casting) containment test.
    ///
    /// Returns false for polygons with fewer than 3 vertices.
    pub fn contains_point(&self, p: Point2D) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];

            // Ray toward +X: count edges that straddle the horizontal line
            // through p and cross to the right of it.
            if (vi.y > p.y) != (vj.y > p.y) {
                let x_cross = vi.x + (p.y - vi.y) / (vj.y - vi.y) * (vj.x - vi.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Signed area via the shoelace formula (positive for counter-clockwise
    /// traversal).
    pub fn signed_area(&self) -> f32 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }

        let mut sum = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            sum += a.cross(b);
        }
        sum * 0.5
    }

    /// Absolute enclosed area.
    #[inline]
    pub fn area(&self) -> f32 {
        self.signed_area().abs()
    }

    /// Area-weighted centroid.
    ///
    /// Falls back to the arithmetic mean of the vertices when the signed area
    /// is numerically zero (collinear or degenerate input).
    pub fn centroid(&self) -> Point2D {
        let n = self.vertices.len();
        if n == 0 {
            return Point2D::ZERO;
        }

        let signed = self.signed_area();
        if signed.abs() < DEGENERATE_AREA_EPS {
            let mut sum = Point2D::ZERO;
            for &v in &self.vertices {
                sum = sum + v;
            }
            return sum * (1.0 / n as f32);
        }

        let mut cx = 0.0;
        let mut cy = 0.0;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let w = a.cross(b);
            cx += (a.x + b.x) * w;
            cy += (a.y + b.y) * w;
        }
        let scale = 1.0 / (6.0 * signed);
        Point2D::new(cx * scale, cy * scale)
    }

    /// Minimum distance from a point to any polygon edge.
    ///
    /// Returns infinity for polygons with fewer than 2 vertices.
    pub fn min_edge_distance(&self, p: Point2D) -> f32 {
        let n = self.vertices.len();
        if n < 2 {
            return f32::INFINITY;
        }

        let mut min_dist = f32::INFINITY;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            min_dist = min_dist.min(distance_point_to_segment(p, a, b));
        }
        min_dist
    }

    /// Distance and outward unit normal at the closest boundary point.
    ///
    /// The normal points away from the polygon interior, so "push along the
    /// normal" moves a point out of the polygon and "push against it" moves
    /// inward. When the closest boundary point coincides with `p`
    /// (distance ~ 0), the direction degenerates and the centroid-to-`p`
    /// direction is used instead.
    ///
    /// Returns `None` for polygons with fewer than 2 vertices.
    pub fn nearest_edge(&self, p: Point2D) -> Option<EdgeInfo> {
        let n = self.vertices.len();
        if n < 2 {
            return None;
        }

        let mut best_dist = f32::INFINITY;
        let mut best_closest = p;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let closest = closest_point_on_segment(p, a, b);
            let dist = p.distance(closest);
            if dist < best_dist {
                best_dist = dist;
                best_closest = closest;
            }
        }

        let outward_normal = if best_dist > 1e-4 {
            let dir = (p - best_closest).normalized();
            // The direction from the edge toward p points outward exactly when
            // p is outside; flip it when p is inside the polygon.
            if self.contains_point(p) {
                dir * -1.0
            } else {
                dir
            }
        } else {
            let fallback = (p - self.centroid()).normalized();
            if fallback.length() > 0.0 {
                fallback
            } else {
                Point2D::new(1.0, 0.0)
            }
        };

        Some(EdgeInfo {
            distance: best_dist,
            outward_normal,
        })
    }
}

/// Perpendicular distance from `p` to segment `ab`, clamped to the endpoints.
pub fn distance_point_to_segment(p: Point2D, a: Point2D, b: Point2D) -> f32 {
    p.distance(closest_point_on_segment(p, a, b))
}

/// Closest point to `p` on segment `ab`.
pub fn closest_point_on_segment(p: Point2D, a: Point2D, b: Point2D) -> Point2D {
    let ab = b - a;
    let len_sq = ab.dot(ab);
    if len_sq < f32::EPSILON {
        return a; // Zero-length segment
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_contains_point() {
        let square = unit_square();
        assert!(square.contains_point(Point2D::new(0.5, 0.5)));
        assert!(!square.contains_point(Point2D::new(1.5, 0.5)));
        assert!(!square.contains_point(Point2D::new(-0.1, 0.5)));
    }

    #[test]
    fn test_contains_point_concave() {
        // L-shape: the notch at the top right is outside
        let l_shape = Polygon::from_coords(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        assert!(l_shape.contains_point(Point2D::new(0.5, 1.5)));
        assert!(l_shape.contains_point(Point2D::new(1.5, 0.5)));
        assert!(!l_shape.contains_point(Point2D::new(1.5, 1.5)));
    }

    #[test]
    fn test_degenerate_contains() {
        let line = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0)]);
        assert!(!line.contains_point(Point2D::new(0.5, 0.0)));
    }

    #[test]
    fn test_area() {
        assert!((unit_square().area() - 1.0).abs() < 1e-6);

        let triangle = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (0.0, 3.0)]);
        assert!((triangle.area() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_area_invariant_to_rotation_and_direction() {
        let coords = [(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 3.0), (0.0, 2.0)];
        let base = Polygon::from_coords(&coords);
        let expected = base.area();

        // Rotate the starting vertex
        for shift in 1..coords.len() {
            let mut rotated: Vec<(f32, f32)> = coords[shift..].to_vec();
            rotated.extend_from_slice(&coords[..shift]);
            let poly = Polygon::from_coords(&rotated);
            assert!((poly.area() - expected).abs() < 1e-4);
        }

        // Reverse traversal direction
        let mut reversed = coords.to_vec();
        reversed.reverse();
        let poly = Polygon::from_coords(&reversed);
        assert!((poly.area() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_centroid() {
        let centroid = unit_square().centroid();
        assert!((centroid.x - 0.5).abs() < 1e-5);
        assert!((centroid.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_centroid_invariant_to_rotation() {
        let coords = [(0.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 3.0), (0.0, 2.0)];
        let expected = Polygon::from_coords(&coords).centroid();

        let mut rotated: Vec<(f32, f32)> = coords[2..].to_vec();
        rotated.extend_from_slice(&coords[..2]);
        let centroid = Polygon::from_coords(&rotated).centroid();

        assert!((centroid.x - expected.x).abs() < 1e-4);
        assert!((centroid.y - expected.y).abs() < 1e-4);
    }

    #[test]
    fn test_centroid_collinear_fallback() {
        // Collinear points have ~zero signed area; centroid falls back to the mean
        let line = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let centroid = line.centroid();
        assert!((centroid.x - 1.0).abs() < 1e-5);
        assert!(centroid.y.abs() < 1e-5);
    }

    #[test]
    fn test_segment_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(10.0, 0.0);

        // Perpendicular projection lands inside the segment
        assert!((distance_point_to_segment(Point2D::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-6);
        // Projection clamps to an endpoint
        assert!((distance_point_to_segment(Point2D::new(-4.0, 3.0), a, b) - 5.0).abs() < 1e-6);
        // Zero-length segment
        assert!((distance_point_to_segment(Point2D::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_edge_distance() {
        let square = unit_square();
        assert!((square.min_edge_distance(Point2D::new(0.5, 0.5)) - 0.5).abs() < 1e-6);
        assert!((square.min_edge_distance(Point2D::new(0.5, 0.1)) - 0.1).abs() < 1e-6);

        let point = Polygon::from_coords(&[(0.0, 0.0)]);
        assert!(point.min_edge_distance(Point2D::new(1.0, 1.0)).is_infinite());
    }

    #[test]
    fn test_nearest_edge_normal_points_outward() {
        let square = unit_square();

        // Inside, near the bottom edge: outward normal points down (-Y)
        let info = square.nearest_edge(Point2D::new(0.5, 0.1)).unwrap();
        assert!((info.distance - 0.1).abs() < 1e-5);
        assert!(info.outward_normal.y < -0.9);

        // Outside, below the bottom edge: outward normal still points down
        let info = square.nearest_edge(Point2D::new(0.5, -0.2)).unwrap();
        assert!((info.distance - 0.2).abs() < 1e-5);
        assert!(info.outward_normal.y < -0.9);
    }

    #[test]
    fn test_nearest_edge_on_boundary_fallback() {
        let square = unit_square();
        // Exactly on the boundary: direction falls back to centroid-to-point
        let info = square.nearest_edge(Point2D::new(0.5, 0.0)).unwrap();
        assert!(info.distance < 1e-5);
        assert!((info.outward_normal.length() - 1.0).abs() < 1e-5);
        assert!(info.outward_normal.y < 0.0);
    }
}
