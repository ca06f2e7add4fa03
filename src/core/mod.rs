//! Fundamental geometric types: points, bounds, polygons.

pub mod bounds;
pub mod point;
pub mod polygon;

pub use bounds::Bounds;
pub use point::Point2D;
pub use polygon::{closest_point_on_segment, distance_point_to_segment, EdgeInfo, Polygon};
