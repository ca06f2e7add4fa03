//! # Vyapti-Cover: Antenna Coverage-Placement Engine
//!
//! Computes a small set of point placements ("antennas") whose coverage
//! disks blanket a 2D floor region, respecting exclusion zones, wall
//! clearance buffers, and narrow-corridor handling. Constrained unit-disk
//! cover solved by sampling plus greedy/adaptive selection; idealized disk
//! coverage, no RF propagation modeling.
//!
//! ## Quick Start
//!
//! ```rust
//! use vyapti_cover::{place_coverage, PlacementConfig, Polygon};
//!
//! // 40x40 unit room, no exclusions, disks of radius 10
//! let room = Polygon::from_coords(&[(0.0, 0.0), (40.0, 0.0), (40.0, 40.0), (0.0, 40.0)]);
//! let config = PlacementConfig::default().with_radius(10.0);
//!
//! let result = place_coverage(&room, &[], &config).unwrap();
//! println!(
//!     "{} antennas, {:.1}% covered",
//!     result.placements.len(),
//!     result.coverage_percent
//! );
//! assert!(result.coverage_percent >= 99.0);
//! ```
//!
//! ## Coordinates
//!
//! The engine is unit-agnostic: region vertices, exclusion vertices, and the
//! coverage radius must share one consistent unit (pixels, meters, ...).
//! Callers own all unit and coordinate-system conversion.
//!
//! ## Architecture
//!
//! - [`core`]: geometric primitives (points, bounds, polygons) and the pure
//!   geometry kernel (containment, area, centroid, edge distances)
//! - [`corridor`]: narrow-corridor detection and recentering
//! - [`validator`]: placement rules and iterative candidate relaxation
//! - [`sampler`]: the coverage sample grid that measures percent covered
//! - [`selector`]: the two placement strategies (adaptive greedy and
//!   grid-seed set cover), clustering, and spacing enforcement
//! - [`planner`]: the [`place_coverage`] entry point
//!
//! Every computation is stateless and synchronous; independent regions can
//! be planned from parallel threads.

pub mod budget;
pub mod config;
pub mod core;
pub mod corridor;
pub mod error;
pub mod planner;
pub mod sampler;
pub mod selector;
pub mod validator;

pub use budget::Deadline;
pub use config::{Lattice, PlacementConfig, Strategy};
pub use crate::core::{Point2D, Polygon};
pub use error::ConfigError;
pub use planner::{place_coverage, CoverageResult};
pub use sampler::SampleGrid;
pub use selector::{Placement, PlacementTrace};
pub use validator::PlacementValidator;
