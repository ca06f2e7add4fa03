//! Minimum-spacing enforcement between placements.
//!
//! Prevents redundant clusters of near-coincident disks. The grid-seed
//! strategy applies the gate during selection; the adaptive strategy can
//! apply it as a post-filter.

use crate::core::Point2D;

use super::Placement;

/// True when `candidate` keeps at least `min_spacing` center-to-center
/// distance from every accepted placement.
pub fn is_spacing_allowed(candidate: Point2D, placed: &[Placement], min_spacing: f32) -> bool {
    let min_sq = min_spacing * min_spacing;
    placed.iter().all(|p| p.position.distance_squared(candidate) >= min_sq)
}

/// Post-filter a placement list, dropping later placements that crowd earlier
/// ones. Earlier placements always survive, preserving greedy commit order.
pub fn enforce_spacing(placements: &[Placement], min_spacing: f32) -> Vec<Placement> {
    let mut kept: Vec<Placement> = Vec::with_capacity(placements.len());
    for &p in placements {
        if is_spacing_allowed(p.position, &kept, min_spacing) {
            kept.push(p);
        }
    }
    kept
}
