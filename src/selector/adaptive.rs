//! Tolerance-driven adaptive greedy selection (primary strategy).
//!
//! Repeatedly commits the candidate with the best penalized coverage gain,
//! drops candidates that stop contributing, and periodically re-seeds fresh
//! candidates at the centroids of uncovered-sample clusters. Stops when the
//! uncovered count falls under tolerance, the dynamic placement cap is hit,
//! the budget expires, or selection stagnates.

use std::f32::consts::PI;

use log::{debug, trace};

use crate::config::PlacementConfig;
use crate::core::{Point2D, Polygon};
use crate::sampler::SampleGrid;
use crate::validator::PlacementValidator;

use super::cluster::cluster_points;
use super::spacing::enforce_spacing;
use super::{
    generate_candidates, tolerance_count, Deadline, Placement, PlacementTrace, SelectionOutcome,
    DEDUPE_EPS,
};

/// Disk packing efficiency assumed when estimating the theoretical minimum
/// placement count.
const PACKING_EFFICIENCY: f32 = 0.65;

/// Safety scale over the theoretical minimum. Thin regions (corridors) need
/// the headroom: disks there cover far less than a full circle.
const SAFETY_FACTOR: f32 = 2.5;

/// Consecutive zero-gain selections tolerated before aborting.
const MAX_STAGNATIONS: usize = 5;

/// Re-seed from coverage gaps after this many placements.
const RESEED_INTERVAL: usize = 3;

/// Maximum candidates added per re-seeding pass.
const RESEED_LIMIT: usize = 3;

/// Cluster radius for gap detection, as a fraction of the coverage radius.
const GAP_CLUSTER_FACTOR: f32 = 0.9;

/// Overlap penalty kicks in below this fraction of the radius.
const OVERLAP_KNEE: f32 = 0.8;

/// Run the adaptive strategy against `grid`, mutating it as samples are
/// covered.
pub fn run(
    region: &Polygon,
    validator: &PlacementValidator<'_>,
    grid: &mut SampleGrid,
    config: &PlacementConfig,
    deadline: &Deadline,
    trace: &mut PlacementTrace,
) -> SelectionOutcome {
    let mut outcome = SelectionOutcome::default();
    if grid.is_empty() {
        return outcome;
    }

    let radius = config.radius;
    let mut candidates = generate_candidates(region, validator, radius, config.lattice, deadline);

    // Lattice rows straddle the region center, so the single best opening
    // placement for a compact room is never among the seeds. Offer the
    // relaxed centroid as an extra candidate.
    if let Some(center) = validator.relax(region.centroid()) {
        if candidates.iter().all(|c| c.distance(center) > DEDUPE_EPS) {
            candidates.push(center);
        }
    }
    trace.candidates_generated += candidates.len();

    let tolerance_count = tolerance_count(grid.len(), config.tolerance_percent);
    let dynamic_max = dynamic_max_placements(region.area(), config);
    debug!(
        "adaptive selection: {} samples, {} candidates, tolerance {} samples, cap {}",
        grid.len(),
        candidates.len(),
        tolerance_count,
        dynamic_max
    );

    let mut consecutive_stagnations = 0;
    loop {
        if grid.uncovered_count() <= tolerance_count {
            break;
        }
        if deadline.expired() {
            trace!("placement budget exhausted after {} placements", outcome.placements.len());
            outcome.incomplete = true;
            break;
        }
        if outcome.placements.len() >= dynamic_max {
            outcome.incomplete = true;
            break;
        }
        if candidates.is_empty() {
            outcome.incomplete = true;
            break;
        }
        trace.iterations += 1;

        let Some((best_idx, best_gain)) =
            pick_best(&candidates, grid, region, &outcome.placements, config, deadline, trace)
        else {
            outcome.incomplete = true;
            break;
        };

        if best_gain < 1 {
            // Nothing left for this candidate to cover; retire it
            candidates.swap_remove(best_idx);
            trace.stagnations += 1;
            consecutive_stagnations += 1;
            if consecutive_stagnations >= MAX_STAGNATIONS {
                trace!("aborting after {} consecutive stagnations", consecutive_stagnations);
                outcome.incomplete = true;
                break;
            }
            continue;
        }
        consecutive_stagnations = 0;

        let position = candidates.swap_remove(best_idx);
        grid.cover_within(position, radius);
        outcome.placements.push(Placement {
            id: outcome.placements.len() as u32,
            position,
            radius,
        });

        if outcome.placements.len() % RESEED_INTERVAL == 0 && grid.uncovered_count() > tolerance_count {
            let added = reseed_from_gaps(grid, validator, &mut candidates, radius);
            if added > 0 {
                trace.candidates_generated += added;
                trace.reseeds += 1;
            }
        }
    }

    if config.enforce_spacing_post_filter {
        outcome.placements = enforce_spacing(&outcome.placements, config.min_spacing());
    }

    debug!(
        "adaptive selection done: {} placements, {:.1}% covered, incomplete={}",
        outcome.placements.len(),
        grid.coverage_percent(),
        outcome.incomplete
    );
    outcome
}

/// Placement cap derived from the theoretical minimum disk count for the
/// region area, scaled by a safety factor and clamped to the configured hard
/// cap.
fn dynamic_max_placements(area: f32, config: &PlacementConfig) -> usize {
    let theoretical_min = area / (PI * config.radius * config.radius * PACKING_EFFICIENCY);
    let scaled = (theoretical_min * SAFETY_FACTOR).ceil() as usize;
    scaled.clamp(1, config.max_placements)
}

/// Score every candidate and return (index, gain) of the best. Ties keep the
/// earlier candidate, so iteration order stays deterministic. Scoring scales
/// with candidates times samples, so the deadline is checked per candidate;
/// on expiry the best among those already scored wins.
fn pick_best(
    candidates: &[Point2D],
    grid: &SampleGrid,
    region: &Polygon,
    placed: &[Placement],
    config: &PlacementConfig,
    deadline: &Deadline,
    trace: &mut PlacementTrace,
) -> Option<(usize, usize)> {
    let radius = config.radius;
    let mut best: Option<(usize, usize, f32)> = None;

    for (idx, &candidate) in candidates.iter().enumerate() {
        if deadline.expired() {
            break;
        }
        let gain = grid.count_uncovered_within(candidate, radius);
        let edge_distance = region.min_edge_distance(candidate);
        let edge_penalty = config.edge_penalty_weight * (radius / (edge_distance + 1.0));

        let mut overlap_penalty = 0.0;
        for p in placed {
            let d = p.position.distance(candidate);
            overlap_penalty += (OVERLAP_KNEE * radius - d).max(0.0);
        }
        overlap_penalty *= config.overlap_penalty_weight;

        let score = gain as f32 - edge_penalty - overlap_penalty;
        trace.candidates_evaluated += 1;

        match best {
            Some((_, _, best_score)) if score <= best_score => {}
            _ => best = Some((idx, gain, score)),
        }
    }

    best.map(|(idx, gain, _)| (idx, gain))
}

/// Cluster the remaining uncovered samples and seed candidates at cluster
/// centroids. Returns how many candidates were added.
fn reseed_from_gaps(
    grid: &SampleGrid,
    validator: &PlacementValidator<'_>,
    candidates: &mut Vec<Point2D>,
    radius: f32,
) -> usize {
    let uncovered = grid.uncovered_points();
    let clusters = cluster_points(&uncovered, radius * GAP_CLUSTER_FACTOR);

    let mut added = 0;
    for cluster in clusters.iter().take(RESEED_LIMIT) {
        let Some(relaxed) = validator.relax(cluster.centroid) else {
            continue;
        };
        if candidates.iter().all(|c| c.distance(relaxed) > DEDUPE_EPS) {
            candidates.push(relaxed);
            added += 1;
        }
    }
    added
}
