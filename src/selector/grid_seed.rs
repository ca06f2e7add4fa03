//! Grid-seeded greedy set cover (alternative strategy).
//!
//! Seeds a staggered lattice at the minimum-spacing pitch, relaxes every seed
//! to validity, then greedily accepts the seed with the largest uncovered
//! gain, gated by the minimum-spacing filter. No scoring penalties, no
//! re-seeding: deterministic and repeatable for identical inputs.

use log::debug;

use crate::config::PlacementConfig;
use crate::core::Polygon;
use crate::sampler::SampleGrid;
use crate::validator::PlacementValidator;

use super::spacing::is_spacing_allowed;
use super::{
    generate_candidates, tolerance_count, Deadline, Placement, PlacementTrace, SelectionOutcome,
};

/// Run the grid-seed strategy against `grid`, mutating it as samples are
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
    let min_spacing = config.min_spacing();
    let mut candidates = generate_candidates(region, validator, min_spacing, config.lattice, deadline);
    trace.candidates_generated += candidates.len();

    let tolerance_count = tolerance_count(grid.len(), config.tolerance_percent);
    debug!(
        "grid-seed selection: {} samples, {} seeds, spacing {:.2}",
        grid.len(),
        candidates.len(),
        min_spacing
    );

    while grid.uncovered_count() > tolerance_count && outcome.placements.len() < config.max_placements {
        if deadline.expired() {
            outcome.incomplete = true;
            break;
        }
        trace.iterations += 1;

        // Best admissible seed by uncovered gain; ties keep the earlier seed.
        // Deadline checked per seed since gain counting scans every sample
        let mut best: Option<(usize, usize)> = None;
        for (idx, &candidate) in candidates.iter().enumerate() {
            if deadline.expired() {
                break;
            }
            if !is_spacing_allowed(candidate, &outcome.placements, min_spacing) {
                continue;
            }
            let gain = grid.count_uncovered_within(candidate, radius);
            trace.candidates_evaluated += 1;
            match best {
                Some((_, best_gain)) if gain <= best_gain => {}
                _ => best = Some((idx, gain)),
            }
        }

        let Some((best_idx, best_gain)) = best else {
            // Every remaining seed is spacing-blocked, or the budget ran out
            // before any could be scored
            outcome.incomplete = true;
            break;
        };
        if best_gain < 1 {
            trace.stagnations += 1;
            outcome.incomplete = true;
            break;
        }

        let position = candidates.swap_remove(best_idx);
        grid.cover_within(position, radius);
        outcome.placements.push(Placement {
            id: outcome.placements.len() as u32,
            position,
            radius,
        });
    }

    if grid.uncovered_count() > tolerance_count && !outcome.incomplete {
        // Placement cap reached with residual gaps
        outcome.incomplete = true;
    }

    debug!(
        "grid-seed selection done: {} placements, {:.1}% covered, incomplete={}",
        outcome.placements.len(),
        grid.coverage_percent(),
        outcome.incomplete
    );
    outcome
}
