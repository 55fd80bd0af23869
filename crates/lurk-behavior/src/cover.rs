//! Concealment-point search.
//!
//! # Algorithm
//!
//! 1. Ask the obstacle index for up to [`MAX_COVER_CANDIDATES`] hidable
//!    obstacles within the detection radius of the agent.
//! 2. Drop candidates that sit too close to the target or are too low to
//!    hide behind, then sort the survivors by distance from the agent
//!    (stable: ties keep query order).
//! 3. Walk the sorted list.  For each candidate, sample the walkable surface
//!    near the obstacle, take the closest surface edge, and accept the edge
//!    point if its normal faces away from the target
//!    (`normal · to_target < hide_sensitivity`).  The first acceptance wins.
//! 4. If the near edge faces the target, probe the obstacle's far side once
//!    (a point mirrored through the obstacle along the target direction)
//!    before abandoning the candidate.
//!
//! The facing test is a cheap stand-in for "the obstacle is between me and
//! the target": the surface edge next to a carved obstacle faces away from
//! everything on the obstacle's far side, so no line-of-sight ray is needed.
//!
//! # Failure semantics
//!
//! Every miss is local: no surface near an obstacle skips that candidate, a
//! missing edge skips that probe, and an exhausted candidate list returns
//! `None` — the caller simply keeps its previous destination until the next
//! cadence tick retries.

use log::{debug, warn};

use lurk_core::Vec3;
use lurk_nav::{ObstacleHit, ObstacleQuery, SurfaceQuery};

use crate::TuningParameters;

/// Obstacle-query cap per selection pass: the search never considers more
/// than this many candidates, which bounds the work done in one cadence step.
pub const MAX_COVER_CANDIDATES: usize = 10;

/// Search radius for snapping an obstacle's center onto the walkable surface.
pub const SURFACE_SAMPLE_RADIUS: f32 = 2.0;

/// How far past the obstacle center the far-side probe reaches.
const OPPOSITE_SIDE_OFFSET: f32 = 2.0;

// ── Candidate ─────────────────────────────────────────────────────────────────

/// A filtered obstacle under consideration, alive for one selection pass only.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Candidate {
    pub position:      Vec3,
    pub height:        f32,
    pub dist_to_agent: f32,
}

/// Build candidates from raw obstacle hits, keeping query order.
pub(crate) fn candidates_from_hits(hits: &[ObstacleHit], agent_pos: Vec3) -> Vec<Candidate> {
    hits.iter()
        .map(|hit| Candidate {
            position:      hit.position,
            height:        hit.size.y,
            dist_to_agent: agent_pos.distance(hit.position),
        })
        .collect()
}

/// Drop candidates that are too close to the target (strictly less than
/// `min_target_distance`; equality survives) or too low to hide behind.
///
/// Idempotent: filtering an already-filtered list removes nothing further.
pub(crate) fn retain_valid(
    candidates: &mut Vec<Candidate>,
    target_pos: Vec3,
    params:     &TuningParameters,
) {
    candidates.retain(|c| {
        c.position.distance(target_pos) >= params.min_target_distance
            && c.height >= params.min_obstacle_height
    });
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Pick a concealment point for an agent at `agent_pos` hiding from
/// `target_pos`, or `None` when no candidate passes the facing test this
/// pass.
///
/// Pure with respect to the controller: all state lives in the two injected
/// query services, and the same inputs always walk the candidates in the
/// same order.
pub fn select_cover(
    agent_pos:  Vec3,
    target_pos: Vec3,
    params:     &TuningParameters,
    obstacles:  &dyn ObstacleQuery,
    surface:    &dyn SurfaceQuery,
) -> Option<Vec3> {
    let hits = obstacles.query_nearby(
        agent_pos,
        params.detection_radius,
        params.hidable_categories,
        MAX_COVER_CANDIDATES,
    );

    let mut candidates = candidates_from_hits(&hits, agent_pos);
    retain_valid(&mut candidates, target_pos, params);
    // Stable sort: equal distances keep the obstacle query's order.
    candidates.sort_by(|a, b| a.dist_to_agent.total_cmp(&b.dist_to_agent));

    for candidate in &candidates {
        let Some(sample) = surface.sample_near(candidate.position, SURFACE_SAMPLE_RADIUS) else {
            warn!(
                "no walkable surface near obstacle at {}",
                candidate.position
            );
            continue;
        };
        let Some(edge) = surface.closest_edge(sample) else {
            warn!("unable to find edge close to {sample}");
            continue;
        };

        let to_target = (target_pos - edge.position).normalize_or_zero();
        if edge.normal.dot(to_target) < params.hide_sensitivity {
            return Some(edge.position);
        }

        // The near edge faces the target; try the obstacle's far side once.
        let mirrored = candidate.position - to_target * OPPOSITE_SIDE_OFFSET;
        let Some(far_sample) = surface.sample_near(mirrored, SURFACE_SAMPLE_RADIUS) else {
            continue;
        };
        match surface.closest_edge(far_sample) {
            Some(far_edge) => {
                let to_target = (target_pos - far_edge.position).normalize_or_zero();
                if far_edge.normal.dot(to_target) < params.hide_sensitivity {
                    return Some(far_edge.position);
                }
            }
            None => warn!("unable to find edge close to {far_sample} (second attempt)"),
        }
    }

    debug!("no concealment candidate passed the facing test");
    None
}
