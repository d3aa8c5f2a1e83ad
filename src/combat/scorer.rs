//! Target scoring. Lower is better; `None` means "not eligible".
//!
//! Two families of score:
//!
//! - **Acquire** (Free -> Locked): world-space. There is no meaningful screen
//!   until something is locked, so candidates are ranked by how far they sit
//!   off the actor's facing plus a small distance term:
//!   `angle_deg + distance_weight * distance`.
//! - **Switch** (while Locked): screen-space. The player flicks the stick or
//!   mouse toward another enemy *on screen*, so candidates must lie in that
//!   2D direction from the screen center:
//!   `|screen_offset| + distance_weight * camera_distance`.
//!
//! "No eligible candidate" is always `None`. It must never collapse into a
//! real score, or an empty query would lock on to something arbitrary.

use bevy::math::Vec2;

use super::capabilities::{CameraPose, ReferencePose, ScreenProjector, Targetable};
use crate::common::angles;

/// Weights and gates shared by every scoring pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Multiplier for the distance term.
    pub distance_weight: f32,
    /// Gated acquisition rejects candidates whose normalized facing dot is below this.
    pub facing_min_dot: f32,
    /// Switching requires the screen offset to agree with the input direction this much.
    pub switch_min_dot: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { distance_weight: 0.1, facing_min_dot: 0.1, switch_min_dot: 0.8 }
    }
}

/// Everything switch scoring needs about the current view.
#[derive(Clone, Copy)]
pub struct SwitchView<'a, Id> {
    pub camera: CameraPose,
    pub projector: &'a dyn ScreenProjector,
    /// Raw look input; only its direction matters.
    pub input_dir: Vec2,
    /// The target being switched away from.
    pub current: Option<Id>,
}

/// Which score to compute.
#[derive(Clone, Copy)]
pub enum Scoring<'a, Id> {
    /// World-space angle + distance, no angular exclusion.
    Acquire,
    /// As `Acquire`, but candidates behind the facing gate are rejected.
    AcquireFacing,
    Switch(SwitchView<'a, Id>),
}

/// Score one candidate.
pub fn score<Id: Copy + Eq>(
    candidate: &Targetable<Id>,
    pose: &ReferencePose<Id>,
    scoring: &Scoring<'_, Id>,
    weights: &ScoreWeights,
) -> Option<f32> {
    if pose.actor == Some(candidate.id) {
        return None;
    }

    let value = match scoring {
        Scoring::Acquire => acquire_score(candidate, pose, weights, false)?,
        Scoring::AcquireFacing => acquire_score(candidate, pose, weights, true)?,
        Scoring::Switch(view) => switch_score(candidate, view, weights)?,
    };
    value.is_finite().then_some(value)
}

fn acquire_score<Id>(
    candidate: &Targetable<Id>,
    pose: &ReferencePose<Id>,
    weights: &ScoreWeights,
    facing_gate: bool,
) -> Option<f32> {
    let to_candidate = candidate.center - pose.origin;
    let angle = angles::angle_between(pose.forward, to_candidate)?;

    if facing_gate {
        let dot = pose.forward.normalize().dot(to_candidate.normalize());
        if dot < weights.facing_min_dot {
            return None;
        }
    }

    Some(angle + weights.distance_weight * to_candidate.length())
}

fn switch_score<Id: Copy + Eq>(
    candidate: &Targetable<Id>,
    view: &SwitchView<'_, Id>,
    weights: &ScoreWeights,
) -> Option<f32> {
    if view.current == Some(candidate.id) {
        return None;
    }

    let projected = view.projector.project(&view.camera, candidate.center)?;
    if projected.depth < 0.0 {
        return None;
    }

    let offset = projected.position - view.projector.screen_center();
    let agreement = offset.normalize_or_zero().dot(view.input_dir.normalize_or_zero());
    if agreement < weights.switch_min_dot {
        return None;
    }

    Some(offset.length() + weights.distance_weight * view.camera.position.distance(candidate.center))
}

/// Lowest-scoring eligible candidate. Ties go to the earliest in `candidates`.
pub fn pick_best<Id: Copy + Eq>(
    candidates: &[Targetable<Id>],
    pose: &ReferencePose<Id>,
    scoring: &Scoring<'_, Id>,
    weights: &ScoreWeights,
) -> Option<(Targetable<Id>, f32)> {
    candidates
        .iter()
        .filter_map(|c| score(c, pose, scoring, weights).map(|s| (*c, s)))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}
