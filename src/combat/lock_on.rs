//! Lock-on controller: Free / Locked, acquisition and in-combat switching.
//!
//! ```text
//!       toggle + cooldown + eligible candidate
//!   ┌──────┐ ─────────────────────────────> ┌────────────────┐
//!   │ Free │                                 │ Locked{target} │ ──┐ switch (cooldown
//!   └──────┘ <───────────────────────────── └────────────────┘ <─┘  + input gate)
//!            toggle | target lost | out of range
//! ```
//!
//! Update order inside one tick:
//! 1. re-resolve the locked target; release if it is gone or out of range
//! 2. toggle: release, or try to acquire
//! 3. otherwise, if still locked, try to switch
//!
//! At most one transition happens per tick, and the result is published as an
//! immutable [`LockOnSnapshot`] for everything downstream.

use bevy::log::{debug, info};
use bevy::math::Vec3;

use super::capabilities::{CameraPose, CategoryFilter, ReferencePose, ScreenProjector, TargetQuery};
use super::input::InputSample;
use super::scorer::{self, ScoreWeights, Scoring, SwitchView};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockOnConfig {
    /// Radius of the candidate range query.
    pub search_radius: f32,
    /// A locked target further than this from the actor is released.
    /// Any non-finite value disables the check.
    pub break_distance: f32,
    pub category: CategoryFilter,
    /// Use the facing-gated acquisition score (rejects targets behind the actor).
    pub reject_behind: bool,
    /// Minimum seconds between target changes (acquisition or switch).
    pub switch_cooldown: f32,
    /// Minimum look magnitude (degrees this tick) that counts as a switch gesture.
    pub switch_input_threshold: f32,
    pub weights: ScoreWeights,
}

impl Default for LockOnConfig {
    fn default() -> Self {
        Self {
            search_radius: 20.0,
            break_distance: 30.0,
            category: CategoryFilter::ALL,
            reject_behind: true,
            switch_cooldown: 0.5,
            switch_input_threshold: 3.0,
            weights: ScoreWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Free,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockState<Id> {
    Free,
    Locked { target: Id },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseReason {
    Toggled,
    TargetLost,
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockTransition<Id> {
    Acquired(Id),
    Switched { from: Id, to: Id },
    Released { target: Id, reason: ReleaseReason },
}

/// The locked target with its position as resolved this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockedTarget<Id> {
    pub id: Id,
    pub center: Vec3,
}

/// Read-only lock state handed to the camera and other collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockOnSnapshot<Id> {
    pub target: Option<LockedTarget<Id>>,
    /// What changed this tick, if anything.
    pub transition: Option<LockTransition<Id>>,
}

impl<Id> LockOnSnapshot<Id> {
    pub fn free() -> Self {
        Self { target: None, transition: None }
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.target.is_some()
    }
}

impl<Id> Default for LockOnSnapshot<Id> {
    fn default() -> Self {
        Self::free()
    }
}

/// Inputs to one lock-on update.
pub struct LockOnFrame<'a, Id> {
    /// Simulation time in seconds; must not run backwards.
    pub now: f32,
    pub pose: ReferencePose<Id>,
    pub input: &'a InputSample,
    /// Camera pose used to project switch candidates.
    pub camera: CameraPose,
    pub projector: &'a dyn ScreenProjector,
}

#[derive(Debug, Clone)]
pub struct LockOnController<Id> {
    config: LockOnConfig,
    state: LockState<Id>,
    /// Time of the last acquisition or switch; `-inf` until the first one.
    last_switch_time: f32,
}

impl<Id: Copy + Eq + std::fmt::Debug> LockOnController<Id> {
    pub fn new(config: LockOnConfig) -> Self {
        Self { config, state: LockState::Free, last_switch_time: f32::NEG_INFINITY }
    }

    pub fn config(&self) -> &LockOnConfig {
        &self.config
    }

    pub fn mode(&self) -> LockMode {
        match self.state {
            LockState::Free => LockMode::Free,
            LockState::Locked { .. } => LockMode::Locked,
        }
    }

    pub fn current_target(&self) -> Option<Id> {
        match self.state {
            LockState::Free => None,
            LockState::Locked { target } => Some(target),
        }
    }

    pub fn last_switch_time(&self) -> f32 {
        self.last_switch_time
    }

    /// Run one tick of the lock-on state machine.
    pub fn update<Q>(&mut self, frame: &LockOnFrame<'_, Id>, targets: &Q) -> LockOnSnapshot<Id>
    where
        Q: TargetQuery<Id = Id>,
    {
        let mut transition = None;
        let mut located = None;

        if let LockState::Locked { target } = self.state {
            match self.validate(target, frame.pose.origin, targets) {
                Ok(found) => located = Some(found),
                Err(reason) => transition = Some(self.release(target, reason)),
            }
        }

        if transition.is_none() {
            if frame.input.triggers.toggle_lock {
                transition = match self.state {
                    LockState::Locked { target } => Some(self.release(target, ReleaseReason::Toggled)),
                    LockState::Free => self.try_acquire(frame, targets, &mut located),
                };
            } else if let LockState::Locked { target } = self.state {
                transition = self.try_switch(target, frame, targets, &mut located);
            }
        }

        let target = match self.state {
            LockState::Free => None,
            LockState::Locked { target } => {
                located.map(|center| LockedTarget { id: target, center })
            }
        };

        LockOnSnapshot { target, transition }
    }

    fn validate<Q>(&self, target: Id, origin: Vec3, targets: &Q) -> Result<Vec3, ReleaseReason>
    where
        Q: TargetQuery<Id = Id>,
    {
        let found = targets.locate(target).ok_or(ReleaseReason::TargetLost)?;
        let limit = self.config.break_distance;
        if limit.is_finite() && found.center.distance(origin) > limit {
            return Err(ReleaseReason::OutOfRange);
        }
        Ok(found.center)
    }

    fn release(&mut self, target: Id, reason: ReleaseReason) -> LockTransition<Id> {
        info!("lock-on released {target:?} ({reason:?})");
        self.state = LockState::Free;
        LockTransition::Released { target, reason }
    }

    fn stamp(&mut self, now: f32) {
        self.last_switch_time = self.last_switch_time.max(now);
    }

    fn try_acquire<Q>(
        &mut self,
        frame: &LockOnFrame<'_, Id>,
        targets: &Q,
        located: &mut Option<Vec3>,
    ) -> Option<LockTransition<Id>>
    where
        Q: TargetQuery<Id = Id>,
    {
        if frame.now - self.last_switch_time < self.config.switch_cooldown {
            debug!("lock-on: acquisition ignored, cooldown running");
            return None;
        }

        let candidates = targets.query_in_radius(
            frame.pose.origin,
            self.config.search_radius,
            self.config.category,
        );
        let scoring = if self.config.reject_behind {
            Scoring::AcquireFacing
        } else {
            Scoring::Acquire
        };

        let Some((best, score)) =
            scorer::pick_best(&candidates, &frame.pose, &scoring, &self.config.weights)
        else {
            debug!("lock-on: no eligible candidate among {}", candidates.len());
            return None;
        };

        info!("lock-on acquired {:?} (score {score:.2})", best.id);
        self.state = LockState::Locked { target: best.id };
        self.stamp(frame.now);
        *located = Some(best.center);
        Some(LockTransition::Acquired(best.id))
    }

    fn try_switch<Q>(
        &mut self,
        current: Id,
        frame: &LockOnFrame<'_, Id>,
        targets: &Q,
        located: &mut Option<Vec3>,
    ) -> Option<LockTransition<Id>>
    where
        Q: TargetQuery<Id = Id>,
    {
        if frame.now - self.last_switch_time < self.config.switch_cooldown {
            return None;
        }
        if frame.input.look_magnitude() < self.config.switch_input_threshold {
            return None;
        }

        let candidates = targets.query_in_radius(
            frame.pose.origin,
            self.config.search_radius,
            self.config.category,
        );
        let scoring = Scoring::Switch(SwitchView {
            camera: frame.camera,
            projector: frame.projector,
            input_dir: frame.input.look_delta,
            current: Some(current),
        });

        let Some((best, score)) =
            scorer::pick_best(&candidates, &frame.pose, &scoring, &self.config.weights)
        else {
            debug!("lock-on: switch gesture found nothing in that direction");
            return None;
        };

        info!("lock-on switched {current:?} -> {:?} (score {score:.2})", best.id);
        self.state = LockState::Locked { target: best.id };
        self.stamp(frame.now);
        *located = Some(best.center);
        Some(LockTransition::Switched { from: current, to: best.id })
    }
}
