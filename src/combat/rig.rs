//! One character's combat camera: the fixed per-tick pipeline.
//!
//! ```text
//!  (1) sample input once ──> (2) LockOnController ──snapshot──> (3) OrbitController
//!                                  │                                   │
//!                                  └──────────> (4) RigOutput <────────┘
//! ```
//!
//! The lock-on step projects switch candidates with the camera pose left by
//! the previous tick; the orbit step then reacts to the fresh snapshot.

use bevy::math::Vec3;

use super::capabilities::{InputSampler, ReferencePose, ScreenProjector, TargetQuery};
use super::input::InputSample;
use super::lock_on::{LockMode, LockOnConfig, LockOnController, LockOnFrame, LockOnSnapshot};
use super::orbit::{CameraRotation, OrbitConfig, OrbitController};
use crate::common::angles;

/// Host-supplied facts for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigFrame<Id> {
    /// Simulation time in seconds.
    pub now: f32,
    pub dt: f32,
    pub actor: Option<Id>,
    /// Where candidate distances and facing are measured from.
    pub actor_position: Vec3,
    /// Point the camera orbits and aims from.
    pub pivot: Vec3,
}

/// Everything a tick exposes to the rest of the game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigOutput<Id> {
    pub lock: LockOnSnapshot<Id>,
    pub rotation: CameraRotation,
    /// The sample this tick consumed, for locomotion and action layers.
    pub input: InputSample,
}

#[derive(Debug, Clone)]
pub struct CombatRig<Id> {
    lock_on: LockOnController<Id>,
    orbit: OrbitController,
    published: LockOnSnapshot<Id>,
}

impl<Id: Copy + Eq + std::fmt::Debug> CombatRig<Id> {
    pub fn new(lock_on: LockOnConfig, orbit: OrbitConfig) -> Self {
        Self::from_parts(LockOnController::new(lock_on), OrbitController::new(orbit))
    }

    pub fn from_parts(lock_on: LockOnController<Id>, orbit: OrbitController) -> Self {
        Self { lock_on, orbit, published: LockOnSnapshot::free() }
    }

    pub fn lock_on(&self) -> &LockOnController<Id> {
        &self.lock_on
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    /// Snapshot published by the most recent tick.
    pub fn snapshot(&self) -> &LockOnSnapshot<Id> {
        &self.published
    }

    pub fn is_locked(&self) -> bool {
        self.lock_on.mode() == LockMode::Locked
    }

    pub fn rotation(&self) -> CameraRotation {
        self.orbit.rotation()
    }

    pub fn tick<S, Q, P>(
        &mut self,
        frame: &RigFrame<Id>,
        sampler: &mut S,
        targets: &Q,
        projector: &P,
    ) -> RigOutput<Id>
    where
        S: InputSampler + ?Sized,
        Q: TargetQuery<Id = Id>,
        P: ScreenProjector,
    {
        let input = sampler.sample().sanitized();
        let dt = if frame.dt.is_finite() { frame.dt.max(0.0) } else { 0.0 };

        let pose = ReferencePose {
            actor: frame.actor,
            origin: frame.actor_position,
            forward: angles::flat_forward(self.orbit.rotation().yaw),
        };
        let lock = self.lock_on.update(
            &LockOnFrame {
                now: frame.now,
                pose,
                input: &input,
                camera: self.orbit.camera_pose(frame.pivot),
                projector,
            },
            targets,
        );

        let rotation = self.orbit.update(&input, &lock, frame.pivot, dt);

        self.published = lock;
        RigOutput { lock, rotation, input }
    }
}
