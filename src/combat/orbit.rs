//! Camera orientation: manual look, offset-clamped look while locked, and the
//! timed swing back to the target.
//!
//! The camera keeps one explicit state instead of flags and loose timers:
//!
//! ```text
//!   Manual { idle } ──(idle > return_delay)──> Returning ──(settled)──> AutoFollow
//!         ^                                        │                       │
//!         └──────────────── look input ────────────┴───────────────────────┘
//! ```
//!
//! `Manual` is free look while unlocked and offset-clamped look while locked.
//!
//! Unlocked ticks always sit in `Manual { idle: 0 }`. A release (toggle or lost
//! target) drops back there in the same tick; an acquisition or switch starts a
//! `Returning` swing toward the new target.

use bevy::math::Vec3;

use super::capabilities::CameraPose;
use super::input::InputSample;
use super::lock_on::{LockOnSnapshot, LockTransition};
use crate::common::angles;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitConfig {
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Look magnitude (degrees this tick) above which the player is steering.
    pub idle_threshold: f32,
    /// Furthest the yaw may be pushed away from facing the target while locked.
    pub max_angle_offset: f32,
    /// Seconds of no input before the camera swings back to the target.
    pub return_delay: f32,
    /// Responsiveness of the swing back (1/s).
    pub return_rate: f32,
    /// The swing counts as settled once both axes are this close (degrees).
    pub settle_tolerance: f32,
    /// Distance from the pivot to the camera along the view axis.
    pub boom_length: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_pitch: -80.0,
            max_pitch: 80.0,
            idle_threshold: 0.1,
            max_angle_offset: 30.0,
            return_delay: 1.5,
            return_rate: 6.0,
            settle_tolerance: 0.25,
            boom_length: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitState {
    /// Player-driven. `idle` counts seconds without look input while locked.
    Manual { idle: f32 },
    /// Swinging toward the locked target.
    Returning,
    /// Settled on the locked target and tracking it.
    AutoFollow,
}

/// Final camera angles for this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraRotation {
    /// Degrees in `[0, 360)`.
    pub yaw: f32,
    /// Degrees within the configured pitch clamp.
    pub pitch: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitController {
    config: OrbitConfig,
    yaw: f32,
    pitch: f32,
    state: OrbitState,
    locked: bool,
}

impl OrbitController {
    pub fn new(config: OrbitConfig) -> Self {
        Self::with_rotation(config, 0.0, 0.0)
    }

    pub fn with_rotation(config: OrbitConfig, yaw: f32, pitch: f32) -> Self {
        let mut orbit = Self {
            config,
            yaw: 0.0,
            pitch: 0.0,
            state: OrbitState::Manual { idle: 0.0 },
            locked: false,
        };
        if yaw.is_finite() {
            orbit.yaw = angles::wrap_degrees(yaw);
        }
        if pitch.is_finite() {
            orbit.pitch = orbit.clamp_pitch(pitch);
        }
        orbit
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    pub fn rotation(&self) -> CameraRotation {
        CameraRotation { yaw: self.yaw, pitch: self.pitch }
    }

    pub fn state(&self) -> OrbitState {
        self.state
    }

    pub fn idle_timer(&self) -> f32 {
        match self.state {
            OrbitState::Manual { idle } => idle,
            OrbitState::Returning | OrbitState::AutoFollow => 0.0,
        }
    }

    /// True while the player holds the camera away from auto-follow during a lock.
    pub fn manual_override_active(&self) -> bool {
        self.locked && matches!(self.state, OrbitState::Manual { .. })
    }

    /// Camera placed on the boom behind `pivot`.
    pub fn camera_pose(&self, pivot: Vec3) -> CameraPose {
        let forward = angles::forward(self.yaw, self.pitch);
        CameraPose {
            position: pivot - forward * self.config.boom_length,
            yaw: self.yaw,
            pitch: self.pitch,
        }
    }

    /// Advance one tick using this tick's input and lock snapshot.
    pub fn update<Id>(
        &mut self,
        input: &InputSample,
        lock: &LockOnSnapshot<Id>,
        pivot: Vec3,
        dt: f32,
    ) -> CameraRotation {
        let input = input.sanitized();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        match lock.transition {
            Some(LockTransition::Released { .. }) => self.reset(),
            Some(LockTransition::Acquired(_)) | Some(LockTransition::Switched { .. }) => {
                self.state = OrbitState::Returning;
            }
            None => {}
        }

        let Some(target) = lock.target.as_ref() else {
            self.locked = false;
            self.state = OrbitState::Manual { idle: 0.0 };
            self.free_look(&input);
            return self.rotation();
        };
        self.locked = true;

        let Some((ideal_yaw, ideal_pitch)) = angles::look_angles(target.center - pivot) else {
            // Pivot on top of (or straight under) the target: hold this tick.
            return self.rotation();
        };
        let ideal_pitch = self.clamp_pitch(ideal_pitch);

        let fresh_target = lock.transition.is_some();
        if !fresh_target && input.look_magnitude() > self.config.idle_threshold {
            self.state = OrbitState::Manual { idle: 0.0 };
            self.clamped_look(&input, ideal_yaw);
            return self.rotation();
        }

        if let OrbitState::Manual { idle } = self.state {
            let idle = idle + dt;
            if idle <= self.config.return_delay {
                self.state = OrbitState::Manual { idle };
                return self.rotation();
            }
            self.state = OrbitState::Returning;
        }

        self.swing_towards(ideal_yaw, ideal_pitch, dt);
        self.rotation()
    }

    fn reset(&mut self) {
        self.state = OrbitState::Manual { idle: 0.0 };
        self.locked = false;
    }

    #[inline]
    fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.config.min_pitch, self.config.max_pitch)
    }

    fn free_look(&mut self, input: &InputSample) {
        self.yaw = angles::wrap_degrees(self.yaw + input.look_delta.x);
        self.pitch = self.clamp_pitch(self.pitch - input.look_delta.y);
    }

    /// Manual look while locked: the yaw may roam up to `max_angle_offset` away
    /// from facing the target, and may always move back toward it.
    ///
    /// A delta that swings past the target and out beyond the limit on the far
    /// side stops at the limit on the side the camera started from.
    fn clamped_look(&mut self, input: &InputSample, ideal_yaw: f32) {
        let max_offset = self.config.max_angle_offset;
        let tentative = angles::wrap_degrees(self.yaw + input.look_delta.x);
        let current_offset = angles::delta_angle(self.yaw, ideal_yaw);
        let desired_offset = angles::delta_angle(tentative, ideal_yaw);

        self.yaw = if desired_offset.abs() <= max_offset
            || desired_offset.abs() < current_offset.abs()
        {
            tentative
        } else {
            let side = if current_offset != 0.0 {
                current_offset.signum()
            } else {
                desired_offset.signum()
            };
            angles::wrap_degrees(ideal_yaw - side * max_offset)
        };

        self.pitch = self.clamp_pitch(self.pitch - input.look_delta.y);
    }

    fn swing_towards(&mut self, ideal_yaw: f32, ideal_pitch: f32, dt: f32) {
        let t = angles::smoothing_factor(self.config.return_rate, dt);
        self.yaw = angles::wrap_degrees(angles::lerp_angle(self.yaw, ideal_yaw, t));
        self.pitch = self.clamp_pitch(angles::lerp_angle(self.pitch, ideal_pitch, t));

        let tolerance = self.config.settle_tolerance;
        let settled = angles::delta_angle(self.yaw, ideal_yaw).abs() <= tolerance
            && angles::delta_angle(self.pitch, ideal_pitch).abs() <= tolerance;
        if settled && self.state == OrbitState::Returning {
            self.yaw = ideal_yaw;
            self.pitch = ideal_pitch;
            self.state = OrbitState::AutoFollow;
        }
    }
}
