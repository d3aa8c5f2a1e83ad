//! Per-tick input snapshot.

use bevy::math::Vec2;

/// Discrete actions that fired this tick.
///
/// Only `toggle_lock` drives the lock-on core; the rest ride along so one
/// sample serves every consumer of the tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Triggers {
    pub toggle_lock: bool,
    pub attack: bool,
    pub roll: bool,
    pub jump: bool,
}

/// Device-combined input for one tick.
///
/// `look_delta` is already scaled to degrees for this tick: `x` turns right,
/// `y` looks up. `movement` is the raw move intent in `[-1, 1]` per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    pub look_delta: Vec2,
    pub movement: Vec2,
    pub triggers: Triggers,
}

impl InputSample {
    /// A sample with only look input.
    pub fn look(delta: Vec2) -> Self {
        Self { look_delta: delta, ..Default::default() }
    }

    /// A sample that only fires the lock toggle.
    pub fn toggle_lock() -> Self {
        Self {
            triggers: Triggers { toggle_lock: true, ..Default::default() },
            ..Default::default()
        }
    }

    /// Replace non-finite axes with zero so NaN never reaches controller state.
    pub fn sanitized(mut self) -> Self {
        if !self.look_delta.is_finite() {
            self.look_delta = Vec2::ZERO;
        }
        if !self.movement.is_finite() {
            self.movement = Vec2::ZERO;
        }
        self
    }

    #[inline]
    pub fn look_magnitude(&self) -> f32 {
        self.look_delta.length()
    }
}
