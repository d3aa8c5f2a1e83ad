//! Tunable gameplay constants.

use avian3d::prelude::PhysicsLayer;
use bevy::prelude::*;

use crate::combat::{CategoryFilter, LockOnConfig, OrbitConfig};
use crate::common::layers::Layer;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Physics length unit (meters per world unit).
    pub length_unit: f32,
    pub player_speed: f32,
    /// Degrees of look per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Degrees per second at full right-stick deflection.
    pub stick_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub field_of_view: f32,
    /// Height of the camera pivot above the player origin.
    pub pivot_height: f32,
    pub lock_on: LockOnConfig,
    pub orbit: OrbitConfig,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            length_unit: 1.0,
            player_speed: 5.0,
            mouse_sensitivity: 0.15,
            stick_sensitivity: 180.0,
            field_of_view: 60.0,
            pivot_height: 1.6,
            lock_on: LockOnConfig {
                category: CategoryFilter(Layer::Enemy.to_bits()),
                ..default()
            },
            orbit: OrbitConfig::default(),
        }
    }
}
