//! World plugin: spawns the arena floor and walls.
//!
//! Only colliders are spawned here so the arena exists in headless apps too.
//! `ArenaBlock` records the full size; the render-only visuals plugin turns it
//! into a mesh.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

const HALF_EXTENT: f32 = 30.0;
const WALL_HEIGHT: f32 = 4.0;
const WALL_THICKNESS: f32 = 1.0;

/// A static box of the arena with its full size.
#[derive(Component, Debug, Clone, Copy)]
pub struct ArenaBlock {
    pub size: Vec3,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_arena);
}

fn spawn_arena(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy]);

    let mut spawn_block = |name: &str, pos: Vec3, size: Vec3| {
        commands.spawn((
            Name::new(name.to_string()),
            ArenaBlock { size },
            Transform::from_translation(pos),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
    };

    let span = HALF_EXTENT * 2.0 + WALL_THICKNESS * 2.0;
    let edge = HALF_EXTENT + WALL_THICKNESS * 0.5;
    let wall_y = WALL_HEIGHT * 0.5;

    spawn_block(
        "Floor",
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(span, 1.0, span),
    );
    spawn_block(
        "WallNorth",
        Vec3::new(0.0, wall_y, -edge),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
    spawn_block(
        "WallSouth",
        Vec3::new(0.0, wall_y, edge),
        Vec3::new(span, WALL_HEIGHT, WALL_THICKNESS),
    );
    spawn_block(
        "WallWest",
        Vec3::new(-edge, wall_y, 0.0),
        Vec3::new(WALL_THICKNESS, WALL_HEIGHT, HALF_EXTENT * 2.0),
    );
    spawn_block(
        "WallEast",
        Vec3::new(edge, wall_y, 0.0),
        Vec3::new(WALL_THICKNESS, WALL_HEIGHT, HALF_EXTENT * 2.0),
    );
}

#[cfg(test)]
mod tests;
