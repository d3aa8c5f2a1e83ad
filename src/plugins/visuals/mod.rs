//! Visuals plugin (render-only): meshes for entities spawned collider-only.
//!
//! Gameplay plugins spawn no meshes so they run headless. This plugin watches
//! for newly added bodies and attaches `Mesh3d` + `MeshMaterial3d` to them.

use bevy::prelude::*;

use crate::plugins::enemies::{Boss, EnemyBody};
use crate::plugins::player::Player;
use crate::plugins::world::ArenaBlock;

const PLAYER_RADIUS: f32 = 0.4;
const PLAYER_LENGTH: f32 = 1.0;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, (dress_arena, dress_enemies, dress_player));
}

fn dress_arena(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &ArenaBlock), Added<ArenaBlock>>,
) {
    for (e, block) in &q {
        let mesh = meshes.add(Cuboid::from_size(block.size));
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.35, 0.36, 0.4),
            perceptual_roughness: 0.9,
            ..default()
        });
        commands.entity(e).insert((Mesh3d(mesh), MeshMaterial3d(material)));
    }
}

fn dress_enemies(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &EnemyBody, Has<Boss>), Added<EnemyBody>>,
) {
    for (e, body, is_boss) in &q {
        let mesh = meshes.add(Capsule3d::new(body.radius, body.length));
        let base_color = if is_boss {
            Color::srgb(0.55, 0.15, 0.6)
        } else {
            Color::srgb(0.85, 0.25, 0.25)
        };
        let material = materials.add(StandardMaterial { base_color, ..default() });
        commands.entity(e).insert((Mesh3d(mesh), MeshMaterial3d(material)));
    }
}

fn dress_player(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<Entity, Added<Player>>,
) {
    for e in &q {
        let mesh = meshes.add(Capsule3d::new(PLAYER_RADIUS, PLAYER_LENGTH));
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.6, 0.9),
            ..default()
        });
        commands.entity(e).insert((Mesh3d(mesh), MeshMaterial3d(material)));
    }
}
