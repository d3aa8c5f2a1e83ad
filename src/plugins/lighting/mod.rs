//! Lighting plugin (render-only).

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), setup);
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 9_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 20.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}
