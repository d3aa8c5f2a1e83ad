//! Camera plugin (render-only).
//!
//! The rig owns the orientation; this plugin only places a `Camera3d` on the
//! orbit boom and eases it there.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera -> write MainCameraEntity resource
//! PostUpdate:      follow_rig uses stored handles + disjoint queries
//! ```
//!
//! The player and camera queries both touch `Transform`, so they are kept
//! disjoint with `Without<...>` filters.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{angles, state::GameState, tunables::Tunables};
use crate::plugins::lock_on::PlayerRig;
use crate::plugins::player::{Player, PlayerEntity};

#[derive(Component)]
pub struct MainCamera {
    /// Exponential follow rate (1/s).
    pub responsiveness: f32,
}

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct MainCameraEntity(pub Option<Entity>);

pub fn plugin(app: &mut App) {
    app.init_resource::<MainCameraEntity>()
        .add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_rig
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let e = commands
        .spawn((
            Name::new("MainCamera"),
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: tunables.field_of_view.to_radians(),
                ..default()
            }),
            MainCamera { responsiveness: 12.0 },
            Transform::from_xyz(0.0, 4.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.insert_resource(MainCameraEntity(Some(e)));
}

fn follow_rig(
    time: Res<Time>,
    tunables: Res<Tunables>,
    player_e: Res<PlayerEntity>,
    cam_e: Res<MainCameraEntity>,
    q_player: Query<(&Transform, &PlayerRig), (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let (Some(player), Some(cam)) = (player_e.0, cam_e.0) else {
        return;
    };
    let Ok((tf_player, rig)) = q_player.get(player) else {
        debug!("PlayerEntity {player:?} has no rig");
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.get_mut(cam) else {
        debug!("MainCameraEntity {cam:?} is gone");
        return;
    };

    let pivot = tf_player.translation + Vec3::Y * tunables.pivot_height;
    let pose = rig.orbit().camera_pose(pivot);

    let alpha = angles::smoothing_factor(main_cam.responsiveness, time.delta_secs());
    tf_cam.translation = tf_cam.translation.lerp(pose.position, alpha);
    // Orientation is already smoothed by the rig; lagging it again reads as drift.
    tf_cam.rotation = angles::rotation(pose.yaw, pose.pitch);
}
