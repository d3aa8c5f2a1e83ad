//! Player plugin.
//!
//! Pipeline:
//! - Update: sample every device once, write the `PlayerInput` resource
//! - Update (lock_on plugin): the rig consumes that sample
//! - FixedUpdate: move the kinematic body relative to the camera yaw
//!
//! Device resources are optional. Headless apps have no input plugin, so a
//! missing keyboard or mouse simply contributes nothing to the sample.

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::combat::{InputSample, InputSampler, Triggers};
use crate::common::{angles, layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::lock_on::{LockOnStatus, PlayerRig};

#[derive(Component)]
pub struct Player;

/// Cached player entity, written once on spawn.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerEntity(pub Option<Entity>);

/// This frame's device-combined input.
#[derive(Resource, Default, Debug, Clone, Copy, Deref, DerefMut)]
pub struct PlayerInput(pub InputSample);

impl InputSampler for PlayerInput {
    fn sample(&mut self) -> InputSample {
        self.0
    }
}

const CAPSULE_RADIUS: f32 = 0.4;
const CAPSULE_LENGTH: f32 = 1.0;

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<PlayerEntity>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, gather_input.run_if(in_state(GameState::InGame)))
        .add_systems(FixedUpdate, apply_movement);
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let layers = CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy]);
    let half_height = CAPSULE_RADIUS + CAPSULE_LENGTH * 0.5;

    let e = commands
        .spawn((
            Name::new("Player"),
            Player,
            PlayerRig::from_tunables(&tunables),
            LockOnStatus::default(),
            Transform::from_xyz(0.0, half_height, 6.0),
            RigidBody::Kinematic,
            Collider::capsule(CAPSULE_RADIUS, CAPSULE_LENGTH),
            layers,
            LinearVelocity::ZERO,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.insert_resource(PlayerEntity(Some(e)));
}

/// Combine mouse, keyboard and gamepad into one `InputSample`.
pub fn gather_input(
    time: Res<Time>,
    tunables: Res<Tunables>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mouse_motion: Option<Res<AccumulatedMouseMotion>>,
    gamepads: Query<&Gamepad>,
    mut input: ResMut<PlayerInput>,
) {
    let mut look = Vec2::ZERO;
    let mut movement = Vec2::ZERO;
    let mut triggers = Triggers::default();

    if let Some(motion) = mouse_motion {
        // Screen y grows downward; look y grows upward.
        look += Vec2::new(motion.delta.x, -motion.delta.y) * tunables.mouse_sensitivity;
    }

    if let Some(keys) = keys {
        if keys.pressed(KeyCode::KeyW) {
            movement.y += 1.0;
        }
        if keys.pressed(KeyCode::KeyS) {
            movement.y -= 1.0;
        }
        if keys.pressed(KeyCode::KeyA) {
            movement.x -= 1.0;
        }
        if keys.pressed(KeyCode::KeyD) {
            movement.x += 1.0;
        }
        triggers.toggle_lock |= keys.just_pressed(KeyCode::Tab);
        triggers.roll |= keys.just_pressed(KeyCode::ControlLeft);
        triggers.jump |= keys.just_pressed(KeyCode::Space);
    }

    if let Some(buttons) = buttons {
        triggers.toggle_lock |= buttons.just_pressed(MouseButton::Middle);
        triggers.attack |= buttons.just_pressed(MouseButton::Left);
    }

    for gamepad in &gamepads {
        look += gamepad.right_stick() * tunables.stick_sensitivity * time.delta_secs();
        movement += gamepad.left_stick();
        triggers.toggle_lock |= gamepad.just_pressed(GamepadButton::RightThumb);
        triggers.attack |= gamepad.just_pressed(GamepadButton::West);
        triggers.roll |= gamepad.just_pressed(GamepadButton::East);
        triggers.jump |= gamepad.just_pressed(GamepadButton::South);
    }

    input.0 = InputSample {
        look_delta: look,
        movement: movement.clamp_length_max(1.0),
        triggers,
    }
    .sanitized();
}

/// Camera-relative movement: forward follows the orbit yaw, so a locked
/// player strafes around the target.
fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&PlayerRig, &mut LinearVelocity), With<Player>>,
) {
    let Ok((rig, mut vel)) = q_player.single_mut() else {
        return;
    };
    let yaw = rig.rotation().yaw;
    let axis = input.movement;
    let dir = angles::flat_right(yaw) * axis.x + angles::flat_forward(yaw) * axis.y;
    vel.0 = dir * tunables.player_speed;
}

#[cfg(test)]
mod tests;
