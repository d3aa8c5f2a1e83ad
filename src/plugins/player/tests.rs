use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::lock_on::{LockOnStatus, PlayerRig};

#[test]
fn spawn_creates_player_with_rig() {
    let mut world = World::new();
    world.init_resource::<Tunables>();
    run_system_once(&mut world, super::spawn);

    let mut q = world.query::<(&super::Player, &PlayerRig, &LockOnStatus)>();
    let (_, rig, status) = q.single(&world).expect("exactly one player");
    assert!(!rig.is_locked());
    assert!(!status.is_locked());

    let cached = world.resource::<super::PlayerEntity>().0;
    assert!(cached.is_some());
}

#[test]
fn apply_movement_is_camera_relative() {
    let mut world = World::new();
    world.insert_resource(Tunables { player_speed: 100.0, ..default() });
    world.insert_resource(super::PlayerInput(crate::combat::InputSample {
        movement: Vec2::new(1.0, 0.0),
        ..default()
    }));
    let tunables = world.resource::<Tunables>().clone();
    world.spawn((super::Player, PlayerRig::from_tunables(&tunables), LinearVelocity::ZERO));

    run_system_once(&mut world, super::apply_movement);

    let v = world.query::<&LinearVelocity>().single(&world).unwrap();
    assert!((v.0 - Vec3::new(100.0, 0.0, 0.0)).length() < 1e-3, "got {:?}", v.0);
}

#[test]
fn gather_input_without_devices_is_neutral() {
    let mut world = World::new();
    world.init_resource::<Tunables>();
    world.init_resource::<Time>();
    world.insert_resource(super::PlayerInput(crate::combat::InputSample::look(Vec2::ONE)));

    run_system_once(&mut world, super::gather_input);

    assert_eq!(world.resource::<super::PlayerInput>().0, crate::combat::InputSample::default());
}

#[test]
fn gather_input_reads_keyboard_triggers() {
    let mut world = World::new();
    world.init_resource::<Tunables>();
    world.init_resource::<Time>();
    world.init_resource::<super::PlayerInput>();

    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyW);
    keys.press(KeyCode::KeyD);
    keys.press(KeyCode::Tab);
    world.insert_resource(keys);

    run_system_once(&mut world, super::gather_input);

    let sample = world.resource::<super::PlayerInput>().0;
    assert!(sample.triggers.toggle_lock);
    assert!(!sample.triggers.jump);
    assert!((sample.movement.length() - 1.0).abs() < 1e-5, "diagonal is normalized");
}
