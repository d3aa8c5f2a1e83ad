use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::test_utils::run_system_once;

#[test]
fn spawns_floor_and_walls_on_enter() {
    let mut world = World::new();
    run_system_once(&mut world, super::spawn_arena);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str().starts_with("Wall") && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 4);

    let floor = world
        .query::<(&Name, &super::ArenaBlock)>()
        .iter(&world)
        .find(|(n, _)| n.as_str() == "Floor")
        .map(|(_, block)| block.size)
        .expect("floor spawned");
    assert!(floor.x > 60.0 && floor.z > 60.0);
}
