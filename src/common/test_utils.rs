//! Test helpers for ECS systems.
//!
//! `World::run_system_once` runs a single system without a schedule. Anything the
//! system queued through `Commands` is only applied at a sync point, so the helper
//! flushes the world before handing control back to the assertions.

use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run `system` once against `world`, apply its deferred commands, return its output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}
