//! Feature plugins.

use bevy::prelude::*;

pub mod core;
pub mod enemies;
pub mod lock_on;
pub mod physics;
pub mod player;
pub mod world;

// Render-only
pub mod camera;
pub mod lighting;
pub mod visuals;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    world::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    lock_on::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    visuals::plugin(app);
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
