//! Game composition root.
//!
//! - `configure_full`: DefaultPlugins (window/render) + every plugin.
//! - `configure_headless`: gameplay only, for integration tests.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, WindowResolution};

use crate::common::state::GameState;
use crate::plugins;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Combat Camera".into(),
            resolution: WindowResolution::new(1280, 720),
            ..default()
        }),
        // Mouse look needs the cursor captured.
        primary_cursor_options: Some(CursorOptions {
            visible: false,
            grab_mode: CursorGrabMode::Locked,
            ..default()
        }),
        ..default()
    }));

    app.init_state::<GameState>();
    plugins::register_all(app);
}

/// Headless configuration for integration tests.
///
/// No DefaultPlugins and no render-only plugins.
pub fn configure_headless(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
