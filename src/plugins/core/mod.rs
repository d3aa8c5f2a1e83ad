//! Core plugin: shared resources and global settings.

use crate::common::tunables::Tunables;
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)));
}
