use avian3d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let unit = app.world().resource::<Tunables>().length_unit;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(unit));
    app.insert_resource(Gravity(Vec3::NEG_Y * 9.81));
}
