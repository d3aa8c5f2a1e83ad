//! Collision layers.
//!
//! These double as lock-on categories: the range query only reports colliders
//! whose membership intersects `LockOnConfig::category`.

use avian3d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
}
