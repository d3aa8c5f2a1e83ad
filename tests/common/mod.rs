//! Integration test harness.
//!
//! Headless apps only:
//! - `MinimalPlugins` provides the ECS runtime and time.
//! - `combat_camera::game::configure_headless` installs the gameplay plugins.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use combat_camera::common::state::GameState;

#[allow(dead_code)]
pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists for physics.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    // avian's collider cache reads `AssetEvent<Mesh>`.
    app.init_asset::<Mesh>();

    combat_camera::game::configure_headless(&mut app);
    // `App::run` would do this; plugins (e.g. avian) finish setup here.
    app.finish();
    app.cleanup();
    app
}

/// Headless app with a fixed 1/60 s frame, already in `InGame`.
#[allow(dead_code)]
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(1.0 / 60.0)));
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    app.update();
    app
}

/// Tiny deterministic PRNG (xorshift64*), no property-testing crate needed.
#[allow(dead_code)]
#[derive(Clone, Copy)]
pub struct TestRng(u64);

#[allow(dead_code)]
impl TestRng {
    pub fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        let v = (self.next_u64() >> 40) as u32;
        v as f32 / (1u32 << 24) as f32
    }

    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}
