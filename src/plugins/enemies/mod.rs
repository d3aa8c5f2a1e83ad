//! Enemies plugin: lockable targets with a small health and death lifecycle.
//!
//! ```text
//! OnEnter(InGame): spawn a ring of enemies + one boss, all `Lockable`
//! Update:          enemy_death_trigger -> enemy_death_progress (after drive_rig)
//! PostUpdate:      despawn_marked_enemies
//! ```
//!
//! Damage is written into `Health` by the action layer, which lives outside
//! this crate. A dying enemy loses `Lockable` immediately. The rig sees that as
//! a lost target on its next tick and releases; it never has to know about health.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::lock_on::{Lockable, drive_rig};

const RING_RADIUS: f32 = 10.0;
const RING_SIZE: usize = 4;
const DYING_SECS: f32 = 0.35;

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy;

#[derive(Component, Debug, Clone, Copy)]
pub struct Boss;

/// Capsule dimensions, kept so visuals can build a matching mesh.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyBody {
    pub radius: f32,
    pub length: f32,
}

impl EnemyBody {
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.radius + self.length * 0.5
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub hp: i32,
}

/// Alive -> Dying (short shrink) -> Dead.
#[derive(Component, Debug, Clone)]
pub enum EnemyLifeState {
    Alive,
    Dying { timer: Timer },
    Dead,
}

/// Marker: remove this enemy in PostUpdate.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_enemies);

    app.add_systems(
        Update,
        (enemy_death_trigger, enemy_death_progress)
            .chain()
            .after(drive_rig)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_marked_enemies.run_if(in_state(GameState::InGame)),
    );
}

fn spawn_enemies(mut commands: Commands) {
    let layers = CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player]);

    let grunt = EnemyBody { radius: 0.5, length: 1.0 };
    for i in 0..RING_SIZE {
        let angle = (45.0 + 90.0 * i as f32).to_radians();
        let at = Vec3::new(
            angle.sin() * RING_RADIUS,
            grunt.half_height(),
            -angle.cos() * RING_RADIUS,
        );
        commands.spawn((
            Name::new(format!("Enemy{i}")),
            Enemy,
            grunt,
            Health { hp: 3 },
            EnemyLifeState::Alive,
            Lockable::default(),
            Transform::from_translation(at),
            RigidBody::Static,
            Collider::capsule(grunt.radius, grunt.length),
            layers,
            DespawnOnExit(GameState::InGame),
        ));
    }

    let boss = EnemyBody { radius: 1.2, length: 2.0 };
    commands.spawn((
        Name::new("Boss"),
        Enemy,
        Boss,
        boss,
        Health { hp: 10 },
        EnemyLifeState::Alive,
        // Aim at the chest rather than the capsule middle.
        Lockable { center_offset: Vec3::Y * boss.length * 0.25 },
        Transform::from_xyz(0.0, boss.half_height(), -18.0),
        RigidBody::Static,
        Collider::capsule(boss.radius, boss.length),
        layers,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Alive -> Dying once HP reaches 0. Drops `Lockable` and collision filters.
fn enemy_death_trigger(
    mut commands: Commands,
    mut q: Query<(Entity, &Health, &mut EnemyLifeState, &mut CollisionLayers), With<Enemy>>,
) {
    for (e, hp, mut life, mut layers) in &mut q {
        if !matches!(*life, EnemyLifeState::Alive) || hp.hp > 0 {
            continue;
        }
        *life = EnemyLifeState::Dying {
            timer: Timer::from_seconds(DYING_SECS, TimerMode::Once),
        };
        *layers = CollisionLayers::new(Layer::Enemy, [] as [Layer; 0]);
        commands.entity(e).remove::<Lockable>();
        info!("Enemy {e:?} died");
    }
}

fn enemy_death_progress(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut EnemyLifeState, &mut Transform), (With<Enemy>, Without<PendingDespawn>)>,
) {
    for (e, mut life, mut tf) in &mut q {
        let EnemyLifeState::Dying { timer } = &mut *life else {
            continue;
        };
        timer.tick(time.delta());
        tf.scale = Vec3::splat(1.0 - timer.fraction());

        if timer.is_finished() {
            *life = EnemyLifeState::Dead;
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
