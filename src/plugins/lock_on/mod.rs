//! Lock-on plugin: binds the combat core to the ECS.
//!
//! # Data flow
//! ```text
//!   Update
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │ (A) player::gather_input   devices -> PlayerInput                    │
//!   │ (B) drive_rig              PlayerInput + ArenaTargets + MainCamera    │
//!   │                              -> PlayerRig::tick                       │
//!   │                              -> LockOnStatus (published snapshot)     │
//!   └──────────────────────────────────────────────────────────────────────┘
//!   PostUpdate (render only)
//!     camera::follow_rig reads PlayerRig rotation and places the camera
//! ```
//!
//! Identities are `Entity`. A despawned enemy simply stops resolving through
//! the `Lockable` query, which the core treats as a lost target on its next tick.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::combat::{
    CameraPose, CameraRotation, CategoryFilter, CombatRig, InputSampler, LockedTarget,
    PerspectiveProjector, RigFrame, ScreenPoint, ScreenProjector, TargetQuery, Targetable,
};
use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::camera::MainCamera;
use crate::plugins::player::{Player, PlayerInput, gather_input};

/// Viewport used when there is neither a rendered camera nor a window (headless runs).
pub const FALLBACK_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Marks an entity the player may lock on to.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Lockable {
    /// Offset from the entity origin to its bounding center.
    pub center_offset: Vec3,
}

/// Per-character combat camera state, owned by the character entity.
#[derive(Component, Debug, Clone, Deref, DerefMut)]
pub struct PlayerRig(pub CombatRig<Entity>);

impl PlayerRig {
    pub fn from_tunables(tunables: &Tunables) -> Self {
        Self(CombatRig::new(tunables.lock_on, tunables.orbit))
    }
}

/// What the rest of the game may read about the lock each frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LockOnStatus {
    pub target: Option<LockedTarget<Entity>>,
    pub rotation: CameraRotation,
}

impl LockOnStatus {
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.target.is_some()
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        drive_rig
            .after(gather_input)
            .run_if(in_state(GameState::InGame)),
    );
}

/// `TargetQuery` over the ECS.
///
/// `overlap` returns collider entities touching a sphere; in the game it is an
/// avian shape query. Only entities that still carry `Lockable` survive.
pub struct ArenaTargets<'a, 'w, 's, F> {
    overlap: F,
    lockables: &'a Query<'w, 's, (&'static GlobalTransform, &'static Lockable)>,
}

impl<'a, 'w, 's, F> ArenaTargets<'a, 'w, 's, F>
where
    F: Fn(Vec3, f32, CategoryFilter) -> Vec<Entity>,
{
    pub fn new(
        overlap: F,
        lockables: &'a Query<'w, 's, (&'static GlobalTransform, &'static Lockable)>,
    ) -> Self {
        Self { overlap, lockables }
    }
}

impl<F> TargetQuery for ArenaTargets<'_, '_, '_, F>
where
    F: Fn(Vec3, f32, CategoryFilter) -> Vec<Entity>,
{
    type Id = Entity;

    fn query_in_radius(
        &self,
        origin: Vec3,
        radius: f32,
        filter: CategoryFilter,
    ) -> Vec<Targetable<Entity>> {
        let mut hits = (self.overlap)(origin, radius, filter);
        // A compound body may report the same entity more than once.
        hits.sort_unstable();
        hits.dedup();
        hits.into_iter().filter_map(|e| self.locate(e)).collect()
    }

    fn locate(&self, id: Entity) -> Option<Targetable<Entity>> {
        let (tf, lockable) = self.lockables.get(id).ok()?;
        Some(Targetable { id, center: tf.translation() + lockable.center_offset })
    }
}

/// Projection through the rendered camera.
///
/// The camera eases toward the boom pose, so while it lags the screen the
/// player sees differs from the pose the rig would compute. Switch gestures
/// refer to what is on screen, so this ignores the pose it is handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraProjector {
    clip_from_world: Mat4,
    position: Vec3,
    forward: Vec3,
    viewport: Vec2,
}

impl CameraProjector {
    pub fn new(clip_from_view: Mat4, transform: &GlobalTransform, viewport: Vec2) -> Self {
        Self {
            clip_from_world: clip_from_view * Mat4::from(transform.affine().inverse()),
            position: transform.translation(),
            forward: *transform.forward(),
            viewport,
        }
    }

    /// `None` until the camera has a computed viewport.
    pub fn from_camera(camera: &Camera, transform: &GlobalTransform) -> Option<Self> {
        let viewport = camera.logical_viewport_size()?;
        Some(Self::new(camera.clip_from_view(), transform, viewport))
    }
}

impl ScreenProjector for CameraProjector {
    fn project(&self, _: &CameraPose, world: Vec3) -> Option<ScreenPoint> {
        let depth = (world - self.position).dot(self.forward);
        if !depth.is_finite() || depth.abs() <= f32::EPSILON {
            return None;
        }
        let ndc = self.clip_from_world.project_point3(world);
        // Bevy viewports grow downward from the top-left; NDC y is already up.
        let position = (ndc.truncate() + Vec2::ONE) * 0.5 * self.viewport;
        position.is_finite().then_some(ScreenPoint { position, depth })
    }

    fn screen_center(&self) -> Vec2 {
        self.viewport * 0.5
    }
}

/// The rendered camera when there is one, a pinhole at the boom pose otherwise.
#[derive(Debug, Clone, Copy)]
pub enum ActiveProjector {
    Camera(CameraProjector),
    Fallback(PerspectiveProjector),
}

impl ScreenProjector for ActiveProjector {
    fn project(&self, pose: &CameraPose, world: Vec3) -> Option<ScreenPoint> {
        match self {
            Self::Camera(p) => p.project(pose, world),
            Self::Fallback(p) => p.project(pose, world),
        }
    }

    fn screen_center(&self) -> Vec2 {
        match self {
            Self::Camera(p) => p.screen_center(),
            Self::Fallback(p) => p.screen_center(),
        }
    }
}

/// Run one rig tick for one character and publish the result.
pub fn tick_character<S, Q, P>(
    rig: &mut PlayerRig,
    status: &mut LockOnStatus,
    frame: &RigFrame<Entity>,
    input: &mut S,
    targets: &Q,
    projector: &P,
) where
    S: InputSampler,
    Q: TargetQuery<Id = Entity>,
    P: ScreenProjector,
{
    let out = rig.tick(frame, input, targets, projector);
    *status = LockOnStatus { target: out.lock.target, rotation: out.rotation };
}

pub fn drive_rig(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    spatial: SpatialQuery,
    lockables: Query<(&'static GlobalTransform, &'static Lockable)>,
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut q_player: Query<
        (Entity, &GlobalTransform, &mut PlayerRig, &mut LockOnStatus),
        With<Player>,
    >,
) {
    let Ok((actor, tf_player, mut rig, mut status)) = q_player.single_mut() else {
        return;
    };

    let projector = match cameras
        .single()
        .ok()
        .and_then(|(camera, tf_cam)| CameraProjector::from_camera(camera, tf_cam))
    {
        Some(camera) => ActiveProjector::Camera(camera),
        None => {
            let viewport = match windows.single() {
                Ok(window) => Vec2::new(window.width(), window.height()),
                Err(e) => {
                    debug!("No single Window, projecting with fallback viewport: {e:?}");
                    FALLBACK_VIEWPORT
                }
            };
            ActiveProjector::Fallback(PerspectiveProjector::new(tunables.field_of_view, viewport))
        }
    };

    let targets = ArenaTargets::new(
        |origin: Vec3, radius: f32, filter: CategoryFilter| {
            spatial.shape_intersections(
                &Collider::sphere(radius),
                origin,
                Quat::IDENTITY,
                &SpatialQueryFilter::from_mask(LayerMask(filter.0)),
            )
        },
        &lockables,
    );

    let position = tf_player.translation();
    let frame = RigFrame {
        now: time.elapsed_secs(),
        dt: time.delta_secs(),
        actor: Some(actor),
        actor_position: position,
        pivot: position + Vec3::Y * tunables.pivot_height,
    };

    tick_character(&mut rig, &mut status, &frame, &mut *input, &targets, &projector);
}
