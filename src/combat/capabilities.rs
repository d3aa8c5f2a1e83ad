//! Capabilities the combat core borrows from its host.
//!
//! The core never talks to an engine directly. Each tick the host hands it:
//! - a [`TargetQuery`] (range query + identity lookup),
//! - a [`ScreenProjector`] (world to screen for switch scoring),
//! - an [`InputSampler`] (read exactly once per tick).
//!
//! Tests supply in-memory fakes; the Bevy glue supplies ECS/physics-backed ones.

use std::fmt::Debug;

use bevy::math::{Vec2, Vec3};

use super::input::InputSample;
use crate::common::angles;

/// Something that may be locked on to, as seen by the world this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Targetable<Id> {
    pub id: Id,
    /// World-space bounding center.
    pub center: Vec3,
}

/// Bitmask of collision categories a range query may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryFilter(pub u32);

impl CategoryFilter {
    pub const ALL: Self = Self(u32::MAX);

    #[inline]
    pub fn accepts(self, memberships: u32) -> bool {
        self.0 & memberships != 0
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::ALL
    }
}

/// The locking actor's pose, built fresh for each query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePose<Id> {
    /// The actor itself, never a valid target.
    pub actor: Option<Id>,
    pub origin: Vec3,
    pub forward: Vec3,
}

/// Where the render camera sits and where it looks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    #[inline]
    pub fn forward(&self) -> Vec3 {
        angles::forward(self.yaw, self.pitch)
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        angles::flat_right(self.yaw)
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }
}

/// A projected point. `position` is in pixels from the bottom-left corner
/// (y up, matching look input); negative `depth` is behind the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub position: Vec2,
    pub depth: f32,
}

/// Range query and identity lookup over the targetable entities of the world.
pub trait TargetQuery {
    type Id: Copy + Eq + Debug;

    /// Every targetable whose collider overlaps the sphere, in no particular order.
    fn query_in_radius(
        &self,
        origin: Vec3,
        radius: f32,
        filter: CategoryFilter,
    ) -> Vec<Targetable<Self::Id>>;

    /// Resolve an identity; `None` once the entity is gone or no longer targetable.
    fn locate(&self, id: Self::Id) -> Option<Targetable<Self::Id>>;
}

/// World-to-screen projection of the active camera.
pub trait ScreenProjector {
    /// `None` when the projection is undefined (point on the camera plane).
    fn project(&self, camera: &CameraPose, world: Vec3) -> Option<ScreenPoint>;

    fn screen_center(&self) -> Vec2;
}

/// Source of the per-tick input snapshot.
pub trait InputSampler {
    fn sample(&mut self) -> InputSample;
}

impl InputSampler for InputSample {
    fn sample(&mut self) -> InputSample {
        *self
    }
}

/// Pinhole projection with a vertical field of view, no roll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveProjector {
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

impl PerspectiveProjector {
    pub fn new(fov_y: f32, viewport: Vec2) -> Self {
        Self { fov_y, viewport }
    }
}

impl ScreenProjector for PerspectiveProjector {
    fn project(&self, camera: &CameraPose, world: Vec3) -> Option<ScreenPoint> {
        let rel = world - camera.position;
        let depth = rel.dot(camera.forward());
        if !depth.is_finite() || depth.abs() <= f32::EPSILON {
            return None;
        }

        let half_height = (self.fov_y.to_radians() * 0.5).tan();
        if !half_height.is_finite() || half_height <= 0.0 || self.viewport.min_element() <= 0.0 {
            return None;
        }
        let aspect = self.viewport.x / self.viewport.y;

        let ndc = Vec2::new(
            rel.dot(camera.right()) / (depth * half_height * aspect),
            rel.dot(camera.up()) / (depth * half_height),
        );
        let position = (ndc + Vec2::ONE) * 0.5 * self.viewport;
        position.is_finite().then_some(ScreenPoint { position, depth })
    }

    fn screen_center(&self) -> Vec2 {
        self.viewport * 0.5
    }
}
