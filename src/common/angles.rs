//! Angle and direction helpers shared by targeting and the orbit camera.
//!
//! Conventions (all angles in degrees):
//! - yaw turns clockwise seen from above; yaw 0 faces -Z, yaw 90 faces +X
//! - positive pitch looks down, so pushing the look input up lowers pitch
//!
//! ```text
//!            -Z (yaw 0)
//!               ^
//!               |
//!  (yaw 270) ---+---> +X (yaw 90)
//!               |
//!            +Z (yaw 180)
//! ```
//!
//! Every yaw that leaves this module is in `[0, 360)` and every delta is the
//! shortest signed distance in `(-180, 180]`. A plain subtraction is never
//! used to compare yaws.

use bevy::math::{EulerRot, Quat, Vec2, Vec3};

/// Below this length a direction is considered undefined.
pub const DIRECTION_EPSILON: f32 = 1e-6;

/// Wrap any finite angle into `[0, 360)`.
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest signed distance from `current` to `target`, in `(-180, 180]`.
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta >= 360.0 {
        delta = 0.0;
    }
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Interpolate along the shortest arc. `t` is clamped to `[0, 1]`.
#[inline]
pub fn lerp_angle(current: f32, target: f32, t: f32) -> f32 {
    current + delta_angle(current, target) * t.clamp(0.0, 1.0)
}

/// Frame-rate independent smoothing factor for a responsiveness `rate` (1/s).
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate.max(0.0) * dt.max(0.0)).exp()
}

/// Unit view direction for a yaw/pitch pair.
pub fn forward(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.to_radians().sin_cos();
    let (sp, cp) = pitch.to_radians().sin_cos();
    Vec3::new(sy * cp, -sp, -cy * cp)
}

/// Horizontal facing for a yaw, ignoring pitch.
pub fn flat_forward(yaw: f32) -> Vec3 {
    forward(yaw, 0.0)
}

/// Horizontal right-hand vector for a yaw. Cameras here never roll.
pub fn flat_right(yaw: f32) -> Vec3 {
    let (sy, cy) = yaw.to_radians().sin_cos();
    Vec3::new(cy, 0.0, sy)
}

/// Yaw/pitch that would face along `dir`.
///
/// Returns `None` when the horizontal part of `dir` is too short to define a
/// yaw (zero vector, straight up or down) or when `dir` is not finite.
pub fn look_angles(dir: Vec3) -> Option<(f32, f32)> {
    if !dir.is_finite() {
        return None;
    }
    let horizontal = Vec2::new(dir.x, dir.z).length();
    if horizontal <= DIRECTION_EPSILON {
        return None;
    }
    let yaw = wrap_degrees(dir.x.atan2(-dir.z).to_degrees());
    let pitch = (-dir.y).atan2(horizontal).to_degrees();
    Some((yaw, pitch))
}

/// Unsigned angle between two directions in `[0, 180]`, `None` if either is degenerate.
pub fn angle_between(a: Vec3, b: Vec3) -> Option<f32> {
    if a.length_squared() <= DIRECTION_EPSILON || b.length_squared() <= DIRECTION_EPSILON {
        return None;
    }
    let cos = a.normalize().dot(b.normalize()).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    angle.is_finite().then_some(angle)
}

/// World rotation for a camera looking along `forward(yaw, pitch)`.
pub fn rotation(yaw: f32, pitch: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        -yaw.to_radians(),
        -pitch.to_radians(),
        0.0,
    )
}
