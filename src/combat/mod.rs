//! Combat camera core: target lock-on and camera orientation.
//!
//! Nothing in here touches the ECS, physics or the renderer. The host supplies
//! capabilities (range query, projection, input) per tick and reads back a
//! target and a yaw/pitch pair.
//!
//! ```text
//!   InputSampler ──> CombatRig::tick
//!                      ├─ LockOnController ── TargetQuery + scorer (+ ScreenProjector)
//!                      │        │
//!                      │        v  LockOnSnapshot (read-only)
//!                      └─ OrbitController ──> CameraRotation
//! ```
//!
//! Bevy glue lives in `plugins::lock_on`; identities there are `Entity`.

pub mod capabilities;
pub mod input;
pub mod lock_on;
pub mod orbit;
pub mod rig;
pub mod scorer;

pub use capabilities::{
    CameraPose, CategoryFilter, InputSampler, PerspectiveProjector, ReferencePose, ScreenPoint,
    ScreenProjector, TargetQuery, Targetable,
};
pub use input::{InputSample, Triggers};
pub use lock_on::{
    LockMode, LockOnConfig, LockOnController, LockOnFrame, LockOnSnapshot, LockTransition,
    LockedTarget, ReleaseReason,
};
pub use orbit::{CameraRotation, OrbitConfig, OrbitController, OrbitState};
pub use rig::{CombatRig, RigFrame, RigOutput};
pub use scorer::{ScoreWeights, Scoring, SwitchView};
