//! Library entry point.
//!
//! `combat` is the engine-free lock-on and camera core; `plugins` binds it to
//! Bevy. Integration tests in `tests/` import both through this crate.

pub mod combat;
pub mod common;
pub mod game;
pub mod plugins;
