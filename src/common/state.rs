//! Global state machine.

use bevy::prelude::*;

/// Top-level game state. Arena content is scoped to `InGame`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
