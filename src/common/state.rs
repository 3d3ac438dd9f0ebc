//! Global state machine.
//!
//! The dungeon scene lives entirely inside `InGame`; scene entities are tagged with
//! `DespawnOnExit(GameState::InGame)`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
