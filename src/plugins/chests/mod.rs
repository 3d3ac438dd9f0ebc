//! Chests: one-shot interactables placed from the map's `Chests` layer.
//!
//! A chest is opened by the player's action key while it is the player's
//! `ActiveChest` (see the scene contact handlers). The reward is paid exactly once.

use std::ops::RangeInclusive;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::world::DungeonMap;

const CHEST_SIZE: Vec2 = Vec2::new(16.0, 16.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChestState {
    #[default]
    Closed,
    Opened,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Chest {
    state: ChestState,
}

impl Chest {
    #[inline]
    pub fn state(&self) -> ChestState {
        self.state
    }

    /// Open the chest and return its coin reward.
    ///
    /// Closed -> Opened pays a uniform draw from `reward`; an opened chest pays 0.
    pub fn open<R: Rng + ?Sized>(&mut self, rng: &mut R, reward: RangeInclusive<u32>) -> u32 {
        if self.state == ChestState::Opened {
            return 0;
        }
        self.state = ChestState::Opened;
        rng.gen_range(reward)
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_chests)
        .add_systems(PostUpdate, sync_chest_sprites.run_if(in_state(GameState::InGame)));
}

#[inline]
pub fn chest_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Chest, [Layer::Player])
}

#[inline]
fn chest_color(state: ChestState) -> Color {
    match state {
        ChestState::Closed => Color::srgb(0.62, 0.42, 0.18),
        ChestState::Opened => Color::srgb(0.95, 0.80, 0.25),
    }
}

fn spawn_chests(mut commands: Commands, map: Res<DungeonMap>) {
    for (i, pos) in map.chests.iter().enumerate() {
        commands.spawn((
            Name::new(format!("Chest{i}")),
            Chest::default(),
            Sprite {
                color: chest_color(ChestState::Closed),
                custom_size: Some(CHEST_SIZE),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            RigidBody::Static,
            Collider::rectangle(CHEST_SIZE.x, CHEST_SIZE.y),
            chest_layers(),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

/// The open "animation": presentation follows `ChestState`.
fn sync_chest_sprites(mut q: Query<(&Chest, &mut Sprite), Changed<Chest>>) {
    for (chest, mut sprite) in &mut q {
        sprite.color = chest_color(chest.state);
    }
}

#[cfg(test)]
mod tests;
