//! Outbound player notices.
//!
//! These replace a global event bus: gameplay systems write messages, whatever UI is
//! present reads them during the same frame. Nothing is retained for late readers.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerHealthChanged {
    pub health: i32,
}

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerCoinsChanged {
    pub coins: u32,
}

pub fn plugin(app: &mut App) {
    app.add_message::<PlayerHealthChanged>()
        .add_message::<PlayerCoinsChanged>()
        .add_systems(PostUpdate, log_notices);
}

fn log_notices(
    mut health: MessageReader<PlayerHealthChanged>,
    mut coins: MessageReader<PlayerCoinsChanged>,
) {
    for ev in health.read() {
        info!("player health changed: {}", ev.health);
    }
    for ev in coins.read() {
        info!("player coins changed: {}", ev.coins);
    }
}
