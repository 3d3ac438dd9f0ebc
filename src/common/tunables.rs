//! Tunable gameplay constants.
//!
//! Distances and speeds are in world pixels (the map uses 16 px tiles).

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,

    pub player_speed: f32,
    pub player_max_health: i32,
    /// Speed of the impulse pushing the player away from a lizard.
    pub knockback_speed: f32,
    /// Invulnerability window after a non-lethal hit.
    pub damage_window: Duration,
    /// Phaser-style body offsets for the flipped / unflipped sprite.
    pub hitbox_offset_left: f32,
    pub hitbox_offset_right: f32,

    pub knife_speed: f32,
    pub knife_spawn_offset: f32,
    pub knife_capacity: usize,

    pub lizard_speed: f32,
    pub lizard_turn_secs: f32,

    pub chest_reward_min: u32,
    pub chest_reward_max: u32,

    /// Frames the player stays frozen after taking a hit.
    pub hit_stop_frames: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 16.0,
            player_speed: 100.0,
            player_max_health: 3,
            knockback_speed: 200.0,
            damage_window: Duration::from_millis(250),
            hitbox_offset_left: 24.0,
            hitbox_offset_right: 8.0,
            knife_speed: 300.0,
            knife_spawn_offset: 16.0,
            knife_capacity: 3,
            lizard_speed: 50.0,
            lizard_turn_secs: 2.0,
            chest_reward_min: 1000,
            chest_reward_max: 1200,
            hit_stop_frames: 10,
        }
    }
}

impl Tunables {
    #[inline]
    pub fn chest_reward(&self) -> std::ops::RangeInclusive<u32> {
        self.chest_reward_min..=self.chest_reward_max
    }
}
