//! Player health state machine.
//!
//! ```text
//!   Idle --hit (hp > 0 after)--> Damage --window elapsed--> Idle
//!     \                            |
//!      \--hit (hp <= 0 after)--> Dead <--hit (hp <= 0 after)
//! ```
//!
//! Hits landing in `Damage` (the invulnerability window) or `Dead` are ignored.
//! `Dead` is terminal.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthState {
    #[default]
    Idle,
    Damage,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored,
    Hurt,
    Killed,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    hp: i32,
    state: HealthState,
    damage_time: Duration,
    window: Duration,
}

impl PlayerHealth {
    pub fn new(max_hp: i32, window: Duration) -> Self {
        Self {
            hp: max_hp,
            state: HealthState::Idle,
            damage_time: Duration::ZERO,
            window,
        }
    }

    #[inline]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[inline]
    pub fn state(&self) -> HealthState {
        self.state
    }

    /// Movement and attacks are only read while idle.
    #[inline]
    pub fn accepts_input(&self) -> bool {
        self.state == HealthState::Idle
    }

    pub fn apply_damage(&mut self) -> DamageOutcome {
        if self.hp <= 0 || self.state == HealthState::Damage {
            return DamageOutcome::Ignored;
        }

        self.hp -= 1;

        if self.hp <= 0 {
            self.state = HealthState::Dead;
            DamageOutcome::Killed
        } else {
            self.state = HealthState::Damage;
            self.damage_time = Duration::ZERO;
            DamageOutcome::Hurt
        }
    }

    /// Advance the invulnerability window. Returns `true` on the frame it ends.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if self.state != HealthState::Damage {
            return false;
        }

        self.damage_time += dt;
        if self.damage_time >= self.window {
            self.state = HealthState::Idle;
            self.damage_time = Duration::ZERO;
            return true;
        }
        false
    }
}
