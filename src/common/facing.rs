//! Cardinal facing shared by the player, lizards and thrown knives.
//!
//! World space is y-up: `Up` is `+Y`.

use bevy::prelude::*;
use rand::Rng;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Down, Facing::Left, Facing::Right];

    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::Y,
            Facing::Down => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }

    /// Direction token used in clip names (`faune-run-side`).
    #[inline]
    pub fn token(self) -> &'static str {
        match self {
            Facing::Up => "up",
            Facing::Down => "down",
            Facing::Left | Facing::Right => "side",
        }
    }

    /// Uniformly pick a facing other than `exclude`.
    pub fn random_except<R: Rng + ?Sized>(rng: &mut R, exclude: Facing) -> Facing {
        let others: Vec<Facing> = Self::ALL.into_iter().filter(|f| *f != exclude).collect();
        others[rng.gen_range(0..others.len())]
    }
}
