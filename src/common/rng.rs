//! Seedable RNG resource.
//!
//! The app seeds from entropy; tests seed with a fixed value so rewards and wander
//! directions are reproducible.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Deref, DerefMut)]
pub struct GameRng(pub ChaCha8Rng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }
}
