//! Return commit: recycle knives back into the pool.
//!
//! This system owns the *Inactive invariants*. An inactive knife is:
//! - hidden
//! - at rest (velocity = 0)
//! - colliding with nothing (filters empty)

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{KnifeEntity, KnifeState, PooledKnife};
use super::pool::{inactive_knife_layers, KnifePool};

pub fn return_knives_to_pool(
    mut pool: ResMut<KnifePool>,
    mut q: Query<(
        Entity,
        &mut KnifeState,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<PooledKnife>>,
) {
    for (e, mut state, mut vis, mut vel, mut layers) in &mut q {
        if *state != KnifeState::PendingReturn { continue; }

        *state = KnifeState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_knife_layers();

        pool.push_free(KnifeEntity(e));
    }
}
