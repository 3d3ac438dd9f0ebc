//! Throw consumer: activate knives from the pool.
//!
//! An empty pool is the throttle: the request is dropped and nothing else happens.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::{KnifeEntity, KnifeState, PooledKnife};
use super::messages::ThrowKnifeRequest;
use super::pool::{active_knife_layers, KnifePool};

pub fn allocate_knives_from_pool(
    mut pool: ResMut<KnifePool>,
    mut reader: MessageReader<ThrowKnifeRequest>,
    mut q: Query<(
        &mut KnifeState,
        &mut Transform,
        &mut LinearVelocity,
        &mut Visibility,
        &mut CollisionLayers,
    ), With<PooledKnife>>,
) {
    for req in reader.read() {
        let Some(KnifeEntity(e)) = pool.pop_free() else {
            debug!("knife pool empty, throw dropped");
            continue;
        };

        let Ok((mut state, mut tf, mut vel, mut vis, mut layers)) = q.get_mut(e) else {
            warn!("knife pool handed out {e:?} which is not a pooled knife");
            continue;
        };

        *state = KnifeState::Active;
        tf.translation = req.pos.extend(2.0);
        tf.rotation = Quat::from_rotation_z(req.rotation);
        vel.0 = req.vel;
        *vis = Visibility::Visible;
        *layers = active_knife_layers();
    }
}
