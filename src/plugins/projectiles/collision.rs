//! Knife collision rules.
//!
//! - knife vs wall: the knife goes back to the pool.
//! - knife vs lizard: the knife goes back to the pool and the lizard is slain.
//!   Both happen in the same system run; the lizard stops interacting and
//!   disappears immediately, and its entity is despawned in `PostUpdate`.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::{is_in_layer, Layer};
use crate::plugins::enemies::{non_interacting_lizard_layers, Lizard, PendingDespawn};

use super::components::{KnifeState, PooledKnife};

#[derive(Clone, Copy, Debug)]
pub(crate) struct CollisionTarget {
    pub collider: Entity,
    pub body: Option<Entity>,
}

impl CollisionTarget {
    /// Entity carrying the gameplay components (the body when the collider is a child).
    #[inline]
    pub fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
pub(crate) fn targets(collider1: Entity, collider2: Entity, body1: Option<Entity>, body2: Option<Entity>) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget { collider: collider1, body: body1 },
        CollisionTarget { collider: collider2, body: body2 },
    )
}

pub fn process_knife_collisions(
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    q_is_knife: Query<(), With<PooledKnife>>,
    mut q_knives: Query<&mut KnifeState, With<PooledKnife>>,
    // Non-lizard layers (walls). Disjoint from `q_lizards` by the Lizard filter.
    q_layers: Query<&CollisionLayers, Without<Lizard>>,
    mut q_lizards: Query<
        (&mut CollisionLayers, &mut LinearVelocity, &mut Visibility),
        (With<Lizard>, Without<PendingDespawn>, Without<PooledKnife>),
    >,
    // Lizards slain during this run; a second knife passes through them.
    mut slain: Local<HashSet<Entity>>,
) {
    slain.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev.collider1, ev.collider2, ev.body1, ev.body2);

        let k1 = q_is_knife.contains(t1.collider);
        let k2 = q_is_knife.contains(t2.collider);
        if !(k1 ^ k2) {
            continue; // must be exactly one knife
        }
        let (knife_side, other_side) = if k1 { (t1, t2) } else { (t2, t1) };

        let Ok(mut state) = q_knives.get_mut(knife_side.collider) else {
            continue;
        };
        // A knife that already hit something this step is no longer Active.
        if *state != KnifeState::Active {
            continue;
        }

        // LIZARD: slay it and recycle the knife.
        let lizard = other_side.gameplay_owner();
        if !slain.contains(&lizard) {
            if let Ok((mut layers, mut vel, mut vis)) = q_lizards.get_mut(lizard) {
                *state = KnifeState::PendingReturn;

                *layers = non_interacting_lizard_layers();
                vel.0 = Vec2::ZERO;
                *vis = Visibility::Hidden;
                commands.entity(lizard).insert(PendingDespawn);
                slain.insert(lizard);

                info!("lizard {lizard:?} slain by knife {:?}", knife_side.collider);
                continue;
            }
        }

        // WALL: recycle the knife.
        let Ok(other_layers) = q_layers.get(other_side.collider) else {
            continue;
        };
        if is_in_layer(other_layers, Layer::World) {
            *state = KnifeState::PendingReturn;
        }
    }
}
