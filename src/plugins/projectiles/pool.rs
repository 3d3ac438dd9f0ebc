use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

use super::components::{KnifeEntity, KnifeState, PooledKnife};

const KNIFE_SIZE: Vec2 = Vec2::new(12.0, 4.0);

#[derive(Resource, Debug)]
pub struct KnifePool {
    free: Vec<KnifeEntity>,
    capacity: usize,
}

impl KnifePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Knives currently out of the pool.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.capacity - self.free.len()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<KnifeEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, knife: KnifeEntity) {
        debug_assert!(self.free.len() < self.capacity, "knife returned to a full pool");
        self.free.push(knife);
    }
}

#[inline]
pub fn active_knife_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerKnife, [Layer::World, Layer::Enemy])
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_knife_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::PlayerKnife, [] as [Layer; 0])
}

/// Pre-spawn pooled knives (inactive).
///
/// Physics components stay on the entity for its whole life; inactive knives
/// never collide because their filters are empty.
pub fn init_knife_pool(mut commands: Commands, mut pool: ResMut<KnifePool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    for i in 0..cap {
        let e = commands
            .spawn((
                Name::new(format!("Knife{i}(Pooled)")),
                PooledKnife,
                KnifeState::Inactive,
                Sprite {
                    color: Color::srgb(0.82, 0.84, 0.90),
                    custom_size: Some(KNIFE_SIZE),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::rectangle(KNIFE_SIZE.x, KNIFE_SIZE.y),
                LockedAxes::ROTATION_LOCKED,
                inactive_knife_layers(),
                LinearVelocity(Vec2::ZERO),
                CollisionEventsEnabled,
            ))
            .id();

        pool.free.push(KnifeEntity(e));
    }
}
