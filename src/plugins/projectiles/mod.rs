//! Projectiles plugin: a small fixed pool of throwing knives.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: player::drive_player                                        │
//!│      - reads: action key, Facing, player Transform                         │
//!│      - writes: ThrowKnifeRequest message                                   │
//!│                                                                            │
//!│  (B) Consumer: allocate_knives_from_pool                                   │
//!│      - reads: ThrowKnifeRequest messages                                   │
//!│      - mutates: KnifePool free list                                        │
//!│      - mutates: KnifeState, Transform, Velocity, Visibility, Layers        │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) Physics emits CollisionStart messages (Avian)                         │
//!│                                                                            │
//!│  (D) Resolve: process_knife_collisions                                     │
//!│      - knife vs wall   -> KnifeState::PendingReturn                        │
//!│      - knife vs lizard -> PendingReturn + lizard PendingDespawn            │
//!│                                                                            │
//!│  (E) Commit: return_knives_to_pool                                         │
//!│      - writes the Inactive invariants, pushes KnifeEntity to the pool      │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pool holds three knives. When all three are in flight a throw request is
//! dropped: that is the throw rate limit, not an error.

pub mod components;
pub mod pool;
pub mod collision;

pub mod messages;
pub mod request;
pub mod allocator;
pub mod commit;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::player;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app.world().resource::<Tunables>().knife_capacity;

        // Pool + pre-spawn
        app.insert_resource(pool::KnifePool::new(capacity))
            .add_systems(Startup, pool::init_knife_pool);

        app.add_message::<messages::ThrowKnifeRequest>();

        app.add_systems(
            Update,
            allocator::allocate_knives_from_pool
                .after(player::drive_player)
                .run_if(in_state(GameState::InGame)),
        );

        // Fixed collision pipeline
        app.add_systems(
            FixedPostUpdate,
            collision::process_knife_collisions
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            commit::return_knives_to_pool
                .after(collision::process_knife_collisions)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
