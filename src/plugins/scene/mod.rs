//! Scene orchestration.
//!
//! The world itself is built by the feature plugins on `OnEnter(InGame)`. This plugin
//! owns what ties them together:
//! - the hit-stop counter, advanced every frame and gating the player drive system;
//! - player contact tracking and the player↔chest / player↔lizard handlers.
//!
//! ```text
//! Update:          advance_hit_stop -> player::drive_player (if not frozen)
//! FixedPostUpdate: CollisionEventSystems -> track_player_contacts
//!                    -> resolve_chest_contacts
//!                    -> apply_lizard_contacts (after knife collisions)
//! ```
//!
//! Walls need no handler: player and lizard bodies are simply blocked by them.

pub mod contacts;
pub mod hit_stop;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::player;
use crate::plugins::projectiles::collision::process_knife_collisions;

pub use contacts::{PlayerContacts, PlayerLizardPair};
pub use hit_stop::{player_not_frozen, HitStop};

pub fn plugin(app: &mut App) {
    let frames = app.world().resource::<Tunables>().hit_stop_frames;

    app.insert_resource(HitStop::new(frames))
        .init_resource::<PlayerContacts>()
        .init_resource::<PlayerLizardPair>()
        .add_systems(OnEnter(GameState::InGame), reset_scene)
        .add_systems(
            Update,
            hit_stop::advance_hit_stop
                .before(player::drive_player)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            (
                contacts::track_player_contacts,
                contacts::resolve_chest_contacts,
                contacts::apply_lizard_contacts.after(process_knife_collisions),
            )
                .chain()
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

fn reset_scene(
    tunables: Res<Tunables>,
    mut hit_stop: ResMut<HitStop>,
    mut contacts: ResMut<PlayerContacts>,
    mut pair: ResMut<PlayerLizardPair>,
) {
    *hit_stop = HitStop::new(tunables.hit_stop_frames);
    contacts.clear();
    *pair = PlayerLizardPair::default();
}

#[cfg(test)]
mod tests;
