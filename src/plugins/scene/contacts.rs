//! Player contact handlers.
//!
//! Avian reports a contact once when it starts and once when it ends. The player
//! handlers need "every step while touching", so `track_player_contacts` keeps the
//! set of chests and lizards currently touching the player, and the handlers run
//! against that set each fixed step.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::chests::Chest;
use crate::plugins::enemies::{Lizard, PendingDespawn};
use crate::plugins::notices::PlayerHealthChanged;
use crate::plugins::player::{
    fainted_player_layers, ActiveChest, DamageOutcome, Player, PlayerClip, PlayerHealth, PlayerHitbox,
};
use crate::plugins::projectiles::collision::{targets, CollisionTarget};

use super::hit_stop::HitStop;

/// Chests and lizards currently overlapping the player, in contact order.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlayerContacts {
    pub chests: Vec<Entity>,
    pub lizards: Vec<Entity>,
}

impl PlayerContacts {
    pub fn clear(&mut self) {
        self.chests.clear();
        self.lizards.clear();
    }
}

/// Whether lizards still hurt the player. Switched off for good when the player faints.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerLizardPair {
    pub active: bool,
}

impl Default for PlayerLizardPair {
    fn default() -> Self {
        Self { active: true }
    }
}

fn add_unique(list: &mut Vec<Entity>, e: Entity) {
    if !list.contains(&e) {
        list.push(e);
    }
}

/// Split a contact into (player side, other side), if the player is involved.
fn player_pair(
    t1: CollisionTarget,
    t2: CollisionTarget,
    q_player_parts: &Query<(), Or<(With<Player>, With<PlayerHitbox>)>>,
) -> Option<Entity> {
    if q_player_parts.contains(t1.collider) {
        Some(t2.gameplay_owner())
    } else if q_player_parts.contains(t2.collider) {
        Some(t1.gameplay_owner())
    } else {
        None
    }
}

pub(super) fn track_player_contacts(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    mut contacts: ResMut<PlayerContacts>,
    q_player_parts: Query<(), Or<(With<Player>, With<PlayerHitbox>)>>,
    q_chests: Query<(), With<Chest>>,
    q_lizards: Query<(), With<Lizard>>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev.collider1, ev.collider2, ev.body1, ev.body2);
        let Some(other) = player_pair(t1, t2, &q_player_parts) else {
            continue;
        };

        if q_chests.contains(other) {
            add_unique(&mut contacts.chests, other);
        } else if q_lizards.contains(other) {
            add_unique(&mut contacts.lizards, other);
        }
    }

    for ev in ended.read() {
        let (t1, t2) = targets(ev.collider1, ev.collider2, ev.body1, ev.body2);
        let Some(other) = player_pair(t1, t2, &q_player_parts) else {
            continue;
        };

        contacts.chests.retain(|e| *e != other);
        contacts.lizards.retain(|e| *e != other);
    }
}

/// Touching a chest makes it the player's active chest.
pub(super) fn resolve_chest_contacts(
    mut contacts: ResMut<PlayerContacts>,
    q_chests: Query<(), With<Chest>>,
    mut q_player: Query<&mut ActiveChest, With<Player>>,
) {
    contacts.chests.retain(|e| q_chests.contains(*e));
    let Some(&chest) = contacts.chests.last() else {
        return;
    };
    let Ok(mut active) = q_player.single_mut() else {
        return;
    };
    if active.0 != Some(chest) {
        active.0 = Some(chest);
    }
}

/// Touching a live lizard hurts the player.
///
/// Hurt: knockback away from the lizard and a hit-stop.
/// Killed: the player stops, faints, and lizards stop interacting with it.
pub(super) fn apply_lizard_contacts(
    tunables: Res<Tunables>,
    mut contacts: ResMut<PlayerContacts>,
    mut pair: ResMut<PlayerLizardPair>,
    mut hit_stop: ResMut<HitStop>,
    mut q_player: Query<(&Transform, &mut PlayerHealth, &mut LinearVelocity, &mut PlayerClip), With<Player>>,
    q_lizards: Query<&Transform, (With<Lizard>, Without<PendingDespawn>, Without<Player>)>,
    mut q_hitbox: Query<&mut CollisionLayers, With<PlayerHitbox>>,
    mut health_changed: MessageWriter<PlayerHealthChanged>,
) {
    if !pair.active {
        contacts.lizards.clear();
        return;
    }

    contacts.lizards.retain(|e| q_lizards.contains(*e));
    let Some(&lizard) = contacts.lizards.first() else {
        return;
    };
    let Ok(lizard_tf) = q_lizards.get(lizard) else {
        return;
    };
    let Ok((tf, mut health, mut vel, mut clip)) = q_player.single_mut() else {
        return;
    };

    match health.apply_damage() {
        DamageOutcome::Ignored => {}
        DamageOutcome::Hurt => {
            let away = (tf.translation.truncate() - lizard_tf.translation.truncate()).normalize_or_zero();
            vel.0 = away * tunables.knockback_speed;
            hit_stop.trigger();
            health_changed.write(PlayerHealthChanged { health: health.hp() });
        }
        DamageOutcome::Killed => {
            vel.0 = Vec2::ZERO;
            *clip = PlayerClip::Faint;
            health_changed.write(PlayerHealthChanged { health: health.hp() });

            pair.active = false;
            for mut layers in &mut q_hitbox {
                *layers = fainted_player_layers();
            }
            contacts.lizards.clear();

            info!("player fainted");
        }
    }
}
