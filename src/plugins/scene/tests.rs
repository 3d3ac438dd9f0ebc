//! Scene tests. Contacts are injected as `CollisionStart` / `CollisionEnd` messages.

use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::contacts::{apply_lizard_contacts, resolve_chest_contacts, track_player_contacts};
use super::*;
use crate::common::facing::Facing;
use crate::common::layers::Layer;
use crate::common::test_utils::{ensure_messages, read_messages, run_system_once};
use crate::plugins::chests::Chest;
use crate::plugins::enemies::{lizard_layers, Lizard, PendingDespawn};
use crate::plugins::notices::PlayerHealthChanged;
use crate::plugins::player::{
    player_layers, ActiveChest, HealthState, Player, PlayerClip, PlayerHealth, PlayerHitbox,
};

struct Rig {
    world: World,
    player: Entity,
    hitbox: Entity,
}

fn rig(player_pos: Vec2) -> Rig {
    let mut world = World::new();
    let tunables = Tunables::default();
    world.insert_resource(HitStop::new(tunables.hit_stop_frames));
    world.insert_resource(tunables.clone());
    world.init_resource::<PlayerContacts>();
    world.init_resource::<PlayerLizardPair>();
    ensure_messages::<CollisionStart>(&mut world);
    ensure_messages::<CollisionEnd>(&mut world);
    ensure_messages::<PlayerHealthChanged>(&mut world);

    let player = world
        .spawn((
            Player,
            PlayerHealth::new(tunables.player_max_health, tunables.damage_window),
            PlayerClip::Idle(Facing::Down),
            ActiveChest::default(),
            Transform::from_translation(player_pos.extend(0.0)),
            LinearVelocity::ZERO,
        ))
        .id();
    let hitbox = world
        .spawn((PlayerHitbox, ChildOf(player), player_layers()))
        .id();

    Rig { world, player, hitbox }
}

impl Rig {
    fn touch(&mut self, other: Entity) {
        let (hitbox, player) = (self.hitbox, self.player);
        self.world.write_message(CollisionStart {
            collider1: hitbox,
            collider2: other,
            body1: Some(player),
            body2: Some(other),
        });
        run_system_once(&mut self.world, track_player_contacts);
    }

    fn separate(&mut self, other: Entity) {
        let (hitbox, player) = (self.hitbox, self.player);
        self.world.write_message(CollisionEnd {
            collider1: other,
            collider2: hitbox,
            body1: Some(other),
            body2: Some(player),
        });
        run_system_once(&mut self.world, track_player_contacts);
    }

    fn spawn_lizard(&mut self, pos: Vec2) -> Entity {
        self.world
            .spawn((Lizard, lizard_layers(), Transform::from_translation(pos.extend(0.0))))
            .id()
    }

    fn health(&self) -> &PlayerHealth {
        self.world.get::<PlayerHealth>(self.player).unwrap()
    }

    fn velocity(&self) -> Vec2 {
        self.world.get::<LinearVelocity>(self.player).unwrap().0
    }
}

// --------------------------------------------------------------------------------------
// Hit-stop
// --------------------------------------------------------------------------------------

#[test]
fn hit_stop_freezes_exactly_threshold_frames() {
    let mut hs = HitStop::new(10);
    assert!(!hs.advance());

    hs.trigger();
    let frozen = (0..20).filter(|_| hs.advance()).count();
    assert_eq!(frozen, 10);
    assert!(!hs.is_frozen());
}

#[test]
fn retrigger_during_freeze_does_not_extend_it() {
    let mut hs = HitStop::new(10);
    hs.trigger();
    for _ in 0..5 {
        hs.advance();
    }
    hs.trigger();
    let rest = (0..20).filter(|_| hs.advance()).count();
    assert_eq!(rest, 5);
}

#[test]
fn run_condition_reads_frozen_flag() {
    let mut world = World::new();
    assert!(run_system_once(&mut world, player_not_frozen));

    let mut hs = HitStop::new(10);
    hs.trigger();
    hs.advance();
    world.insert_resource(hs);
    assert!(!run_system_once(&mut world, player_not_frozen));
}

// --------------------------------------------------------------------------------------
// Contact tracking
// --------------------------------------------------------------------------------------

#[test]
fn contacts_are_added_and_removed() {
    let mut rig = rig(Vec2::ZERO);
    let chest = rig.world.spawn(Chest::default()).id();
    let lizard = rig.spawn_lizard(Vec2::new(10.0, 0.0));
    let wall = rig.world.spawn(CollisionLayers::new(Layer::World, [Layer::Player])).id();

    rig.touch(chest);
    rig.touch(lizard);
    rig.touch(wall);
    rig.touch(chest);

    let contacts = rig.world.resource::<PlayerContacts>();
    assert_eq!(contacts.chests, vec![chest]);
    assert_eq!(contacts.lizards, vec![lizard]);

    rig.separate(chest);
    let contacts = rig.world.resource::<PlayerContacts>();
    assert!(contacts.chests.is_empty());
    assert_eq!(contacts.lizards, vec![lizard]);
}

#[test]
fn contacts_not_involving_player_are_ignored() {
    let mut rig = rig(Vec2::ZERO);
    let chest = rig.world.spawn(Chest::default()).id();
    let lizard = rig.spawn_lizard(Vec2::ZERO);

    rig.world.write_message(CollisionStart {
        collider1: lizard,
        collider2: chest,
        body1: Some(lizard),
        body2: Some(chest),
    });
    run_system_once(&mut rig.world, track_player_contacts);

    let contacts = rig.world.resource::<PlayerContacts>();
    assert!(contacts.chests.is_empty());
    assert!(contacts.lizards.is_empty());
}

// --------------------------------------------------------------------------------------
// Player ↔ chest
// --------------------------------------------------------------------------------------

#[test]
fn touching_chest_sets_active_chest_every_step() {
    let mut rig = rig(Vec2::ZERO);
    let chest = rig.world.spawn(Chest::default()).id();
    rig.touch(chest);

    run_system_once(&mut rig.world, resolve_chest_contacts);
    assert_eq!(rig.world.get::<ActiveChest>(rig.player).unwrap().0, Some(chest));

    // Movement clears it; still touching, the next step sets it again.
    rig.world.get_mut::<ActiveChest>(rig.player).unwrap().0 = None;
    run_system_once(&mut rig.world, resolve_chest_contacts);
    assert_eq!(rig.world.get::<ActiveChest>(rig.player).unwrap().0, Some(chest));

    // After separating, nothing re-arms it.
    rig.separate(chest);
    rig.world.get_mut::<ActiveChest>(rig.player).unwrap().0 = None;
    run_system_once(&mut rig.world, resolve_chest_contacts);
    assert_eq!(rig.world.get::<ActiveChest>(rig.player).unwrap().0, None);
}

// --------------------------------------------------------------------------------------
// Player ↔ lizard
// --------------------------------------------------------------------------------------

#[test]
fn lizard_hit_knocks_player_back_and_triggers_hit_stop() {
    let mut rig = rig(Vec2::new(100.0, 0.0));
    let lizard = rig.spawn_lizard(Vec2::new(110.0, 0.0));
    rig.touch(lizard);

    run_system_once(&mut rig.world, apply_lizard_contacts);

    assert_eq!(rig.health().hp(), 2);
    assert_eq!(rig.health().state(), HealthState::Damage);
    assert_eq!(rig.velocity(), Vec2::new(-200.0, 0.0));
    assert_eq!(
        read_messages::<PlayerHealthChanged>(&mut rig.world),
        vec![PlayerHealthChanged { health: 2 }]
    );

    let mut hs = rig.world.resource_mut::<HitStop>();
    assert!(hs.advance());
}

#[test]
fn overlapping_during_damage_window_changes_nothing() {
    let mut rig = rig(Vec2::ZERO);
    let lizard = rig.spawn_lizard(Vec2::new(0.0, 10.0));
    rig.touch(lizard);

    run_system_once(&mut rig.world, apply_lizard_contacts);
    read_messages::<PlayerHealthChanged>(&mut rig.world);
    for _ in 0..5 {
        run_system_once(&mut rig.world, apply_lizard_contacts);
    }

    assert_eq!(rig.health().hp(), 2);
    assert!(read_messages::<PlayerHealthChanged>(&mut rig.world).is_empty());
}

#[test]
fn lethal_hit_faints_player_and_disables_the_pair() {
    let mut rig = rig(Vec2::ZERO);
    let lizard = rig.spawn_lizard(Vec2::new(10.0, 0.0));
    rig.touch(lizard);

    for _ in 0..3 {
        run_system_once(&mut rig.world, apply_lizard_contacts);
        let player = rig.player;
        rig.world
            .get_mut::<PlayerHealth>(player)
            .unwrap()
            .tick(Duration::from_secs(1));
    }

    assert_eq!(rig.health().hp(), 0);
    assert_eq!(rig.health().state(), HealthState::Dead);
    assert_eq!(rig.velocity(), Vec2::ZERO);
    assert_eq!(*rig.world.get::<PlayerClip>(rig.player).unwrap(), PlayerClip::Faint);
    assert!(!rig.world.resource::<PlayerLizardPair>().active);
    assert!(!rig
        .world
        .get::<CollisionLayers>(rig.hitbox)
        .unwrap()
        .filters
        .has_all(Layer::Enemy));

    let notices = read_messages::<PlayerHealthChanged>(&mut rig.world);
    assert_eq!(notices.last(), Some(&PlayerHealthChanged { health: 0 }));

    // Touching again does nothing once the pair is off.
    rig.touch(lizard);
    run_system_once(&mut rig.world, apply_lizard_contacts);
    assert!(rig.world.resource::<PlayerContacts>().lizards.is_empty());
    assert!(read_messages::<PlayerHealthChanged>(&mut rig.world).is_empty());
}

#[test]
fn slain_lizard_does_not_hurt() {
    let mut rig = rig(Vec2::ZERO);
    let lizard = rig.spawn_lizard(Vec2::new(10.0, 0.0));
    rig.touch(lizard);
    rig.world.entity_mut(lizard).insert(PendingDespawn);

    run_system_once(&mut rig.world, apply_lizard_contacts);

    assert_eq!(rig.health().hp(), 3);
    assert!(rig.world.resource::<PlayerContacts>().lizards.is_empty());
}

#[test]
fn reset_restores_scene_resources() {
    let mut rig = rig(Vec2::ZERO);
    let lizard = rig.spawn_lizard(Vec2::ZERO);
    rig.touch(lizard);
    rig.world.resource_mut::<PlayerLizardPair>().active = false;
    rig.world.resource_mut::<HitStop>().trigger();

    run_system_once(&mut rig.world, reset_scene);

    assert!(rig.world.resource::<PlayerLizardPair>().active);
    assert!(rig.world.resource::<PlayerContacts>().lizards.is_empty());
    assert!(!rig.world.resource_mut::<HitStop>().advance());
}
