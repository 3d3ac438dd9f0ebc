use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{ensure_messages, insert_time_with_delta, run_system_once};
use crate::plugins::world::wall_layers;

fn world_with_resources() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(GameRng::seeded(42));
    world
}

#[test]
fn spawns_one_lizard_per_map_object() {
    let mut world = world_with_resources();
    world.insert_resource(DungeonMap {
        lizards: vec![Vec2::new(256.0, -128.0), Vec2::new(80.0, -64.0)],
        ..default()
    });

    run_system_once(&mut world, spawn_lizards);

    let mut q = world.query::<(&Lizard, &Transform, &CollisionLayers, &Wander)>();
    assert_eq!(q.iter(&world).count(), 2);
    for (_, _, layers, _) in q.iter(&world) {
        assert!(layers.memberships.has_all(Layer::Enemy));
        assert!(layers.filters.has_all(Layer::PlayerKnife));
        assert!(layers.filters.has_all(Layer::Player));
    }
    assert!(q
        .iter(&world)
        .any(|(_, tf, _, _)| tf.translation.truncate() == Vec2::new(256.0, -128.0)));
}

#[test]
fn wander_moves_along_direction_at_lizard_speed() {
    let mut world = world_with_resources();
    insert_time_with_delta(&mut world, Duration::from_millis(16));
    let e = world
        .spawn((Lizard, Wander::new(Facing::Left, 2.0), LinearVelocity::ZERO))
        .id();

    run_system_once(&mut world, wander);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::new(-50.0, 0.0));
    assert_eq!(world.get::<Wander>(e).unwrap().dir, Facing::Left);
}

#[test]
fn wander_turns_when_timer_elapses() {
    let mut world = world_with_resources();
    insert_time_with_delta(&mut world, Duration::from_millis(2000));
    let e = world
        .spawn((Lizard, Wander::new(Facing::Left, 2.0), LinearVelocity::ZERO))
        .id();

    run_system_once(&mut world, wander);

    let dir = world.get::<Wander>(e).unwrap().dir;
    assert_ne!(dir, Facing::Left);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, dir.unit() * 50.0);
}

#[test]
fn slain_lizard_stops_wandering() {
    let mut world = world_with_resources();
    insert_time_with_delta(&mut world, Duration::from_millis(16));
    let e = world
        .spawn((Lizard, PendingDespawn, Wander::new(Facing::Up, 2.0), LinearVelocity::ZERO))
        .id();

    run_system_once(&mut world, wander);

    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);
}

#[test]
fn bumping_a_wall_turns_the_lizard() {
    let mut world = world_with_resources();
    ensure_messages::<CollisionStart>(&mut world);
    let lizard = world
        .spawn((Lizard, Wander::new(Facing::Right, 2.0), lizard_layers()))
        .id();
    let wall = world.spawn(wall_layers()).id();

    world.write_message(CollisionStart { collider1: wall, collider2: lizard, body1: Some(wall), body2: Some(lizard) });
    run_system_once(&mut world, turn_on_wall_hit);

    assert_ne!(world.get::<Wander>(lizard).unwrap().dir, Facing::Right);
}

#[test]
fn random_turn_never_repeats_current_direction() {
    let mut rng = GameRng::seeded(9);
    for from in Facing::ALL {
        for _ in 0..200 {
            assert_ne!(Facing::random_except(&mut *rng, from), from);
        }
    }
}

#[test]
fn marked_lizards_are_despawned() {
    let mut world = World::new();
    let dead = world.spawn((Lizard, PendingDespawn)).id();
    let alive = world.spawn(Lizard).id();

    run_system_once(&mut world, despawn_marked_enemies);

    assert!(world.get_entity(dead).is_err());
    assert!(world.get_entity(alive).is_ok());
}
