use bevy::prelude::*;

use super::{Chest, ChestState};
use crate::common::rng::GameRng;
use crate::common::test_utils::run_system_once;
use crate::plugins::world::DungeonMap;

#[test]
fn first_open_pays_once_then_zero() {
    let mut rng = GameRng::seeded(7);
    let mut chest = Chest::default();
    assert_eq!(chest.state(), ChestState::Closed);

    let first = chest.open(&mut *rng, 1000..=1200);
    assert!((1000..=1200).contains(&first));
    assert_eq!(chest.state(), ChestState::Opened);

    let second = chest.open(&mut *rng, 1000..=1200);
    assert_eq!(second, 0);
    assert_eq!(chest.state(), ChestState::Opened);
}

#[test]
fn reward_range_upper_bound_is_inclusive() {
    // A degenerate range only has its upper bound to offer.
    let mut rng = GameRng::seeded(1);
    let mut chest = Chest::default();
    assert_eq!(chest.open(&mut *rng, 1200..=1200), 1200);

    // Over many chests both bounds stay in range and the top value shows up.
    let mut seen_max = false;
    for _ in 0..20_000 {
        let reward = Chest::default().open(&mut *rng, 1000..=1200);
        assert!((1000..=1200).contains(&reward));
        seen_max |= reward == 1200;
    }
    assert!(seen_max, "1200 should be reachable");
}

#[test]
fn spawns_closed_chests_from_map() {
    let mut world = World::new();
    world.insert_resource(DungeonMap {
        chests: vec![Vec2::new(10.0, -10.0), Vec2::new(40.0, -20.0)],
        ..default()
    });

    run_system_once(&mut world, super::spawn_chests);

    let states: Vec<ChestState> = world.query::<&Chest>().iter(&world).map(|c| c.state()).collect();
    assert_eq!(states, vec![ChestState::Closed, ChestState::Closed]);
}

#[test]
fn opened_chest_changes_sprite() {
    let mut world = World::new();
    let e = world.spawn((Chest::default(), Sprite::default())).id();

    let mut rng = GameRng::seeded(3);
    world.get_mut::<Chest>(e).unwrap().open(&mut *rng, 1000..=1200);
    run_system_once(&mut world, super::sync_chest_sprites);

    assert_eq!(world.get::<Sprite>(e).unwrap().color, super::chest_color(ChestState::Opened));
}
