mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use dungeon_crawl::common::state::GameState;
use dungeon_crawl::plugins::chests::{Chest, ChestState};
use dungeon_crawl::plugins::enemies::Lizard;
use dungeon_crawl::plugins::player::{Coins, HealthState, Player, PlayerHealth, PlayerHitbox};
use dungeon_crawl::plugins::projectiles::pool::KnifePool;
use dungeon_crawl::plugins::scene::HitStop;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
}

#[test]
fn entering_game_builds_the_dungeon() {
    let mut app = common::app_in_game();

    for _ in 0..5 {
        app.update();
    }

    let world = app.world_mut();

    let players = world
        .query_filtered::<(&PlayerHealth, &Coins), (With<Player>, With<TranslationInterpolation>)>()
        .iter(world)
        .map(|(h, c)| (h.hp(), h.state(), c.0))
        .collect::<Vec<_>>();
    assert_eq!(players, vec![(3, HealthState::Idle, 0)]);

    assert_eq!(world.query::<&PlayerHitbox>().iter(world).count(), 1);

    let chests = world.query::<&Chest>().iter(world).map(Chest::state).collect::<Vec<_>>();
    assert_eq!(chests, vec![ChestState::Closed; 2]);

    assert_eq!(world.query::<&Lizard>().iter(world).count(), 3);

    let pool = world.resource::<KnifePool>();
    assert_eq!(pool.capacity(), 3);
    assert_eq!(pool.free_len(), 3);

    assert!(!world.resource::<HitStop>().is_frozen());
}

#[test]
fn walls_only_collide_where_flagged() {
    let mut app = common::app_in_game();
    let world = app.world_mut();

    let walls = world
        .query::<(&Name, Option<&Collider>)>()
        .iter(world)
        .filter(|(name, _)| name.as_str().starts_with("Wall("))
        .map(|(_, collider)| collider.is_some())
        .collect::<Vec<_>>();

    assert_eq!(walls.len(), 86);
    assert_eq!(walls.iter().filter(|c| **c).count(), 83);
}
