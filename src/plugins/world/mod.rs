//! World plugin: loads the dungeon map and spawns its walls and floor.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

pub mod map;

pub use map::DungeonMap;

pub fn plugin(app: &mut App) {
    let map = match DungeonMap::embedded() {
        Ok(map) => map,
        Err(err) => {
            error!("failed to load dungeon map, starting with an empty world: {err}");
            DungeonMap::default()
        }
    };

    app.insert_resource(map);
    app.add_systems(OnEnter(GameState::InGame), spawn_walls);
    app.add_systems(OnEnter(GameState::InGame), spawn_floor);
}

#[inline]
pub fn wall_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy, Layer::PlayerKnife])
}

/// Spawn one sprite per wall tile; tiles flagged `collide` also get a static body.
fn spawn_walls(mut commands: Commands, map: Res<DungeonMap>) {
    let size = map.tile_size;

    for wall in &map.walls {
        let mut e = commands.spawn((
            Name::new(format!("Wall({},{})", wall.cell.x, wall.cell.y)),
            Sprite {
                color: if wall.collide {
                    Color::srgb(0.25, 0.27, 0.33)
                } else {
                    Color::srgb(0.33, 0.22, 0.24)
                },
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(wall.center.extend(0.5)),
            DespawnOnExit(GameState::InGame),
        ));

        if wall.collide {
            e.insert((RigidBody::Static, Collider::rectangle(size.x, size.y), wall_layers()));
        }
    }

    debug!("spawned {} wall tiles", map.walls.len());
}

/// Spawn the ground layer as a checkered grid of plain sprites.
fn spawn_floor(mut commands: Commands, map: Res<DungeonMap>) {
    map.ground.iter().for_each(|tile| {
        let color = if (tile.cell.x + tile.cell.y) % 2 == 0 {
            Color::srgb(0.14, 0.14, 0.16)
        } else {
            Color::srgb(0.12, 0.12, 0.14)
        };

        commands.spawn((
            Sprite::from_color(color, map.tile_size),
            Transform::from_translation(tile.center.extend(0.0)),
            DespawnOnExit(GameState::InGame),
        ));
    });
}
