//! Dungeon map data.
//!
//! Reads the subset of the Tiled JSON export the scene needs:
//! - tile layers `Ground` and `Walls` (a wall tile collides when its tileset entry
//!   carries the bool property `collide = true`),
//! - object layers `Chests` and `Lizards` (placement rectangles).
//!
//! Tiled uses y-down pixel coordinates. Everything stored in [`DungeonMap`] is already
//! converted to world space (y-up), so spawners never see Tiled coordinates.

use std::fmt;

use bevy::platform::collections::HashSet;
use bevy::prelude::*;
use serde::Deserialize;

pub const GROUND_LAYER: &str = "Ground";
pub const WALLS_LAYER: &str = "Walls";
pub const CHESTS_LAYER: &str = "Chests";
pub const LIZARDS_LAYER: &str = "Lizards";

/// Player start, in Tiled pixels.
const PLAYER_SPAWN_TILED: Vec2 = Vec2::new(128.0, 128.0);

const EMBEDDED_DUNGEON: &str = include_str!("../../../assets/maps/dungeon.json");

// -----------------------------------------------------------------------------
// Raw Tiled JSON
// -----------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    layers: Vec<RawLayer>,
    #[serde(default)]
    tilesets: Vec<RawTileset>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawLayer {
    Tilelayer { name: String, data: Vec<u32> },
    Objectgroup { name: String, objects: Vec<RawObject> },
}

#[derive(Deserialize)]
struct RawObject {
    x: f32,
    y: f32,
    #[serde(default)]
    width: f32,
    #[serde(default)]
    height: f32,
}

#[derive(Deserialize)]
struct RawTileset {
    firstgid: u32,
    #[serde(default)]
    tiles: Vec<RawTile>,
}

#[derive(Deserialize)]
struct RawTile {
    id: u32,
    #[serde(default)]
    properties: Vec<RawProperty>,
}

#[derive(Deserialize)]
struct RawProperty {
    name: String,
    #[serde(default)]
    value: serde_json::Value,
}

// -----------------------------------------------------------------------------
// Errors
// -----------------------------------------------------------------------------

#[derive(Debug)]
pub enum MapError {
    Json(serde_json::Error),
    MissingLayer(&'static str),
    LayerSize {
        layer: &'static str,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Json(err) => write!(f, "malformed map json: {err}"),
            MapError::MissingLayer(name) => write!(f, "map has no `{name}` layer"),
            MapError::LayerSize { layer, expected, found } => write!(
                f,
                "layer `{layer}` has {found} tiles, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Json(err)
    }
}

// -----------------------------------------------------------------------------
// Parsed map
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundTile {
    pub cell: UVec2,
    pub center: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallTile {
    pub cell: UVec2,
    pub center: Vec2,
    pub collide: bool,
}

/// World-space view of the dungeon.
#[derive(Resource, Debug, Clone, Default)]
pub struct DungeonMap {
    pub size: UVec2,
    pub tile_size: Vec2,
    pub ground: Vec<GroundTile>,
    pub walls: Vec<WallTile>,
    pub chests: Vec<Vec2>,
    pub lizards: Vec<Vec2>,
    pub player_spawn: Vec2,
}

/// Tiled pixel coordinates (y-down) to world coordinates (y-up).
#[inline]
pub fn tiled_to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x, -p.y)
}

impl DungeonMap {
    /// The map bundled with the game.
    pub fn embedded() -> Result<Self, MapError> {
        Self::from_json(EMBEDDED_DUNGEON)
    }

    pub fn from_json(json: &str) -> Result<Self, MapError> {
        let raw: RawMap = serde_json::from_str(json)?;

        let collide_gids: HashSet<u32> = raw
            .tilesets
            .iter()
            .flat_map(|ts| {
                ts.tiles
                    .iter()
                    .filter(|t| {
                        t.properties
                            .iter()
                            .any(|p| p.name == "collide" && p.value == serde_json::Value::Bool(true))
                    })
                    .map(move |t| ts.firstgid + t.id)
            })
            .collect();

        let size = UVec2::new(raw.width, raw.height);
        let tile_size = Vec2::new(raw.tilewidth as f32, raw.tileheight as f32);
        let expected = (raw.width * raw.height) as usize;

        let ground_data = tile_layer(&raw.layers, GROUND_LAYER, expected)?;
        let walls_data = tile_layer(&raw.layers, WALLS_LAYER, expected)?;

        let ground = occupied_cells(ground_data, size, tile_size)
            .map(|(_, cell, center)| GroundTile { cell, center })
            .collect();

        let walls = occupied_cells(walls_data, size, tile_size)
            .map(|(gid, cell, center)| WallTile {
                cell,
                center,
                collide: collide_gids.contains(&gid),
            })
            .collect();

        let chests = object_layer(&raw.layers, CHESTS_LAYER)?
            .iter()
            .map(|o| tiled_to_world(Vec2::new(o.x + o.width * 0.5, o.y - o.height * 0.5)))
            .collect();

        // Lizard sprites are anchored one full width to the right of the object.
        let lizards = object_layer(&raw.layers, LIZARDS_LAYER)?
            .iter()
            .map(|o| tiled_to_world(Vec2::new(o.x + o.width, o.y - o.height * 0.5)))
            .collect();

        Ok(Self {
            size,
            tile_size,
            ground,
            walls,
            chests,
            lizards,
            player_spawn: tiled_to_world(PLAYER_SPAWN_TILED),
        })
    }
}

fn tile_layer<'a>(
    layers: &'a [RawLayer],
    name: &'static str,
    expected: usize,
) -> Result<&'a [u32], MapError> {
    let data = layers
        .iter()
        .find_map(|l| match l {
            RawLayer::Tilelayer { name: n, data } if n == name => Some(data.as_slice()),
            _ => None,
        })
        .ok_or(MapError::MissingLayer(name))?;

    if data.len() != expected {
        return Err(MapError::LayerSize {
            layer: name,
            expected,
            found: data.len(),
        });
    }
    Ok(data)
}

fn object_layer<'a>(layers: &'a [RawLayer], name: &'static str) -> Result<&'a [RawObject], MapError> {
    layers
        .iter()
        .find_map(|l| match l {
            RawLayer::Objectgroup { name: n, objects } if n == name => Some(objects.as_slice()),
            _ => None,
        })
        .ok_or(MapError::MissingLayer(name))
}

/// Non-empty cells of a tile layer as `(gid, cell, world centre)`.
fn occupied_cells(
    data: &[u32],
    size: UVec2,
    tile_size: Vec2,
) -> impl Iterator<Item = (u32, UVec2, Vec2)> + '_ {
    data.iter().enumerate().filter(|(_, gid)| **gid != 0).map(move |(i, gid)| {
        let cell = UVec2::new(i as u32 % size.x, i as u32 / size.x);
        let tiled = (cell.as_vec2() + Vec2::splat(0.5)) * tile_size;
        (*gid, cell, tiled_to_world(tiled))
    })
}
