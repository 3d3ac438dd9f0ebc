use bevy::prelude::*;

use crate::common::{facing::Facing, tunables::Tunables};

use super::messages::ThrowKnifeRequest;

/// Build the throw for a player standing at `origin` and facing `facing`.
///
/// The knife starts `knife_spawn_offset` ahead of the player, points along the
/// throw and flies at `knife_speed`.
pub fn knife_throw(origin: Vec2, facing: Facing, tunables: &Tunables) -> ThrowKnifeRequest {
    let dir = facing.unit();

    ThrowKnifeRequest {
        pos: origin + dir * tunables.knife_spawn_offset,
        vel: dir * tunables.knife_speed,
        rotation: dir.to_angle(),
    }
}
