//! Buffered throw requests.
//!
//! The player writes intent; the allocator is the single writer of the pool.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ThrowKnifeRequest {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Sprite rotation around Z, radians.
    pub rotation: f32,
}
