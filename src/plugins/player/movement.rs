//! Input sampling and per-frame action resolution.

use bevy::prelude::*;

use crate::common::facing::Facing;

/// Input sampled this frame.
///
/// `connected` is false when no keyboard input resource exists (headless apps);
/// the player is not driven on such frames.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerInput {
    pub connected: bool,
    /// Action key went down this frame.
    pub act: bool,
    /// Held direction, already reduced by priority.
    pub dir: Option<Facing>,
}

/// Arrow keys are level-triggered with priority Left > Right > Up > Down;
/// Space is edge-triggered.
pub fn sample_input(keys: &ButtonInput<KeyCode>) -> PlayerInput {
    let dir = if keys.pressed(KeyCode::ArrowLeft) {
        Some(Facing::Left)
    } else if keys.pressed(KeyCode::ArrowRight) {
        Some(Facing::Right)
    } else if keys.pressed(KeyCode::ArrowUp) {
        Some(Facing::Up)
    } else if keys.pressed(KeyCode::ArrowDown) {
        Some(Facing::Down)
    } else {
        None
    };

    PlayerInput {
        connected: true,
        act: keys.just_pressed(KeyCode::Space),
        dir,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Interact(Entity),
    Throw,
    Move(Facing),
    Idle,
}

/// The action key wins over movement; it opens the active chest if there is one.
pub fn resolve_action(input: &PlayerInput, active_chest: Option<Entity>) -> PlayerAction {
    if input.act {
        return match active_chest {
            Some(chest) => PlayerAction::Interact(chest),
            None => PlayerAction::Throw,
        };
    }

    match input.dir {
        Some(dir) => PlayerAction::Move(dir),
        None => PlayerAction::Idle,
    }
}

/// Clip the player sprite is showing, named `faune-<state>-<direction>`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerClip {
    Idle(Facing),
    Run(Facing),
    Faint,
}

impl PlayerClip {
    pub fn key(self) -> &'static str {
        match self {
            PlayerClip::Idle(f) => match f.token() {
                "up" => "faune-idle-up",
                "down" => "faune-idle-down",
                _ => "faune-idle-side",
            },
            PlayerClip::Run(f) => match f.token() {
                "up" => "faune-run-up",
                "down" => "faune-run-down",
                _ => "faune-run-side",
            },
            PlayerClip::Faint => "faune-faint",
        }
    }
}

/// Horizontal offset of the body is kept Phaser-style: the distance from the
/// sprite's left edge to the body's left edge, in the sprite's own (possibly
/// mirrored) frame.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HitboxOffset(pub f32);

/// Local x of the body centre relative to the sprite centre.
#[inline]
pub fn hitbox_center_x(offset: f32, flipped: bool, sprite_w: f32, body_w: f32) -> f32 {
    let sign = if flipped { -1.0 } else { 1.0 };
    sign * (offset - sprite_w * 0.5) + body_w * 0.5
}
