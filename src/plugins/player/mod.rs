//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard into `PlayerInput`, then `drive_player` turns it into
//!   one action per frame (open chest, throw knife, run or idle)
//! - Update: the damage window ticks regardless of input
//! - PostUpdate: presentation (hitbox placement, tint) follows the state
//!
//! The player is a dynamic, rotation-locked body. Its collider lives on a child
//! entity (`PlayerHitbox`) so it can be shifted when the sprite mirrors.

pub mod health;
pub mod movement;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{facing::Facing, layers::Layer, rng::GameRng, state::GameState, tunables::Tunables};
use crate::plugins::chests::Chest;
use crate::plugins::notices::PlayerCoinsChanged;
use crate::plugins::projectiles::{messages::ThrowKnifeRequest, request::knife_throw};
use crate::plugins::scene::player_not_frozen;
use crate::plugins::world::DungeonMap;

pub use health::{DamageOutcome, HealthState, PlayerHealth};
pub use movement::{HitboxOffset, PlayerAction, PlayerClip, PlayerInput};

use movement::{hitbox_center_x, resolve_action, sample_input};

pub const SPRITE_SIZE: Vec2 = Vec2::new(32.0, 32.0);
/// Body is half the sprite width and 0.8 of its height.
pub const BODY_SIZE: Vec2 = Vec2::new(16.0, 25.6);

const BASE_TINT: Color = Color::srgb(0.85, 0.80, 0.95);
const DAMAGE_TINT: Color = Color::srgb(1.0, 0.0, 0.0);
const FAINT_TINT: Color = Color::srgb(0.45, 0.45, 0.45);

#[derive(Component, Debug, Clone, Copy)]
pub struct Player;

/// Child collider of the player.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlayerHitbox;

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coins(pub u32);

/// Chest the action key will open. Set while touching one, cleared on any movement input.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveChest(pub Option<Entity>);

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (
                gather_input,
                drive_player.run_if(player_not_frozen),
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            tick_damage_window.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            PostUpdate,
            (sync_hitbox, sync_player_tint, log_clip_changes)
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

#[inline]
pub fn player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Enemy, Layer::Chest])
}

/// A fainted player still blocks on walls and touches chests, but lizards pass.
#[inline]
pub fn fainted_player_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Player, [Layer::World, Layer::Chest])
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>, map: Res<DungeonMap>) {
    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            (
                PlayerHealth::new(tunables.player_max_health, tunables.damage_window),
                Facing::Down,
                PlayerClip::Idle(Facing::Down),
                Coins::default(),
                ActiveChest::default(),
                HitboxOffset(tunables.hitbox_offset_right),
            ),
            Sprite {
                color: BASE_TINT,
                custom_size: Some(SPRITE_SIZE),
                ..default()
            },
            Transform::from_translation(map.player_spawn.extend(2.0)),
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::ZERO,
            TranslationInterpolation,
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    commands.spawn((
        Name::new("PlayerHitbox"),
        PlayerHitbox,
        ChildOf(player),
        Transform::default(),
        Collider::rectangle(BODY_SIZE.x, BODY_SIZE.y),
        player_layers(),
        CollisionEventsEnabled,
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    *input = match keys {
        Some(keys) => sample_input(&keys),
        None => PlayerInput::default(),
    };
}

/// One action per frame, resolved from `PlayerInput`.
///
/// Nothing is read while hurt or fainted. The action key has priority: it opens
/// the active chest, otherwise it throws a knife along the current facing.
pub(crate) fn drive_player(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    mut rng: ResMut<GameRng>,
    mut q_player: Query<
        (
            &Transform,
            &PlayerHealth,
            &mut Facing,
            &mut PlayerClip,
            &mut LinearVelocity,
            &mut Sprite,
            &mut HitboxOffset,
            &mut ActiveChest,
            &mut Coins,
        ),
        With<Player>,
    >,
    mut q_chests: Query<&mut Chest>,
    mut throws: MessageWriter<ThrowKnifeRequest>,
    mut coins_changed: MessageWriter<PlayerCoinsChanged>,
) {
    if !input.connected {
        return;
    }
    let Ok((tf, health, mut facing, mut clip, mut vel, mut sprite, mut offset, mut active, mut coins)) =
        q_player.single_mut()
    else {
        return;
    };
    if !health.accepts_input() {
        return;
    }

    match resolve_action(&input, active.0) {
        PlayerAction::Interact(chest_e) => {
            let Ok(mut chest) = q_chests.get_mut(chest_e) else {
                debug!("active chest {chest_e:?} no longer exists");
                active.0 = None;
                return;
            };
            let reward = chest.open(&mut **rng, tunables.chest_reward());
            if reward > 0 {
                info!("chest {chest_e:?} opened for {reward} coins");
            }
            coins.0 += reward;
            coins_changed.write(PlayerCoinsChanged { coins: coins.0 });
        }
        PlayerAction::Throw => {
            throws.write(knife_throw(tf.translation.truncate(), *facing, &tunables));
        }
        PlayerAction::Move(dir) => {
            facing.set_if_neq(dir);
            clip.set_if_neq(PlayerClip::Run(dir));
            vel.0 = dir.unit() * tunables.player_speed;

            match dir {
                Facing::Left => {
                    sprite.flip_x = true;
                    offset.0 = tunables.hitbox_offset_left;
                }
                Facing::Right => {
                    sprite.flip_x = false;
                    offset.0 = tunables.hitbox_offset_right;
                }
                Facing::Up | Facing::Down => {}
            }

            active.0 = None;
        }
        PlayerAction::Idle => {
            vel.0 = Vec2::ZERO;
            let idle = PlayerClip::Idle(*facing);
            clip.set_if_neq(idle);
        }
    }
}

fn tick_damage_window(time: Res<Time>, mut q: Query<&mut PlayerHealth, With<Player>>) {
    for mut health in &mut q {
        if health.state() != HealthState::Damage {
            continue;
        }
        if health.tick(time.delta()) {
            debug!("damage window over");
        }
    }
}

/// Keep the child collider centred on the visible body after mirroring.
fn sync_hitbox(
    q_player: Query<(&HitboxOffset, &Sprite), With<Player>>,
    mut q_hitbox: Query<(&ChildOf, &mut Transform), With<PlayerHitbox>>,
) {
    for (child_of, mut tf) in &mut q_hitbox {
        let Ok((offset, sprite)) = q_player.get(child_of.parent()) else {
            continue;
        };
        let x = hitbox_center_x(offset.0, sprite.flip_x, SPRITE_SIZE.x, BODY_SIZE.x);
        if tf.translation.x != x {
            tf.translation.x = x;
        }
    }
}

fn sync_player_tint(mut q: Query<(&PlayerHealth, &mut Sprite), (With<Player>, Changed<PlayerHealth>)>) {
    for (health, mut sprite) in &mut q {
        sprite.color = match health.state() {
            HealthState::Idle => BASE_TINT,
            HealthState::Damage => DAMAGE_TINT,
            HealthState::Dead => FAINT_TINT,
        };
    }
}

fn log_clip_changes(q: Query<&PlayerClip, (With<Player>, Changed<PlayerClip>)>) {
    for clip in &q {
        debug!("player clip -> {}", clip.key());
    }
}
