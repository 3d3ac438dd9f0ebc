//! Enemies plugin: lizards.
//!
//! Lizards are placed from the map's `Lizards` layer and wander the dungeon in
//! cardinal directions. They hurt the player on contact (see the scene plugin)
//! and die to a single knife (see `projectiles::collision`).
//!
//! Death is split across two schedules:
//! - the knife collision system marks the lizard `PendingDespawn`, clears its
//!   collision filters, stops and hides it, all inside the fixed step;
//! - `despawn_marked_enemies` removes the entity in `PostUpdate`.
//!
//! Keeping the structural change out of the physics step avoids other fixed-step
//! systems seeing a half-removed entity.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{facing::Facing, layers::{is_in_layer, Layer}, rng::GameRng, state::GameState, tunables::Tunables};
use crate::plugins::projectiles::collision::{process_knife_collisions, targets};
use crate::plugins::world::DungeonMap;

pub const LIZARD_SIZE: Vec2 = Vec2::new(16.0, 16.0);

#[derive(Component, Debug, Clone, Copy)]
pub struct Lizard;

/// Marker: lizard should be removed from the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

/// Wander AI: walk one way, turn on a timer or when bumping into a wall.
#[derive(Component, Debug, Clone)]
pub struct Wander {
    pub dir: Facing,
    pub timer: Timer,
}

impl Wander {
    pub fn new(dir: Facing, turn_secs: f32) -> Self {
        Self {
            dir,
            timer: Timer::from_seconds(turn_secs, TimerMode::Repeating),
        }
    }

    fn turn(&mut self, rng: &mut GameRng) {
        self.dir = Facing::random_except(&mut **rng, self.dir);
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_lizards);

    app.add_systems(
        FixedUpdate,
        wander.run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        turn_on_wall_hit
            .after(CollisionEventSystems)
            .after(process_knife_collisions)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_marked_enemies.run_if(in_state(GameState::InGame)),
    );
}

#[inline]
pub fn lizard_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [Layer::World, Layer::Player, Layer::PlayerKnife])
}

/// Collision layers for a lizard that should no longer interact with anything.
///
/// Membership stays `Enemy` but filters are cleared, so new contacts stop at once
/// without a structural change.
#[inline]
pub fn non_interacting_lizard_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Enemy, [] as [Layer; 0])
}

fn spawn_lizards(
    mut commands: Commands,
    map: Res<DungeonMap>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
) {
    for (i, pos) in map.lizards.iter().enumerate() {
        let dir = Facing::random_except(&mut **rng, Facing::Down);

        commands.spawn((
            Name::new(format!("Lizard{i}")),
            Lizard,
            Wander::new(dir, tunables.lizard_turn_secs),
            Sprite {
                color: Color::srgb(0.35, 0.70, 0.30),
                custom_size: Some(LIZARD_SIZE),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            RigidBody::Dynamic,
            Collider::rectangle(LIZARD_SIZE.x, LIZARD_SIZE.y * 0.75),
            LockedAxes::ROTATION_LOCKED,
            lizard_layers(),
            LinearVelocity::ZERO,
            CollisionEventsEnabled,
            DespawnOnExit(GameState::InGame),
        ));
    }
}

fn wander(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    mut q: Query<(&mut Wander, &mut LinearVelocity), (With<Lizard>, Without<PendingDespawn>)>,
) {
    for (mut wander, mut vel) in &mut q {
        wander.timer.tick(time.delta());
        if wander.timer.just_finished() {
            wander.turn(&mut rng);
        }
        vel.0 = wander.dir.unit() * tunables.lizard_speed;
    }
}

fn turn_on_wall_hit(
    mut started: MessageReader<CollisionStart>,
    mut rng: ResMut<GameRng>,
    mut q_lizards: Query<&mut Wander, (With<Lizard>, Without<PendingDespawn>)>,
    q_layers: Query<&CollisionLayers>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev.collider1, ev.collider2, ev.body1, ev.body2);

        for (lizard_side, other_side) in [(t1, t2), (t2, t1)] {
            let Ok(other_layers) = q_layers.get(other_side.collider) else {
                continue;
            };
            if !is_in_layer(other_layers, Layer::World) {
                continue;
            }
            if let Ok(mut wander) = q_lizards.get_mut(lizard_side.gameplay_owner()) {
                wander.turn(&mut rng);
            }
        }
    }
}

/// Despawn lizards marked for removal.
fn despawn_marked_enemies(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}

#[cfg(test)]
mod tests;
