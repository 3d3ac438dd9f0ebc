//! Test helpers.
//!
//! `run_system_once` executes one system on a bare `World` without building a schedule.
//! Systems that use `Commands` only enqueue structural changes, so we flush before returning.

use std::time::Duration;

use bevy::ecs::message::{Message, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Make sure the message buffer for `M` exists so readers/writers can run.
pub fn ensure_messages<M: Message>(world: &mut World) {
    if world.get_resource::<Messages<M>>().is_none() {
        world.init_resource::<Messages<M>>();
    }
}

/// Drain every unread `M` from the buffer.
///
/// A fresh `MessageReader` starts at the oldest buffered message, so it would re-read
/// messages returned by an earlier call. Draining the buffer avoids that.
pub fn read_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    ensure_messages::<M>(world);
    world.resource_mut::<Messages<M>>().drain().collect()
}

/// Insert a generic `Time` resource whose last delta is `dt`.
pub fn insert_time_with_delta(world: &mut World, dt: Duration) {
    let mut time = Time::<()>::default();
    time.advance_by(dt);
    world.insert_resource(time);
}
