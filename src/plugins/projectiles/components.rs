use bevy::prelude::*;

/// Marker for knives owned by the [`KnifePool`](super::pool::KnifePool).
#[derive(Component)]
pub struct PooledKnife;

/// Knife lifecycle. Only the allocator moves Inactive -> Active and only the
/// return commit moves PendingReturn -> Inactive.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnifeState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

/// A pooled knife entity.
///
/// The pool only ever hands these out, which keeps "this entity is a knife" a
/// property of the type rather than of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnifeEntity(pub Entity);
