//! Core plugin: shared resources and global settings.

use crate::common::{rng::GameRng, tunables::Tunables};
use bevy::prelude::*;

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.init_resource::<GameRng>();
    app.insert_resource(ClearColor(Color::srgb(0.13, 0.10, 0.13)));
}
