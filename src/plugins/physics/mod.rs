//! Physics plugin: top-down arcade physics.
//!
//! No gravity; the length unit follows the map's pixel scale so avian's internal
//! tolerances fit 16 px tiles.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let ppm = app.world().resource::<Tunables>().pixels_per_meter;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::ZERO));
    app.insert_resource(Time::<Fixed>::from_hz(60.0));
}
