//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `dungeon_crawl::game::configure_headless` to install gameplay plugins.
//!
//! No `InputPlugin`: the player reads no keyboard and stands still.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;

pub fn app_headless() -> App {
    let mut app = App::new();

    // AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    dungeon_crawl::game::configure_headless(&mut app);
    app
}

/// Boot and run the first frame, which enters `InGame` and builds the scene.
#[allow(dead_code)]
pub fn app_in_game() -> App {
    let mut app = app_headless();
    app.update();
    app
}
