//! Procedural trigger generator for battle royale scenarios: an inward
//! storm of timed damage zones, kill-count tech rewards and circular
//! starting armies.

pub mod content;
pub mod core;
pub mod scenario;
pub mod spawns;
pub mod storm;
pub mod triggers;

use bevy::app::ScheduleRunnerPlugin;
use bevy::prelude::*;

/// Headless, run-once generator: every stage runs at Startup and the last
/// one writes the `AppExit`.
pub fn add_generator(app: &mut App, args: core::Args) {
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()))
        .insert_resource(args)
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            scenario::ScenarioPlugin,
            storm::StormPlugin,
            triggers::TriggersPlugin,
            spawns::SpawnsPlugin,
        ));
}
