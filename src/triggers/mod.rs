//! Triggers domain: storm arm/fire pairs and tech unlock events.

mod builder;
mod graph;
#[cfg(test)]
mod tests;

pub use builder::{
    StormParams, build_storm_events, build_tech_events, build_trigger_graph, pair_rewards,
};
pub use graph::{DamageEvent, DamageState, RewardSpec, StormEvent, TechEvent, TriggerGraph};

use bevy::prelude::*;

use crate::core::{GeneratorConfig, GeneratorStage};
use crate::storm::StormLayout;

pub struct TriggersPlugin;

impl Plugin for TriggersPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, build_graph_system.in_set(GeneratorStage::Build));
    }
}

fn build_graph_system(
    mut commands: Commands,
    config: Option<Res<GeneratorConfig>>,
    layout: Option<Res<StormLayout>>,
) {
    let (Some(config), Some(layout)) = (config, layout) else {
        return;
    };

    let graph = build_trigger_graph(&config, &layout);
    info!("{}", graph.summary());
    commands.insert_resource(graph);
}
