//! Spawns domain: per-player starting armies.

mod planner;
#[cfg(test)]
mod tests;

pub use planner::{
    PlacedUnit, ROW_WIDTH, SPAWN_RADIUS_FACTOR, SpawnPlan, UNIT_SPACING, UnitGroup, grid_offset,
    pair_units, plan_player, plan_spawns, spawn_anchor, spawn_radius,
};

use bevy::prelude::*;

use crate::core::{GeneratorConfig, GeneratorStage};

/// One plan per active player, in player order.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct SpawnPlans(pub Vec<SpawnPlan>);

impl SpawnPlans {
    pub fn unit_count(&self) -> usize {
        self.0.iter().map(|plan| plan.units.len()).sum()
    }
}

pub struct SpawnsPlugin;

impl Plugin for SpawnsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, plan_spawns_system.in_set(GeneratorStage::Plan));
    }
}

fn plan_spawns_system(mut commands: Commands, config: Option<Res<GeneratorConfig>>) {
    let Some(config) = config else {
        return;
    };

    if config.army.is_empty() {
        debug!("No starting units requested");
        commands.insert_resource(SpawnPlans::default());
        return;
    }

    let plans = SpawnPlans(plan_spawns(
        config.grid.map_size(),
        config.player_count,
        &config.army,
    ));
    info!(
        "Planned {} starting units for {} players",
        plans.unit_count(),
        config.player_count
    );
    commands.insert_resource(plans);
}
