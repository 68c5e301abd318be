//! Storm domain: block partitioning and the inward arm-time countdown.

mod geometry;
mod timeline;

pub use geometry::{Block, BlockRect, MapGrid, partition};
pub use timeline::{StormTimeline, TimedBlock, schedule};

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{GeneratorConfig, GeneratorError, GeneratorStage, PipelineFailed};

/// Every block of the map with its arm time, in x-major order.
#[derive(Resource, Debug, Clone)]
pub struct StormLayout {
    pub grid: MapGrid,
    pub timeline: StormTimeline,
    pub blocks: Vec<TimedBlock>,
}

impl StormLayout {
    pub fn build(grid: MapGrid, storm_seconds: u32) -> Result<Self, GeneratorError> {
        let timeline = StormTimeline::new(grid.map_size(), storm_seconds)?;
        let blocks = schedule(&partition(&grid), &timeline);
        Ok(Self {
            grid,
            timeline,
            blocks,
        })
    }

    /// Largest arm time of any block (the last block to fall).
    pub fn last_arm_time(&self) -> u32 {
        self.blocks.iter().map(|b| b.arm_time).max().unwrap_or(0)
    }
}

pub struct StormPlugin;

impl Plugin for StormPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, build_storm_layout.in_set(GeneratorStage::Partition));
    }
}

fn build_storm_layout(
    mut commands: Commands,
    config: Option<Res<GeneratorConfig>>,
    mut failures: MessageWriter<PipelineFailed>,
) {
    let Some(config) = config else {
        return;
    };

    match StormLayout::build(config.grid, config.storm_seconds) {
        Ok(layout) => {
            info!(
                "Storm partitioned {}x{} map into {} blocks of size {} (last block arms at {}s)",
                layout.grid.map_size(),
                layout.grid.map_size(),
                layout.blocks.len(),
                layout.grid.block_size(),
                layout.last_arm_time()
            );
            commands.insert_resource(layout);
        }
        Err(e) => {
            failures.write(PipelineFailed::new("storm", e));
        }
    }
}
