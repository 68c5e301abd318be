//! Storm domain: turning distance from the map center into an arm time.

use std::f64::consts::SQRT_2;

use crate::core::GeneratorError;
use crate::storm::geometry::Block;

/// Linear countdown from the map corners (time 0) to the center
/// (`storm_seconds`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StormTimeline {
    max_distance: f64,
    time_per_distance: f64,
}

impl StormTimeline {
    pub fn new(map_size: u32, storm_seconds: u32) -> Result<Self, GeneratorError> {
        // center-to-corner distance
        let max_distance = SQRT_2 * map_size as f64 / 2.0;
        if max_distance == 0.0 {
            return Err(GeneratorError::invalid_geometry(
                "storm timeline needs a map with a non-zero center-to-corner distance",
            ));
        }
        Ok(Self {
            max_distance,
            time_per_distance: storm_seconds as f64 / max_distance,
        })
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    pub fn time_per_distance(&self) -> f64 {
        self.time_per_distance
    }

    /// Whole seconds after scenario start at which a block at `distance`
    /// is swallowed by the storm.
    pub fn arm_time(&self, distance: f64) -> u32 {
        let seconds = ((self.max_distance - distance) * self.time_per_distance).floor();
        seconds.max(0.0) as u32
    }
}

/// A block together with the second its storm arms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedBlock {
    pub block: Block,
    pub arm_time: u32,
}

/// Pair every block with its arm time, preserving block order.
pub fn schedule(blocks: &[Block], timeline: &StormTimeline) -> Vec<TimedBlock> {
    blocks
        .iter()
        .map(|block| TimedBlock {
            block: *block,
            arm_time: timeline.arm_time(block.distance_from_center),
        })
        .collect()
}
