//! Triggers domain: building storm and tech events from the storm layout.

use bevy::tasks::{ComputeTaskPool, ParallelSlice, TaskPool};

use crate::content::{CatalogEntry, CatalogId};
use crate::core::{GeneratorConfig, GeneratorError};
use crate::scenario::PlayerId;
use crate::storm::{StormLayout, TimedBlock};
use crate::triggers::graph::{
    DamageEvent, DamageState, RewardSpec, StormEvent, TechEvent, TriggerGraph,
};

/// Grids with at least this many blocks are built on the compute task pool.
const PARALLEL_BLOCK_THRESHOLD: usize = 4096;
const BLOCK_CHUNK_SIZE: usize = 1024;

/// Settings shared by every storm event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StormParams {
    pub marker: CatalogId,
    pub damage_amount: u32,
    pub damage_frequency_seconds: u32,
    pub player_count: u8,
}

impl StormParams {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            marker: config.marker.id,
            damage_amount: config.damage_amount,
            damage_frequency_seconds: config.damage_frequency_seconds,
            player_count: config.player_count,
        }
    }
}

/// Zip reward techs with their kill thresholds.
pub fn pair_rewards(
    techs: Vec<CatalogEntry>,
    kill_thresholds: &[u32],
) -> Result<Vec<RewardSpec>, GeneratorError> {
    if techs.len() != kill_thresholds.len() {
        return Err(GeneratorError::invalid_parameters(format!(
            "{} reward techs but {} kill thresholds",
            techs.len(),
            kill_thresholds.len()
        )));
    }
    Ok(techs
        .into_iter()
        .zip(kill_thresholds)
        .map(|(tech, &kill_threshold)| RewardSpec {
            tech,
            kill_threshold,
        })
        .collect())
}

fn storm_event(timed: &TimedBlock, params: &StormParams) -> StormEvent {
    let rect = timed.block.rect;
    let key = rect.key();
    StormEvent {
        name: format!("{}_storm_trigger", key),
        arm_time: timed.arm_time,
        marker: params.marker,
        marker_cells: rect.cells().collect(),
        damage: DamageEvent {
            name: format!("{}_storm_damage_trigger", key),
            area: rect,
            quantity: params.damage_amount,
            period_seconds: params.damage_frequency_seconds,
            targets: PlayerId::all_active(params.player_count).collect(),
            initial_state: DamageState::Dormant,
        },
    }
}

/// One storm event per block, in block order.
pub fn build_storm_events(blocks: &[TimedBlock], params: &StormParams) -> Vec<StormEvent> {
    if blocks.len() < PARALLEL_BLOCK_THRESHOLD {
        return blocks.iter().map(|b| storm_event(b, params)).collect();
    }

    // chunk results come back in chunk order
    let pool = ComputeTaskPool::get_or_init(TaskPool::default);
    blocks
        .par_chunk_map(pool, BLOCK_CHUNK_SIZE, |_, chunk| {
            chunk
                .iter()
                .map(|b| storm_event(b, params))
                .collect::<Vec<_>>()
        })
        .into_iter()
        .flatten()
        .collect()
}

/// Initial tech events (one per player, only when `initial_techs` is
/// non-empty) followed by reward events, player-major.
pub fn build_tech_events(
    player_count: u8,
    initial_techs: &[CatalogEntry],
    rewards: &[RewardSpec],
) -> Vec<TechEvent> {
    let mut events = Vec::new();

    if !initial_techs.is_empty() {
        for p in 0..player_count {
            events.push(TechEvent::Initial {
                name: format!("{}_init_trigger", p),
                player: PlayerId::active(p),
                techs: initial_techs.to_vec(),
            });
        }
    }

    for p in 0..player_count {
        for (i, reward) in rewards.iter().enumerate() {
            events.push(TechEvent::Reward {
                name: format!("{}_{}_reward_trigger", p, i),
                player: PlayerId::active(p),
                reward: reward.clone(),
                notify: PlayerId::all_active(player_count).collect(),
            });
        }
    }

    events
}

pub fn build_trigger_graph(config: &GeneratorConfig, layout: &StormLayout) -> TriggerGraph {
    TriggerGraph {
        tech_events: build_tech_events(config.player_count, &config.initial_techs, &config.rewards),
        storm_events: build_storm_events(&layout.blocks, &StormParams::from_config(config)),
    }
}
