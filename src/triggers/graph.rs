//! Triggers domain: the event graph handed to the scenario store.

use bevy::math::UVec2;
use bevy::prelude::*;

use crate::content::{CatalogEntry, CatalogId};
use crate::scenario::PlayerId;
use crate::storm::BlockRect;

/// Whether a damage pulse is running. Blocks only move `Dormant -> Active`,
/// and only their own storm event performs the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DamageState {
    #[default]
    Dormant,
    Active,
}

/// Looping damage pulse over one block.
///
/// Every active player is listed in `targets`, allies and enemies alike:
/// units of any player standing in the block take damage.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    pub name: String,
    pub area: BlockRect,
    pub quantity: u32,
    pub period_seconds: u32,
    pub targets: Vec<PlayerId>,
    pub initial_state: DamageState,
}

/// One-shot storm arrival over one block. Owns the damage pulse it enables.
#[derive(Debug, Clone, PartialEq)]
pub struct StormEvent {
    pub name: String,
    pub arm_time: u32,
    pub marker: CatalogId,
    pub marker_cells: Vec<UVec2>,
    pub damage: DamageEvent,
}

/// A reward tech unlocked once a player reaches a kill count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardSpec {
    pub tech: CatalogEntry,
    pub kill_threshold: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TechEvent {
    /// Researched unconditionally at scenario start.
    Initial {
        name: String,
        player: PlayerId,
        techs: Vec<CatalogEntry>,
    },
    /// Researched once `player` has killed `reward.kill_threshold` units,
    /// then announced to every player in `notify`.
    Reward {
        name: String,
        player: PlayerId,
        reward: RewardSpec,
        notify: Vec<PlayerId>,
    },
}

impl TechEvent {
    pub fn name(&self) -> &str {
        match self {
            TechEvent::Initial { name, .. } | TechEvent::Reward { name, .. } => name,
        }
    }

    pub fn player(&self) -> PlayerId {
        match self {
            TechEvent::Initial { player, .. } | TechEvent::Reward { player, .. } => *player,
        }
    }

    /// Text broadcast when a reward is unlocked.
    pub fn announcement(player: PlayerId, tech: &CatalogEntry) -> String {
        format!("{} has researched {}", player, tech.key)
    }
}

/// Every generated event: tech events first, then storm events in block order.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TriggerGraph {
    pub tech_events: Vec<TechEvent>,
    pub storm_events: Vec<StormEvent>,
}

impl TriggerGraph {
    /// Number of host triggers the graph expands to (storm events count twice).
    pub fn trigger_count(&self) -> usize {
        self.tech_events.len() + self.storm_events.len() * 2
    }

    pub fn summary(&self) -> String {
        let initial = self
            .tech_events
            .iter()
            .filter(|e| matches!(e, TechEvent::Initial { .. }))
            .count();
        format!(
            "TriggerGraph built: {} storm events, {} initial tech events, \
             {} reward events, {} triggers total",
            self.storm_events.len(),
            initial,
            self.tech_events.len() - initial,
            self.trigger_count()
        )
    }
}
