//! Scenario domain: the command vocabulary a scenario store accepts.

use serde::{Deserialize, Serialize};

use crate::content::CatalogId;

/// Host player slot. Slot 0 is gaia; active players start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const GAIA: PlayerId = PlayerId(0);

    /// Slot of the active player with 0-based `index`.
    pub fn active(index: u8) -> Self {
        PlayerId(index + 1)
    }

    /// All active player slots for `player_count` players.
    pub fn all_active(player_count: u8) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(PlayerId::active)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Store-assigned trigger handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerId(pub u32);

/// Per-player counters a condition can accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    UnitsKilled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// No precondition; fires as soon as the trigger is enabled.
    Always,
    /// Elapsed seconds since the trigger was enabled.
    Timer { seconds: u32 },
    AccumulateAttribute {
        player: PlayerId,
        attribute: Attribute,
        quantity: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    PlaceObject {
        kind: CatalogId,
        player: PlayerId,
        x: u32,
        y: u32,
    },
    /// Damages units owned by `player` inside the inclusive cell rectangle.
    DamageArea {
        player: PlayerId,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        amount: u32,
    },
    EnableTrigger { trigger: TriggerId },
    ResearchTech {
        player: PlayerId,
        tech: CatalogId,
        force: bool,
    },
    BroadcastMessage { player: PlayerId, text: String },
}
