//! Scenario domain: the JSON scenario document.

use serde::{Deserialize, Serialize};

use crate::content::CatalogId;
use crate::core::GeneratorError;
use crate::scenario::store::Scenario;
use crate::scenario::vocabulary::{Condition, Effect, PlayerId, TriggerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub id: TriggerId,
    pub name: String,
    pub looping: bool,
    pub enabled: bool,
    pub condition: Condition,
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRecord {
    pub player: PlayerId,
    pub unit: CatalogId,
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// A scenario as stored on disk. Keys this crate does not know about are
/// kept in `extra` and written back untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioDocument {
    #[serde(default)]
    pub map_size: u32,
    #[serde(default)]
    pub active_players: u8,
    #[serde(default)]
    pub triggers: Vec<TriggerRecord>,
    #[serde(default)]
    pub units: Vec<UnitRecord>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
    /// Next unused trigger id. Filled from the highest existing id on the
    /// first push, then bumped once per trigger.
    #[serde(skip)]
    next_trigger_id: Option<u64>,
}

impl PartialEq for ScenarioDocument {
    fn eq(&self, other: &Self) -> bool {
        self.map_size == other.map_size
            && self.active_players == other.active_players
            && self.triggers == other.triggers
            && self.units == other.units
            && self.extra == other.extra
    }
}

impl ScenarioDocument {
    pub fn trigger(&self, id: TriggerId) -> Option<&TriggerRecord> {
        self.triggers.iter().find(|t| t.id == id)
    }

    pub fn trigger_named(&self, name: &str) -> Option<&TriggerRecord> {
        self.triggers.iter().find(|t| t.name == name)
    }

    fn allocate_trigger_id(&mut self) -> Result<TriggerId, GeneratorError> {
        let triggers = &self.triggers;
        let next = *self.next_trigger_id.get_or_insert_with(|| {
            triggers
                .iter()
                .map(|t| u64::from(t.id.0) + 1)
                .max()
                .unwrap_or(0)
        });
        let id = u32::try_from(next).map_err(|_| {
            GeneratorError::invalid_parameters(format!(
                "no trigger ids left after {}, the base scenario uses the last one",
                u32::MAX
            ))
        })?;
        self.next_trigger_id = Some(next + 1);
        Ok(TriggerId(id))
    }

    fn push_trigger(
        &mut self,
        name: &str,
        looping: bool,
        enabled: bool,
        condition: Condition,
        effects: Vec<Effect>,
    ) -> Result<TriggerId, GeneratorError> {
        let id = self.allocate_trigger_id()?;
        self.triggers.push(TriggerRecord {
            id,
            name: name.to_string(),
            looping,
            enabled,
            condition,
            effects,
        });
        Ok(id)
    }
}

impl Scenario for ScenarioDocument {
    fn map_size(&self) -> u32 {
        self.map_size
    }

    fn set_map_size(&mut self, size: u32) {
        self.map_size = size;
    }

    fn set_active_players(&mut self, count: u8) {
        self.active_players = count;
    }

    fn add_one_shot_trigger(
        &mut self,
        name: &str,
        condition: Condition,
        effects: Vec<Effect>,
    ) -> Result<TriggerId, GeneratorError> {
        self.push_trigger(name, false, true, condition, effects)
    }

    fn add_looping_trigger(
        &mut self,
        name: &str,
        condition: Condition,
        effects: Vec<Effect>,
        initially_enabled: bool,
    ) -> Result<TriggerId, GeneratorError> {
        self.push_trigger(name, true, initially_enabled, condition, effects)
    }

    fn add_unit(
        &mut self,
        player: PlayerId,
        unit: CatalogId,
        x: f64,
        y: f64,
        rotation_degrees: f64,
    ) {
        self.units.push(UnitRecord {
            player,
            unit,
            x,
            y,
            rotation: rotation_degrees,
        });
    }
}
