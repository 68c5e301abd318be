//! Scenario domain: the store contract and its JSON implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::content::CatalogId;
use crate::core::GeneratorError;
use crate::scenario::document::ScenarioDocument;
use crate::scenario::vocabulary::{Condition, Effect, PlayerId, TriggerId};

/// An open scenario the generator writes commands into. Adding a trigger
/// fails once the scenario has run out of trigger ids.
pub trait Scenario {
    fn map_size(&self) -> u32;
    fn set_map_size(&mut self, size: u32);
    fn set_active_players(&mut self, count: u8);

    fn add_one_shot_trigger(
        &mut self,
        name: &str,
        condition: Condition,
        effects: Vec<Effect>,
    ) -> Result<TriggerId, GeneratorError>;

    fn add_looping_trigger(
        &mut self,
        name: &str,
        condition: Condition,
        effects: Vec<Effect>,
        initially_enabled: bool,
    ) -> Result<TriggerId, GeneratorError>;

    fn add_unit(
        &mut self,
        player: PlayerId,
        unit: CatalogId,
        x: f64,
        y: f64,
        rotation_degrees: f64,
    );
}

/// Reads base scenarios and persists finished ones.
pub trait ScenarioStore {
    type Scenario: Scenario;

    fn create_scenario(&self, base_map: &Path) -> Result<Self::Scenario, StoreError>;
    fn write_scenario(&self, scenario: &Self::Scenario, out_path: &Path) -> Result<(), StoreError>;
}

#[derive(Debug)]
pub enum StoreErrorKind {
    Io(std::io::Error),
    Format(serde_json::Error),
}

/// Read/write failure, carrying the path it happened on.
#[derive(Debug)]
pub struct StoreError {
    pub path: PathBuf,
    pub kind: StoreErrorKind,
}

impl StoreError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: StoreErrorKind::Io(err),
        }
    }

    fn format(path: &Path, err: serde_json::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            kind: StoreErrorKind::Format(err),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StoreErrorKind::Io(e) => {
                write!(f, "Scenario IO error at {}: {}", self.path.display(), e)
            }
            StoreErrorKind::Format(e) => {
                write!(f, "Scenario format error at {}: {}", self.path.display(), e)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            StoreErrorKind::Io(e) => Some(e),
            StoreErrorKind::Format(e) => Some(e),
        }
    }
}

/// Stores scenarios as JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonScenarioStore {
    pub pretty: bool,
}

impl JsonScenarioStore {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl ScenarioStore for JsonScenarioStore {
    type Scenario = ScenarioDocument;

    fn create_scenario(&self, base_map: &Path) -> Result<ScenarioDocument, StoreError> {
        let contents = fs::read_to_string(base_map).map_err(|e| StoreError::io(base_map, e))?;
        serde_json::from_str(&contents).map_err(|e| StoreError::format(base_map, e))
    }

    /// Writes next to `out_path` first and renames over it, so a failed
    /// write never leaves a truncated scenario behind.
    fn write_scenario(
        &self,
        scenario: &ScenarioDocument,
        out_path: &Path,
    ) -> Result<(), StoreError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(scenario)
        } else {
            serde_json::to_vec(scenario)
        }
        .map_err(|e| StoreError::format(out_path, e))?;

        let mut staging = out_path.as_os_str().to_owned();
        staging.push(".partial");
        let staging = PathBuf::from(staging);

        fs::write(&staging, encoded).map_err(|e| StoreError::io(&staging, e))?;
        fs::rename(&staging, out_path).map_err(|e| {
            let _ = fs::remove_file(&staging);
            StoreError::io(out_path, e)
        })
    }
}
