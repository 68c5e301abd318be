//! Scenario domain: the store contract, the JSON store and graph export.

mod document;
mod export;
mod store;
mod vocabulary;

pub use document::{ScenarioDocument, TriggerRecord, UnitRecord};
pub use export::{ExportCounts, export_generation};
pub use store::{JsonScenarioStore, Scenario, ScenarioStore, StoreError, StoreErrorKind};
pub use vocabulary::{Attribute, Condition, Effect, PlayerId, TriggerId};

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::path::PathBuf;

use crate::core::{GeneratorConfig, GeneratorError, GeneratorStage, PipelineFailed, Settings};
use crate::spawns::SpawnPlans;
use crate::triggers::TriggerGraph;

/// The base scenario as read from `--base-map`.
#[derive(Resource, Debug, Clone)]
pub struct BaseScenario(pub ScenarioDocument);

/// The store the generator reads from and writes to.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ActiveStore(pub JsonScenarioStore);

impl Default for ActiveStore {
    fn default() -> Self {
        Self(JsonScenarioStore::pretty())
    }
}

/// What the export stage produced.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub counts: ExportCounts,
    /// `None` for dry runs.
    pub written_to: Option<PathBuf>,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        match &self.written_to {
            Some(path) => format!(
                "Wrote {} triggers and {} units to {}",
                self.counts.triggers,
                self.counts.units,
                path.display()
            ),
            None => format!(
                "Dry run: {} triggers and {} units generated, nothing written",
                self.counts.triggers, self.counts.units
            ),
        }
    }
}

pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveStore>().add_systems(
            Startup,
            (
                open_base_scenario.in_set(GeneratorStage::Open),
                export_scenario.in_set(GeneratorStage::Export),
            ),
        );
    }
}

fn open_base_scenario(
    mut commands: Commands,
    settings: Option<Res<Settings>>,
    store: Res<ActiveStore>,
    mut failures: MessageWriter<PipelineFailed>,
) {
    let Some(settings) = settings else {
        return;
    };
    let Some(base_map) = settings.base_map.as_deref() else {
        failures.write(PipelineFailed::new(
            "scenario",
            GeneratorError::invalid_parameters("missing required base map"),
        ));
        return;
    };

    match store.0.create_scenario(base_map) {
        Ok(document) => {
            info!(
                "Opened base scenario {} (map size {}, {} existing triggers, {} units)",
                base_map.display(),
                document.map_size,
                document.triggers.len(),
                document.units.len()
            );
            commands.insert_resource(BaseScenario(document));
        }
        Err(e) => {
            failures.write(PipelineFailed::new("scenario", e.into()));
        }
    }
}

fn export_scenario(
    mut commands: Commands,
    config: Option<Res<GeneratorConfig>>,
    base: Option<Res<BaseScenario>>,
    graph: Option<Res<TriggerGraph>>,
    plans: Option<Res<SpawnPlans>>,
    store: Res<ActiveStore>,
    mut failures: MessageWriter<PipelineFailed>,
) {
    let (Some(config), Some(base), Some(graph), Some(plans)) = (config, base, graph, plans) else {
        return;
    };

    let mut document = base.0.clone();
    let counts = match export_generation(
        &mut document,
        config.grid.map_size(),
        config.player_count,
        &graph,
        &plans.0,
    ) {
        Ok(counts) => counts,
        Err(e) => {
            failures.write(PipelineFailed::new("export", e));
            return;
        }
    };

    let written_to = match (&config.out_file, config.dry_run) {
        (Some(out_file), false) => {
            if let Err(e) = store.0.write_scenario(&document, out_file) {
                failures.write(PipelineFailed::new("scenario", e.into()));
                return;
            }
            Some(out_file.clone())
        }
        _ => None,
    };

    commands.insert_resource(GenerationReport { counts, written_to });
}
